use std::collections::HashSet;

use crate::foundation::ids::LayerId;

/// Stable code for a [`WarningKind`]; one warning per `(layer, code)` is kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    UnsupportedBlend,
    ClipDegraded,
    StrokeOnBooleanShape,
    StrokeOnMaskedShape,
    MalformedEffect,
    UnsupportedContent,
}

/// A non-fatal condition recovered locally during conversion.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum WarningKind {
    /// Blend mode with no native or approximate equivalent; `substitute` was used.
    UnsupportedBlend { mode: String, substitute: String },
    /// Path clip could not be built from the geometry; fell back to an alpha mask.
    ClipDegraded { reason: String },
    /// Stroke on a boolean-combined shape renders through the mask and is inexact.
    StrokeOnBooleanShape,
    /// Stroke on a layer restricted by a vector mask renders through the mask.
    StrokeOnMaskedShape,
    /// An effect entry was skipped because its parameters are unusable.
    MalformedEffect { effect: String, reason: String },
    /// Content the target format cannot express was skipped.
    UnsupportedContent { what: String },
}

impl WarningKind {
    pub fn code(&self) -> WarningCode {
        match self {
            Self::UnsupportedBlend { .. } => WarningCode::UnsupportedBlend,
            Self::ClipDegraded { .. } => WarningCode::ClipDegraded,
            Self::StrokeOnBooleanShape => WarningCode::StrokeOnBooleanShape,
            Self::StrokeOnMaskedShape => WarningCode::StrokeOnMaskedShape,
            Self::MalformedEffect { .. } => WarningCode::MalformedEffect,
            Self::UnsupportedContent { .. } => WarningCode::UnsupportedContent,
        }
    }
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedBlend { mode, substitute } => {
                write!(f, "blend mode '{mode}' is unsupported, using '{substitute}'")
            }
            Self::ClipDegraded { reason } => {
                write!(f, "clip geometry unresolvable ({reason}), using alpha mask")
            }
            Self::StrokeOnBooleanShape => {
                f.write_str("stroke on boolean-combined shape may render incorrectly")
            }
            Self::StrokeOnMaskedShape => {
                f.write_str("stroke on vector-masked layer may render incorrectly")
            }
            Self::MalformedEffect { effect, reason } => {
                write!(f, "skipped effect '{effect}': {reason}")
            }
            Self::UnsupportedContent { what } => write!(f, "skipped unsupported {what}"),
        }
    }
}

/// A warning attributed to one layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Warning {
    pub layer: LayerId,
    pub layer_name: String,
    pub kind: WarningKind,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layer '{}': {}", self.layer_name, self.kind)
    }
}

/// Session-scoped warning sink.
#[derive(Debug, Default)]
pub struct Diagnostics {
    seen: HashSet<(LayerId, WarningCode)>,
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record `kind` for `layer` unless a warning with the same code was already
    /// recorded for it. Returns whether the warning was new.
    pub fn warn(&mut self, layer: LayerId, layer_name: &str, kind: WarningKind) -> bool {
        if !self.seen.insert((layer, kind.code())) {
            return false;
        }
        tracing::warn!(layer = layer_name, code = ?kind.code(), "{kind}");
        self.warnings.push(Warning {
            layer,
            layer_name: layer_name.to_string(),
            kind,
        });
        true
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/diag.rs"]
mod tests;
