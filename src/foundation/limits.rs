use std::time::{Duration, Instant};

use crate::foundation::error::{LayerSvgError, LayerSvgResult};

/// Which resource budget tripped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitKind {
    /// Group nesting deeper than [`ResourceLimits::max_depth`].
    Depth,
    /// Canvas or raster payload larger than [`ResourceLimits::max_dimension`].
    Dimension,
    /// Wall-clock budget [`ResourceLimits::timeout_ms`] exhausted.
    Timeout,
}

impl std::fmt::Display for LimitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Depth => "depth",
            Self::Dimension => "dimension",
            Self::Timeout => "timeout",
        })
    }
}

/// Resource ceilings enforced for one conversion.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ResourceLimits {
    /// Maximum group nesting depth (root siblings are depth 1).
    pub max_depth: usize,
    /// Maximum width or height, in pixels, of the canvas and of any raster payload.
    pub max_dimension: u32,
    /// Optional wall-clock budget for the whole traversal, in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_dimension: 30_000,
            timeout_ms: None,
        }
    }
}

impl ResourceLimits {
    pub fn check_dimension(&self, what: &str, width: u32, height: u32) -> LayerSvgResult<()> {
        let largest = width.max(height);
        if largest > self.max_dimension {
            return Err(LayerSvgError::limit(
                LimitKind::Dimension,
                format!(
                    "{what} is {width}x{height}, max dimension is {}",
                    self.max_dimension
                ),
            ));
        }
        Ok(())
    }
}

/// Per-session depth counter and deadline.
///
/// The walker calls [`Budget::enter`] before every recursive descent and
/// [`Budget::leave`] after it returns.
#[derive(Debug)]
pub struct Budget {
    max_depth: usize,
    depth: usize,
    deadline: Option<Instant>,
}

impl Budget {
    pub fn start(limits: &ResourceLimits) -> Self {
        Self {
            max_depth: limits.max_depth,
            depth: 0,
            deadline: limits
                .timeout_ms
                .map(|ms| Instant::now() + Duration::from_millis(ms)),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn enter(&mut self, layer_name: &str) -> LayerSvgResult<()> {
        self.check_deadline(layer_name)?;
        if self.depth >= self.max_depth {
            return Err(LayerSvgError::limit(
                LimitKind::Depth,
                format!(
                    "layer '{layer_name}' is nested deeper than {}",
                    self.max_depth
                ),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn check_deadline(&self, layer_name: &str) -> LayerSvgResult<()> {
        if let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            return Err(LayerSvgError::limit(
                LimitKind::Timeout,
                format!("time budget exhausted at layer '{layer_name}'"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/limits.rs"]
mod tests;
