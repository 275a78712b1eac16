use crate::foundation::limits::LimitKind;

/// Convenience result type used across layersvg.
pub type LayerSvgResult<T> = Result<T, LayerSvgError>;

/// Fatal error taxonomy.
///
/// Everything that can be recovered per layer is reported as a
/// [`Warning`](crate::Warning) instead; only whole-conversion failures end up here.
#[derive(thiserror::Error, Debug)]
pub enum LayerSvgError {
    /// Structurally invalid input document (cycle, dangling index, bad payload).
    #[error("validation error: {0}")]
    Validation(String),

    /// A resource budget tripped during conversion.
    #[error("resource limit exceeded ({limit}): {detail}")]
    LimitExceeded {
        /// Which budget tripped.
        limit: LimitKind,
        /// Human-readable context (observed value, layer name).
        detail: String,
    },

    /// Failure while encoding an embedded payload (PNG, base64).
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// A broken internal invariant (e.g. a clip section driven out of order).
    #[error("internal error: {0}")]
    Internal(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LayerSvgError {
    /// Build a [`LayerSvgError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LayerSvgError::LimitExceeded`] value.
    pub fn limit(limit: LimitKind, detail: impl Into<String>) -> Self {
        Self::LimitExceeded {
            limit,
            detail: detail.into(),
        }
    }

    /// Build a [`LayerSvgError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`LayerSvgError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`LayerSvgError::Internal`] value.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// The tripped limit, if this is a [`LayerSvgError::LimitExceeded`].
    pub fn limit_kind(&self) -> Option<LimitKind> {
        match self {
            Self::LimitExceeded { limit, .. } => Some(*limit),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LayerSvgError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
