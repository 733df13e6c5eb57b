//! Error types for plate computation.

use thiserror::Error;

/// Errors from building or evaluating a flying-star plate.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum XuankongError {
    /// A caller-supplied field failed validation.
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        /// Input field name.
        field: &'static str,
        /// Human-readable cause.
        reason: String,
    },
}

impl XuankongError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// True when the error stems from caller input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Stable internal code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "E_INPUT",
        }
    }
}
