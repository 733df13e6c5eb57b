//! Error type for the engine facade.

use std::path::PathBuf;

use tianji_bazi::BaziError;
use tianji_xuankong::XuankongError;

/// Errors surfaced by [`crate::Engine`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EngineError {
    /// Caller input was rejected before any computation.
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },
    /// A computation failed with a stable internal code.
    #[error("[{code}] {message}")]
    Calculation {
        code: &'static str,
        message: String,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to read {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Stable internal code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "E_INPUT",
            Self::Calculation { code, .. } => *code,
            Self::InvalidConfig(_) | Self::ConfigRead { .. } => "E_CONFIG",
            Self::Serialization(_) => "E_SERIALIZE",
        }
    }
}

impl From<BaziError> for EngineError {
    fn from(e: BaziError) -> Self {
        if e.is_validation() {
            Self::Validation {
                field: e.field().unwrap_or("input"),
                reason: e.to_string(),
            }
        } else {
            Self::Calculation {
                code: e.code(),
                message: e.to_string(),
            }
        }
    }
}

impl From<XuankongError> for EngineError {
    fn from(e: XuankongError) -> Self {
        match e {
            XuankongError::InvalidInput { field, reason } => Self::Validation { field, reason },
            // Plate construction is total; only `#[non_exhaustive]` keeps this arm.
            other => Self::Calculation {
                code: other.code(),
                message: other.to_string(),
            },
        }
    }
}
