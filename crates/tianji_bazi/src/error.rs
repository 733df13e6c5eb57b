//! Error types for chart computation.

use thiserror::Error;

use tianji_base::BaseError;
use tianji_time::TimeError;

/// Errors from resolving a birth moment or computing a chart.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum BaziError {
    /// A caller-supplied field failed validation.
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        /// Input field name.
        field: &'static str,
        /// Human-readable cause.
        reason: String,
    },
    /// Calendar resolution failed.
    #[error(transparent)]
    Time(#[from] TimeError),
    /// Cycle arithmetic rejected a value.
    #[error(transparent)]
    Base(#[from] BaseError),
    /// Calculation hit a limit of the tables or algorithms.
    #[error("[{code}] {message}")]
    Calculation {
        /// Stable internal code.
        code: &'static str,
        /// Human-readable cause.
        message: String,
    },
}

impl BaziError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// True when the error stems from caller input.
    pub fn is_validation(&self) -> bool {
        match self {
            Self::InvalidInput { .. } => true,
            Self::Time(e) => e.is_validation(),
            Self::Base(_) | Self::Calculation { .. } => false,
        }
    }

    /// Stable internal code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "E_INPUT",
            Self::Time(e) => e.code(),
            Self::Base(_) => "E_CYCLE",
            Self::Calculation { code, .. } => *code,
        }
    }

    /// Field name for validation failures, when known.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput { field, .. } => Some(*field),
            Self::Time(TimeError::InvalidDate(_) | TimeError::InvalidLunarDate(_)) => {
                Some("birth_date")
            }
            Self::Time(TimeError::InvalidTime(_) | TimeError::NonexistentLocalTime(_)) => {
                Some("birth_time")
            }
            Self::Time(TimeError::UnknownTimezone(_)) => Some("timezone"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_errors_keep_their_codes() {
        let e: BaziError = TimeError::LunarOutOfRange("1899-01-01".into()).into();
        assert_eq!(e.code(), "E_LUNAR_RANGE");
        assert!(!e.is_validation());

        let e: BaziError = TimeError::UnknownTimezone("Mars/Base".into()).into();
        assert!(e.is_validation());
        assert_eq!(e.field(), Some("timezone"));
    }

    #[test]
    fn invalid_input_display() {
        let e = BaziError::invalid("longitude", "must be within [-180, 180]");
        assert_eq!(e.to_string(), "invalid longitude: must be within [-180, 180]");
        assert_eq!(e.field(), Some("longitude"));
    }
}
