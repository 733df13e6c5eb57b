//! Error types for calendar resolution.

use thiserror::Error;

/// Errors from civil-time parsing, timezone resolution, solar-term search,
/// or lunar conversion.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Date string is not `YYYY-MM-DD` or names a non-existent day.
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
    /// Time string is not `HH:MM` or `HH:MM:SS`.
    #[error("invalid time '{0}': expected HH:MM or HH:MM:SS")]
    InvalidTime(String),
    /// Timezone is neither an IANA identifier nor a fixed offset.
    #[error("unknown timezone '{0}'")]
    UnknownTimezone(String),
    /// Local time falls into a daylight-saving gap.
    #[error("local time {0} does not exist in the requested timezone")]
    NonexistentLocalTime(String),
    /// Lunar month/day combination does not exist in that lunar year.
    #[error("invalid lunar date: {0}")]
    InvalidLunarDate(String),
    /// Date lies outside the lunar table (1900-01-31 .. 2100-12-31).
    #[error("date outside the supported lunar range: {0}")]
    LunarOutOfRange(String),
    /// Iterative solar-longitude search did not converge.
    #[error("no convergence: {0}")]
    NoConvergence(&'static str),
}

impl TimeError {
    /// Stable internal code for logs and API responses.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidDate(_) => "E_DATE",
            Self::InvalidTime(_) => "E_TIME",
            Self::UnknownTimezone(_) => "E_TIMEZONE",
            Self::NonexistentLocalTime(_) => "E_LOCAL_TIME",
            Self::InvalidLunarDate(_) => "E_LUNAR_DATE",
            Self::LunarOutOfRange(_) => "E_LUNAR_RANGE",
            Self::NoConvergence(_) => "E_TERM_SEARCH",
        }
    }

    /// True when the error is caused by malformed caller input rather than
    /// a limit of the calendar tables or algorithms.
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDate(_)
                | Self::InvalidTime(_)
                | Self::UnknownTimezone(_)
                | Self::NonexistentLocalTime(_)
                | Self::InvalidLunarDate(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let errs = [
            TimeError::InvalidDate(String::new()),
            TimeError::InvalidTime(String::new()),
            TimeError::UnknownTimezone(String::new()),
            TimeError::NonexistentLocalTime(String::new()),
            TimeError::InvalidLunarDate(String::new()),
            TimeError::LunarOutOfRange(String::new()),
            TimeError::NoConvergence("x"),
        ];
        let mut codes: Vec<_> = errs.iter().map(TimeError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errs.len());
    }

    #[test]
    fn range_errors_are_not_validation() {
        assert!(!TimeError::LunarOutOfRange("1850-01-01".into()).is_validation());
        assert!(!TimeError::NoConvergence("x").is_validation());
        assert!(TimeError::InvalidTime("25:00".into()).is_validation());
    }

    #[test]
    fn display_includes_input() {
        let e = TimeError::UnknownTimezone("Mars/Olympus".into());
        assert!(e.to_string().contains("Mars/Olympus"));
    }
}
