//! Error types for cycle arithmetic and name lookup.

use thiserror::Error;

/// Errors from constructing stems, branches, or sexagenary pairs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BaseError {
    /// Raw index outside the table it addresses.
    #[error("{kind} index {value} out of range")]
    InvalidIndex {
        /// Which table was addressed (`"stem"`, `"branch"`, `"sexagenary"`).
        kind: &'static str,
        /// Offending index.
        value: i64,
    },
    /// Stem and branch of opposite polarity never pair in the 60-term cycle.
    #[error("{stem}{branch} is not a sexagenary pair (stem and branch parity differ)")]
    InvalidPair {
        /// Stem name.
        stem: &'static str,
        /// Branch name.
        branch: &'static str,
    },
    /// Name not found in the relevant table.
    #[error("unknown {kind} name '{name}'")]
    UnknownName {
        /// Which table was searched.
        kind: &'static str,
        /// Name as given.
        name: String,
    },
}
