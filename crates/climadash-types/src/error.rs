//! Error types for reading validation in climadash-types.

use thiserror::Error;

/// Errors that can occur when validating readings received from the API.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Generic malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A required field was absent from a wire record.
    #[error("Reading {id} is missing field '{field}'")]
    MissingField {
        /// Identifier of the offending record (or `<unknown>`).
        id: String,
        /// Wire name of the missing field.
        field: &'static str,
    },

    /// The `date` field could not be parsed as a timestamp.
    #[error("Invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    /// A month index outside 0..=11.
    #[error("Invalid month index {0} (expected 0-11)")]
    InvalidMonth(i64),
}

/// Result type alias using climadash-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
