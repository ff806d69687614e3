//! Validation error model for user- and file-supplied SQL identifiers.

use thiserror::Error;

/// Result type used by identifier validation.
pub type IdentifierResult<T> = Result<T, IdentifierError>;

/// Identifier validation error.
///
/// Identifiers end up spliced into SQL text (table and column names cannot be
/// bound as parameters), so every rejection happens before a query is built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The identifier was empty or only whitespace.
    #[error("identifier must not be empty")]
    Empty,

    /// The identifier exceeded the PostgreSQL identifier length.
    #[error("identifier `{0}` is longer than {max} bytes", max = crate::identifier::MAX_IDENTIFIER_LEN)]
    TooLong(String),

    /// The identifier contained characters outside `[A-Za-z0-9_]` or started with a digit.
    #[error("invalid identifier `{0}`: must match ^[A-Za-z_][A-Za-z0-9_]*$")]
    InvalidCharacters(String),

    /// The identifier is well-formed but not on the configured allow-list.
    #[error("table `{0}` is not allowed")]
    NotAllowed(String),
}
