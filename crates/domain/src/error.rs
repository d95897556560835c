//! Unified error types for the domain layer
//!
//! User-input variability is never an error here: unmatched keywords and
//! unmapped transitions are ordinary outcomes. The variants below cover the
//! few recoverable conditions and the string-to-enum conversions used at the
//! wire and LLM boundaries.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Undo requested with an empty snapshot stack
    #[error("Nothing to undo")]
    NothingToUndo,
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant:
    ///
    /// ```ignore
    /// impl FromStr for Genre {
    ///     type Err = DomainError;
    ///     fn from_str(s: &str) -> Result<Self, Self::Err> {
    ///         match s {
    ///             "platformer" => Ok(Self::Platformer),
    ///             _ => Err(DomainError::parse(format!("Unknown genre: {}", s))),
    ///         }
    ///     }
    /// }
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
