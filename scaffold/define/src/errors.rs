//! Error types for schema definitions.

use thiserror::Error;

/// Errors raised when checking schema element names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefineError {
    /// A required name is empty or whitespace.
    #[error("name must not be empty")]
    EmptyName,

    /// A name cannot be used as a generated identifier.
    #[error("'{name}' is not a valid identifier: {reason}")]
    InvalidIdentifier {
        /// The offending name.
        name: String,
        /// Why the name was rejected.
        reason: &'static str,
    },
}
