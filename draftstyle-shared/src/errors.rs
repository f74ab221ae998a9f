use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while persisting the preset or parameter documents.
///
/// None of these are fatal: callers report them and carry on with whatever
/// state they already hold.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unable to serialize style document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while interpreting user-supplied style values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    #[error("Unknown style attribute: {name}")]
    UnknownAttribute { name: String },

    #[error("Invalid value '{value}' for {attribute}: expected {expected}")]
    InvalidValue {
        attribute: String,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid color literal '{literal}': {reason}")]
    InvalidColor { literal: String, reason: String },

    #[error("Malformed assignment '{input}': expected KEY=VALUE")]
    MalformedAssignment { input: String },
}

impl StyleError {
    /// Create an InvalidValue error for an attribute of a given kind
    pub fn invalid_value(attribute: &str, value: &str, expected: &'static str) -> Self {
        StyleError::InvalidValue {
            attribute: attribute.to_string(),
            value: value.to_string(),
            expected,
        }
    }
}

/// Result type aliases for convenience
pub type StoreResult<T> = Result<T, StoreError>;
pub type StyleResult<T> = Result<T, StyleError>;
