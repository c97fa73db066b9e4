// In crates/core-types/src/error.rs

use thiserror::Error;

/// A field-level schema violation, raised before any storage access.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// The offending field, using its wire (camelCase) name.
    pub field: String,
    /// The human-readable rule that was broken.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;
