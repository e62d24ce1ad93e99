//! Error types for kompose.
//!
//! Unsupported design constructs are not errors: the converter drops them.
//! What remains are malformed persisted configuration and internal invariant
//! violations during rendering.

use thiserror::Error;

/// Errors while loading a mapping configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Invalid config syntax: {message}")]
    Syntax { message: String },

    #[error("Unknown key in config: {key}")]
    UnknownCategory { key: String },

    #[error("Config section [{key}] must be a table of entries")]
    InvalidSection { key: String },

    #[error("Config key \"{key}\" has an unsupported value")]
    UnsupportedValue { key: String },
}

/// Errors during rendering. These indicate a broken internal invariant rather
/// than a problem with the user's design.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("Unsupported {kind} value: {value}")]
    UnsupportedValue { kind: String, value: String },

    #[error("Rendered text contains the reserved marker character: {text:?}")]
    MarkerCollision { text: String },

    #[error("Malformed marker record: {record:?}")]
    MalformedMarker { record: String },
}
