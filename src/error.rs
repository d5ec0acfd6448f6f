//! Error types for the GGOutlier QAX plugin
//!
//! This module defines all error types used throughout the adapter.
//! Uses `thiserror` for ergonomic error handling with automatic `Display`
//! and `Error` trait implementations.

use thiserror::Error;

/// The primary error type for adapter operations.
#[derive(Error, Debug)]
pub enum GgoutlierQaxError {
    /// Configuration-related errors (invalid settings file, bad values, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// QAJSON document errors (missing data levels, malformed params, etc.)
    #[error("QAJSON error: {0}")]
    Qajson(String),

    /// Check execution errors (bad inputs, missing outputs, etc.)
    #[error("Check error: {0}")]
    Check(String),

    /// Failures reported by the external GGOutlier executable.
    /// These are surfaced verbatim; the adapter performs no recovery.
    #[error("GGOutlier error: {0}")]
    ExternalTool(String),

    /// The GGOutlier executable could not be located.
    #[error("Executable not found: {0}")]
    ExecutableNotFound(String),

    /// Standard I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for adapter operations.
pub type Result<T> = std::result::Result<T, GgoutlierQaxError>;
