//! Error types for the scoring engine.

use thiserror::Error;

/// Errors that can occur while segmenting, scoring or aggregating.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AffectError {
    /// Input rejected before any scoring began.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Malformed lexicon data or configuration values.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// The injected inference capability failed, timed out or returned an
    /// out-of-range probability.
    #[error("inference error: {message}")]
    Inference { message: String },

    /// Scoring was cancelled before every window was scored.
    #[error("run cancelled before all windows were scored")]
    Cancelled,

    /// Reading or writing a file failed.
    #[error("i/o error: {path}: {message}")]
    Io { path: String, message: String },
}

impl AffectError {
    pub fn validation(message: impl Into<String>) -> Self {
        AffectError::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        AffectError::Configuration {
            message: message.into(),
        }
    }

    pub fn inference(message: impl Into<String>) -> Self {
        AffectError::Inference {
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        AffectError::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Short, stable name of the error kind.
    ///
    /// Used by fixture files to declare an expected failure.
    pub fn kind(&self) -> &'static str {
        match self {
            AffectError::Validation { .. } => "validation",
            AffectError::Configuration { .. } => "configuration",
            AffectError::Inference { .. } => "inference",
            AffectError::Cancelled => "cancelled",
            AffectError::Io { .. } => "io",
        }
    }
}

/// Result type for engine operations.
pub type AffectResult<T> = Result<T, AffectError>;
