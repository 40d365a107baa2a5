//! Error types for the fixture system.

use thiserror::Error;

/// Errors that stop a fixture from being run at all.
///
/// Failures of the scenario itself are reported as
/// [`Mismatch`](crate::Mismatch)es, not errors.
#[derive(Debug, Error)]
pub enum SpecError {
    /// A fixture file could not be read.
    #[error("failed to load fixture: {path}: {message}")]
    Load { path: String, message: String },

    /// A fixture file is not a valid scenario document.
    #[error("invalid fixture {origin}: {message}")]
    Parse { origin: String, message: String },
}

/// Result type for fixture operations.
pub type SpecResult<T> = Result<T, SpecError>;
