//! Error types for llmlens.

use thiserror::Error;

/// Primary error type for all llmlens operations.
///
/// Aggregation itself is infallible by design: malformed stream lines are
/// skipped and unknown event kinds ignored. Errors only arise when a whole
/// body fails to parse as the format the caller claimed it was.
#[derive(Error, Debug)]
pub enum LensError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, LensError>;
