use thiserror::Error;

/// Errors surfaced by the convenience entry points.
///
/// Completion itself is total: every input, valid or not, yields an output
/// string. Errors arise only when writing the result to a sink, or when the
/// completed text still fails to parse as JSON (possible for inputs that were
/// malformed rather than merely truncated).
#[derive(Debug, Error)]
pub enum CompleteError {
    #[error("failed to write completed JSON: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error("completed text is still not valid JSON: {0}")]
    StillInvalid(#[from] serde_json::Error),
}
