use thiserror::Error;

/// Errors returned by the clustering engine
///
/// Data edge cases (empty input, tiny input, degenerate boxes) are not errors;
/// failures come from a pass abandoned through its [`super::CancelToken`], a
/// background worker going away or waiting on a scheduler with no work.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusterError {
    #[error("clustering was cancelled")]
    Cancelled,
    /// The pass for a request ended without producing a result
    #[error("clustering worker disconnected")]
    Disconnected,
    /// Every submitted request has already been received
    #[error("no clustering request pending")]
    NothingPending,
}
