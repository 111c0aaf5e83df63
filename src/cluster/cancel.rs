use std::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::error::ClusterError;

/// Something the algorithms poll between outer-loop iterations to learn
/// whether the pass should stop
///
/// `Error` is what the pass returns when it stops early. [`Uninterrupted`]
/// uses [`Infallible`], which lets callers that never cancel drop the
/// `Result` without a panic path.
pub trait Interrupt {
    type Error;

    fn check(&self) -> Result<(), Self::Error>;
}

/// Shared flag used to abandon a clustering pass that has gone stale
///
/// Algorithms poll it between outer-loop iterations, so cancellation takes
/// effect within one neighborhood query or one grid row.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Returns `Err(ClusterError::Cancelled)` once the token has been cancelled
    pub fn check(&self) -> Result<(), ClusterError> {
        if self.is_cancelled() {
            Err(ClusterError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Interrupt for CancelToken {
    type Error = ClusterError;

    fn check(&self) -> Result<(), ClusterError> {
        CancelToken::check(self)
    }
}

/// Pass that always runs to completion
#[derive(Debug, Clone, Copy, Default)]
pub struct Uninterrupted;

impl Interrupt for Uninterrupted {
    type Error = Infallible;

    fn check(&self) -> Result<(), Infallible> {
        Ok(())
    }
}
