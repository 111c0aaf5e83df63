//! Runs clustering requests off the caller's thread
//!
//! - Every [`ClusterScheduler::submit`] gets a new generation number and its
//!   own [`CancelToken`]; submitting cancels the previous request.
//! - Work runs on the rayon pool, results come back over a crossbeam channel.
//!   A pass that panics still reports back, as [`ClusterError::Disconnected`].
//! - `recv_latest*` drop anything that is not from the newest generation, so a
//!   stale pass finishing late never overwrites a newer one.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};

use crate::cluster::{CancelToken, ClusterError, ClusterResult, ClusteringContext, GeoPoint};
use crate::engine::ClusterEngine;

/// A finished (or abandoned) request
#[derive(Debug)]
pub struct Completed<T> {
    pub generation: u64,
    pub result: Result<ClusterResult<T>, ClusterError>,
}

/// Background clustering with newest-request-wins semantics
#[derive(Debug)]
pub struct ClusterScheduler<T> {
    engine: Arc<ClusterEngine>,
    generation: u64,
    /// Newest generation already handed to the caller
    delivered: u64,
    current: CancelToken,
    tx: Sender<Completed<T>>,
    rx: Receiver<Completed<T>>,
}

impl<T: Send + 'static> ClusterScheduler<T> {
    pub fn new(engine: ClusterEngine) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        ClusterScheduler {
            engine: Arc::new(engine),
            generation: 0,
            delivered: 0,
            current: CancelToken::new(),
            tx,
            rx,
        }
    }

    /// Queues a clustering pass and returns its generation number
    ///
    /// Any pass still running for an older generation is cancelled.
    pub fn submit(&mut self, points: Vec<GeoPoint<T>>, ctx: ClusteringContext) -> u64 {
        self.current.cancel();
        let token = CancelToken::new();
        self.current = token.clone();
        self.generation += 1;

        let generation = self.generation;
        let engine = Arc::clone(&self.engine);
        let tx = self.tx.clone();
        log::debug!("submitting clustering generation {generation} ({} points)", points.len());

        rayon::spawn(move || {
            deliver(&tx, generation, || engine.cluster_cancellable(points, &ctx, &token));
        });
        generation
    }

    /// Cancels the newest request, if it is still running
    pub fn cancel(&self) {
        self.current.cancel();
    }

    /// Generation number of the newest submitted request, 0 before any submit
    pub fn latest_generation(&self) -> u64 {
        self.generation
    }

    /// True if `generation` is the newest request
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// True while the newest request has not been received yet
    pub fn is_pending(&self) -> bool {
        self.delivered < self.generation
    }

    /// Blocks until the newest request finishes
    ///
    /// Returns `Err(ClusterError::NothingPending)` at once if nothing was
    /// submitted since the last result was received.
    pub fn recv_latest(&mut self) -> Result<ClusterResult<T>, ClusterError> {
        if !self.is_pending() {
            return Err(ClusterError::NothingPending);
        }
        loop {
            let done = self.rx.recv().map_err(|_| ClusterError::Disconnected)?;
            if let Some(result) = self.accept(done) {
                return result;
            }
        }
    }

    /// Like [`ClusterScheduler::recv_latest`] but gives up after `timeout`
    ///
    /// Returns `None` on timeout or when nothing is pending.
    pub fn recv_latest_timeout(&mut self, timeout: Duration) -> Option<Result<ClusterResult<T>, ClusterError>> {
        if !self.is_pending() {
            return None;
        }
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(done) => {
                    if let Some(result) = self.accept(done) {
                        return Some(result);
                    }
                }
                Err(RecvTimeoutError::Timeout) => return None,
                Err(RecvTimeoutError::Disconnected) => return Some(Err(ClusterError::Disconnected)),
            }
        }
    }

    /// Returns the newest result if it has already arrived, draining stale ones
    pub fn try_recv_latest(&mut self) -> Option<Result<ClusterResult<T>, ClusterError>> {
        loop {
            match self.rx.try_recv() {
                Ok(done) => {
                    if let Some(result) = self.accept(done) {
                        return Some(result);
                    }
                }
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => return Some(Err(ClusterError::Disconnected)),
            }
        }
    }

    fn accept(&mut self, done: Completed<T>) -> Option<Result<ClusterResult<T>, ClusterError>> {
        if self.is_current(done.generation) {
            self.delivered = done.generation;
            Some(done.result)
        } else {
            log::debug!(
                "discarding stale generation {} (latest {})",
                done.generation,
                self.generation
            );
            None
        }
    }
}

/// Runs `work` and sends its outcome, turning a panic into `Disconnected`
pub(crate) fn deliver<T, F>(tx: &Sender<Completed<T>>, generation: u64, work: F)
where
    F: FnOnce() -> Result<ClusterResult<T>, ClusterError>,
{
    let result = panic::catch_unwind(AssertUnwindSafe(work)).unwrap_or_else(|_| {
        log::error!("clustering generation {generation} panicked");
        Err(ClusterError::Disconnected)
    });
    if tx.send(Completed { generation, result }).is_err() {
        log::debug!("scheduler dropped, discarding generation {generation}");
    }
}
