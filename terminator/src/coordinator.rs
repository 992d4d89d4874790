//! Process-wide shutdown coordination.
//!
//! [`ShutdownCoordinator`] owns the two primitives every subsystem
//! coordinates through during shutdown: a one-shot broadcast stop signal and
//! a counted completion barrier. It is an explicit object passed by handle
//! rather than hidden global state, so tests can run independent shutdown
//! cycles side by side.

use tokio_util::sync::CancellationToken;

use crate::work::{WorkGroup, WorkGuard};

/// Coordinates graceful shutdown between a signal listener and workers.
///
/// Cloning is cheap; all clones coordinate through the same underlying
/// state. The stop signal transitions once from open to closed and never
/// back, and late observers see the closure immediately.
#[derive(Clone, Debug, Default)]
pub struct ShutdownCoordinator {
    stop: CancellationToken,
    work: WorkGroup,
}

impl ShutdownCoordinator {
    /// Creates a coordinator with the stop signal open and no work registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Closes the stop signal, waking every current and future observer.
    ///
    /// Idempotent: stopping an already-stopped coordinator is a no-op.
    pub fn stop(&self) {
        tracing::debug!("stop requested");
        self.stop.cancel();
    }

    /// Whether the stop signal has been closed.
    ///
    /// Non-blocking snapshot with no side effects; once it returns `true`
    /// it returns `true` forever.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stop.is_cancelled()
    }

    /// Returns an observation handle to the stop signal.
    ///
    /// The handle is a child token: it is cancelled when the coordinator
    /// stops, but cancelling the handle itself does not stop the
    /// coordinator. Handles taken after the signal closed observe the
    /// closure immediately, and any number of handles may be waited on
    /// concurrently.
    #[must_use]
    pub fn stop_signal(&self) -> CancellationToken {
        self.stop.child_token()
    }

    /// Waits until the stop signal is closed.
    pub async fn stopped(&self) {
        self.stop.cancelled().await;
    }

    /// Registers `n` units of in-flight work with the completion barrier.
    pub fn add_work(&self, n: usize) {
        self.work.add(n);
    }

    /// Marks one unit of in-flight work as finished.
    ///
    /// # Panics
    ///
    /// Panics if more work is finished than was registered.
    pub fn work_done(&self) {
        self.work.done();
    }

    /// Registers one unit of work, deregistered when the guard drops.
    #[must_use]
    pub fn track_work(&self) -> WorkGuard {
        self.work.track()
    }

    /// Number of registered work units still in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.work.in_flight()
    }

    /// Waits until all registered work has finished.
    ///
    /// The wait is unbounded; callers wanting a deadline should race it
    /// against a timer. Multiple concurrent waiters all unblock when the
    /// count reaches zero, and the barrier can be reused if work is
    /// registered again afterwards.
    pub async fn drain(&self) {
        self.work.wait().await;
        tracing::debug!("all registered work drained");
    }
}
