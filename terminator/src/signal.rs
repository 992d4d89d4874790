//! OS signal listening and the forced-exit backstop.
//!
//! [`SignalListener`] bridges OS termination requests (SIGTERM / SIGINT on
//! Unix, Ctrl+C on Windows) into a [`ShutdownCoordinator`] and enforces a
//! hard deadline on graceful shutdown: once an OS signal arrives, the
//! process exits with status [`FORCED_EXIT_CODE`] after the grace period,
//! whether or not workers have drained.

use std::time::Duration;

#[cfg(unix)]
use tokio::signal::unix::SignalKind;
#[cfg(unix)]
use tokio::signal::unix::signal;
use tokio_util::task::TaskTracker;

use crate::coordinator::ShutdownCoordinator;
use crate::error::Error;

/// Exit status used when the grace period elapses: 128 + SIGTERM(15).
pub const FORCED_EXIT_CODE: i32 = 143;

/// Listens for OS termination signals and arms the forced-exit timer.
#[allow(missing_debug_implementations)]
pub struct SignalListener {
    task_tracker: TaskTracker,
}

impl SignalListener {
    /// Registers OS signal handlers and spawns the background task racing
    /// them against a manual [`ShutdownCoordinator::stop`].
    ///
    /// On an OS signal the coordinator is stopped, the grace period is
    /// slept out in full, and the process exits with [`FORCED_EXIT_CODE`].
    /// If the coordinator is stopped manually first, the task exits without
    /// arming the timer. The race is evaluated once; the task does not
    /// re-arm after either branch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Signal`] if handler registration fails. Treat this
    /// as fatal to startup: the process would otherwise run with no
    /// shutdown guarantee.
    pub fn start(shutdown: ShutdownCoordinator, grace: Duration) -> Result<Self, Error> {
        Self::start_with_exit(shutdown, grace, |code| std::process::exit(code))
    }

    /// Like [`start`](Self::start), with an injectable exit function.
    ///
    /// Tests substitute a recording function for `std::process::exit`; the
    /// production path never needs this.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Signal`] if handler registration fails.
    #[allow(clippy::unnecessary_wraps)]
    pub fn start_with_exit<F>(
        shutdown: ShutdownCoordinator,
        grace: Duration,
        exit: F,
    ) -> Result<Self, Error>
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        let task_tracker = TaskTracker::new();
        let stopped = shutdown.stop_signal();

        #[cfg(unix)]
        {
            let mut sigterm = signal(SignalKind::terminate())?;
            let mut sigint = signal(SignalKind::interrupt())?;
            task_tracker.spawn(async move {
                tokio::select! {
                    _ = sigterm.recv() => {
                        force_exit_after(&shutdown, "SIGTERM", grace, exit).await;
                    },
                    _ = sigint.recv() => {
                        force_exit_after(&shutdown, "SIGINT", grace, exit).await;
                    },
                    () = stopped.cancelled() => {
                        tracing::debug!("stopped without an OS signal, forced exit disarmed");
                    }
                }
            });
        }

        #[cfg(windows)]
        {
            task_tracker.spawn(async move {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        force_exit_after(&shutdown, "Ctrl+C", grace, exit).await;
                    },
                    () = stopped.cancelled() => {
                        tracing::debug!("stopped without an OS signal, forced exit disarmed");
                    }
                }
            });
        }

        task_tracker.close();
        Ok(Self { task_tracker })
    }

    /// Waits for the background task to finish.
    ///
    /// Completes only on the manual-stop path; after an OS signal the task
    /// ends the process instead of returning.
    pub async fn join(&self) {
        self.task_tracker.wait().await;
    }
}

/// Stop the coordinator, sleep out the grace period, then exit.
///
/// The sleep is deliberately not raced against anything else: once a real
/// termination request starts the grace period, application code cannot
/// postpone the exit.
async fn force_exit_after<F>(
    shutdown: &ShutdownCoordinator,
    signal_name: &str,
    grace: Duration,
    exit: F,
) where
    F: Fn(i32),
{
    tracing::warn!(
        signal = signal_name,
        grace = ?grace,
        "termination requested, stopping workers"
    );
    shutdown.stop();
    tokio::time::sleep(grace).await;
    tracing::error!(code = FORCED_EXIT_CODE, "grace period elapsed, forcing exit");
    exit(FORCED_EXIT_CODE);
}
