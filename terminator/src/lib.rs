//! Graceful shutdown coordination with a bounded grace period.
//!
//! Listens for OS termination requests (SIGTERM / SIGINT on Unix, Ctrl+C on
//! Windows), broadcasts a cancellation signal to application workers, gives
//! them a configurable grace period to finish in-flight work, and force-exits
//! the process with status 143 if they do not finish in time.
//!
//! Two components cooperate:
//!
//! - [`ShutdownCoordinator`] owns the broadcast stop signal and the counted
//!   completion barrier that workers register in-flight work with.
//! - [`SignalListener`] bridges OS signals into the coordinator and arms the
//!   forced-exit timer.
//!
//! ```no_run
//! use terminator::{ShutdownConfig, ShutdownCoordinator, SignalListener};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), terminator::Error> {
//!     let config = ShutdownConfig::from_env()?;
//!     let shutdown = ShutdownCoordinator::new();
//!     let _listener = SignalListener::start(shutdown.clone(), config.grace_timeout)?;
//!
//!     // Workers observe the stop signal and report completion.
//!     let stop = shutdown.stop_signal();
//!     let work = shutdown.track_work();
//!     tokio::spawn(async move {
//!         stop.cancelled().await;
//!         drop(work);
//!     });
//!
//!     shutdown.stopped().await;
//!     shutdown.drain().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod signal;
pub mod work;

pub use config::{ShutdownConfig, load_config};
pub use coordinator::ShutdownCoordinator;
pub use error::Error;
pub use signal::{FORCED_EXIT_CODE, SignalListener};
pub use work::{WorkGroup, WorkGuard};
