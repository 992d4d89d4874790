//! Unified error types for shutdown coordination.

use thiserror::Error;

/// Top-level error type for the crate.
///
/// Misuse of the coordination primitives (finishing unregistered work,
/// for example) is a programming error and panics instead of surfacing
/// here; this type only covers configuration and OS-level failures.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment value could not be read or parsed.
    #[error("config: {0}")]
    Config(String),

    /// OS signal handler registration failed.
    #[error("signal registration: {0}")]
    Signal(#[from] std::io::Error),
}
