//! Grace-timeout configuration.
//!
//! This module provides:
//!
//! - [`ShutdownConfig`] — the single tunable of the crate: how long workers
//!   get between an OS termination request and the forced process exit.
//! - [`load_config`] — reads and parses a TOML configuration file.
//! - [`generate_default_config`] — produces a commented TOML template.
//!
//! # Configuration File Format
//!
//! ```toml
//! grace_timeout = "30s"
//! ```

use std::env;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Environment variable overriding [`ShutdownConfig::grace_timeout`].
pub const GRACE_TIMEOUT_ENV: &str = "SHUTDOWN_GRACE_TIMEOUT";

const DEFAULT_GRACE_TIMEOUT: Duration = Duration::from_secs(30);

/// Shutdown tuning, read once when the termination path is entered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShutdownConfig {
    /// Grace period between the termination request and the forced exit.
    #[serde(default = "default_grace_timeout", with = "humantime_serde")]
    pub grace_timeout: Duration,
}

const fn default_grace_timeout() -> Duration {
    DEFAULT_GRACE_TIMEOUT
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            grace_timeout: DEFAULT_GRACE_TIMEOUT,
        }
    }
}

impl ShutdownConfig {
    /// Builds a configuration from the environment.
    ///
    /// Reads [`GRACE_TIMEOUT_ENV`] in humantime syntax (`"30s"`, `"1m"`);
    /// falls back to the 30 second default when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is set but not a valid duration.
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Self::default();
        if let Ok(raw) = env::var(GRACE_TIMEOUT_ENV) {
            config.grace_timeout = parse_grace_timeout(&raw)?;
        }
        Ok(config)
    }
}

fn parse_grace_timeout(raw: &str) -> Result<Duration, Error> {
    humantime::parse_duration(raw)
        .map_err(|e| Error::Config(format!("invalid {GRACE_TIMEOUT_ENV} '{raw}': {e}")))
}

/// TOML file contents; absence of a value falls through to the environment.
#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default, with = "humantime_serde")]
    grace_timeout: Option<Duration>,
}

/// Load configuration from a TOML file at the given path.
///
/// Values not present in the file fall back to the environment
/// ([`GRACE_TIMEOUT_ENV`]) and then to the 30 second default.
///
/// # Errors
///
/// Returns an error if the file cannot be resolved, read, or parsed.
pub fn load_config(path: &Path) -> Result<ShutdownConfig, Error> {
    let config_path = path.canonicalize().map_err(|e| {
        Error::Config(format!(
            "failed to resolve config path '{}': {e}",
            path.display()
        ))
    })?;
    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        Error::Config(format!(
            "failed to read config file '{}': {e}",
            config_path.display()
        ))
    })?;
    let file: FileConfig = toml::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "failed to parse TOML config '{}': {e}",
            config_path.display()
        ))
    })?;
    match file.grace_timeout {
        Some(grace_timeout) => Ok(ShutdownConfig { grace_timeout }),
        None => ShutdownConfig::from_env(),
    }
}

/// Generate a default TOML configuration template.
#[must_use]
pub fn generate_default_config() -> String {
    String::from(
        r#"# Graceful shutdown configuration.

# Grace period between an OS termination request (SIGTERM / SIGINT) and
# the forced process exit. Humantime syntax: "30s", "1m", "500ms".
# Can also be set via the SHUTDOWN_GRACE_TIMEOUT environment variable.
grace_timeout = "30s"
"#,
    )
}
