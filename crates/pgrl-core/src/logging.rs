//! Logger construction for PGRL
//!
//! `init_tracing` installs the process-wide subscriber once; `get_logger`
//! hands out named handles that tag every event with a `logger` field.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::{fmt::time::ChronoLocal, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{PgrlError, Result};

/// Timestamp layout used by the plain-text formatter
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Filter directive applied when `RUST_LOG` is not set.
    ///
    /// Targets match by prefix, so `pgrl` covers the `pgrl` binary as well as
    /// `pgrl_core` and `pgrl_rl`.
    pub fn default_directives(&self) -> String {
        format!("pgrl={}", self.level)
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over the configured level. Calling this more
/// than once keeps the first subscriber and returns `Ok(())`.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => tracing_subscriber::EnvFilter::try_new(config.default_directives())
            .map_err(|e| PgrlError::Config(format!("invalid log level '{}': {e}", config.level)))?,
    };

    let json_layer = config
        .json
        .then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(std::io::stderr)
        });
    let plain_layer = (!config.json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
            .with_writer(std::io::stderr)
    });

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(plain_layer)
        .try_init()
        .is_ok();

    if !installed {
        tracing::debug!("Tracing subscriber already installed, keeping existing one");
    }

    Ok(())
}

/// Named logging handle
#[derive(Debug, Clone)]
pub struct Logger {
    name: String,
}

/// Get a logger tagged with `name`
pub fn get_logger(name: &str) -> Logger {
    Logger {
        name: name.to_string(),
    }
}

impl Logger {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Emit `message` at `level`
    pub fn log(&self, level: Level, message: impl Display) {
        match level {
            Level::TRACE => tracing::trace!(logger = %self.name, "{message}"),
            Level::DEBUG => tracing::debug!(logger = %self.name, "{message}"),
            Level::INFO => tracing::info!(logger = %self.name, "{message}"),
            Level::WARN => tracing::warn!(logger = %self.name, "{message}"),
            Level::ERROR => tracing::error!(logger = %self.name, "{message}"),
        }
    }

    pub fn debug(&self, message: impl Display) {
        self.log(Level::DEBUG, message);
    }

    pub fn info(&self, message: impl Display) {
        self.log(Level::INFO, message);
    }

    pub fn warn(&self, message: impl Display) {
        self.log(Level::WARN, message);
    }

    pub fn error(&self, message: impl Display) {
        self.log(Level::ERROR, message);
    }
}
