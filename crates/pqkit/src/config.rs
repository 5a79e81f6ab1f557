//! Runtime configuration.

use tracing_subscriber::EnvFilter;

/// Log level used when neither `RUST_LOG` nor `--log-level` is given.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Process-wide settings taken from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Fallback filter directive (trace, debug, info, warn, error)
    pub log_level: String,
}

impl RuntimeConfig {
    /// Log filter: `RUST_LOG` if set and valid, else [`Self::log_level`].
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level))
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { log_level: DEFAULT_LOG_LEVEL.to_string() }
    }
}
