//! Probe configuration.
//!
//! Flags come from [`Cli`](crate::cli::Cli) (each with an environment
//! fallback); logging settings come from the environment only.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use check_redis::config::{ConnectionParams, ProbeConfig};
//!
//! let config = ProbeConfig::new(
//!     ConnectionParams::new("127.0.0.1", 6379).with_timeout(Duration::from_millis(500)),
//! )
//! .with_metrics("used_memory:1073741824:2147483648:gt");
//! assert_eq!(config.connection.address(), "127.0.0.1:6379");
//! ```

mod connection;
mod error;
mod logging;
mod parse;

pub use connection::ConnectionParams;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use parse::parse_timeout;

use crate::cli::Cli;

/// Report format on stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Monitoring-plugin text lines
    #[default]
    Text,
    /// Single JSON document
    Json,
}

/// Complete probe configuration.
#[derive(Clone, Debug)]
pub struct ProbeConfig {
    /// Connection configuration.
    pub connection: ConnectionParams,
    /// Metric rule string; empty means connection check only.
    pub metrics: String,
    /// Report format.
    pub format: OutputFormat,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl ProbeConfig {
    pub fn new(connection: ConnectionParams) -> Self {
        Self {
            connection,
            metrics: String::new(),
            format: OutputFormat::default(),
            logging: LoggingConfig::default(),
        }
    }

    pub fn with_metrics(mut self, metrics: impl Into<String>) -> Self {
        self.metrics = metrics.into();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Build and validate configuration from parsed flags and the environment.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let connection = ConnectionParams::new(cli.host, cli.port)
            .with_password(cli.password)
            .with_timeout(cli.timeout);
        connection.validate()?;

        Ok(Self {
            connection,
            metrics: cli.metrics,
            format: cli.format,
            logging: LoggingConfig::from_env(cli.verbose)?,
        })
    }

    /// Print configuration summary to log.
    pub fn log_summary(&self) {
        use tracing::debug;

        debug!("Configuration loaded:");
        debug!("  Target: {}", self.connection.address());
        debug!("  Timeout: {}ms", self.connection.timeout.as_millis());

        if self.connection.password.is_empty() {
            debug!("  Auth: disabled");
        } else {
            debug!("  Auth: enabled");
        }

        if self.metrics.is_empty() {
            debug!("  Metrics: none (connection check only)");
        } else {
            debug!("  Metrics: {}", self.metrics);
        }

        debug!("  Format: {:?}", self.format);
    }
}
