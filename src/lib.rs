//! check_redis - monitoring-plugin probe for Redis-compatible servers.
//!
//! A short-lived check meant to be run by a monitoring scheduler. It opens
//! one connection, optionally authenticates, fetches `INFO`, grades selected
//! metrics against warning/critical thresholds and reports the worst
//! severity as its exit code.
//!
//! # Architecture
//!
//! ```text
//! Cli/env ──▶ ProbeConfig ──▶ protocol::fetch_info ──▶ InfoReport
//!                                                          │
//!                    exit code ◀── ProbeReport ◀── metrics::evaluate
//! ```
//!
//! - [`protocol`] - `AUTH` + `INFO` exchange with bounded bulk reads
//! - [`metrics`] - rule grammar and threshold evaluation
//! - [`severity`] - ordered severities and the raise-only accumulator
//! - [`report`] - text and JSON rendering
//!
//! # Example
//!
//! ```rust,ignore
//! use check_redis::config::{ConnectionParams, ProbeConfig};
//!
//! let config = ProbeConfig::new(ConnectionParams::new("127.0.0.1", 6379))
//!     .with_metrics("used_memory:1073741824:2147483648:gt");
//! let report = check_redis::probe::run(&config).await;
//! print!("{}", report.render_text());
//! std::process::exit(report.severity().exit_code().into());
//! ```

/// Version string: "0.1.0 (abc12345)" from a git checkout, "0.1.0" otherwise
pub const VERSION: &str = env!("CHECK_REDIS_VERSION");

pub mod cli;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod probe;
pub mod protocol;
pub mod report;
pub mod severity;

// Re-exports for convenience
pub use config::ProbeConfig;
pub use report::ProbeReport;
pub use severity::Severity;
