//! Command-line flags.

use std::time::Duration;

use clap::Parser;

use crate::config::{parse_timeout, OutputFormat};

/// Health and metrics check for a Redis-compatible server.
///
/// Exit status follows monitoring-plugin conventions:
/// 0 OK, 1 WARNING, 2 CRITICAL, 3 UNKNOWN.
#[derive(Parser, Debug)]
#[command(name = "check_redis")]
#[command(version = crate::VERSION, about, long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Server host
    #[arg(short = 'h', long, env = "REDIS_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Server port
    #[arg(
        short = 'p',
        long,
        env = "REDIS_PORT",
        default_value_t = 6379,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub port: u16,

    /// Server password (AUTH is skipped when empty)
    #[arg(long, env = "REDIS_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Deadline for the whole check, in milliseconds (or with ms/s/m suffix)
    #[arg(long, env = "REDIS_TIMEOUT", default_value = "1000", value_parser = parse_timeout)]
    pub timeout: Duration,

    /// Metrics and thresholds: "name:warn:crit:gt|lt,..."
    /// (e.g. used_memory:1073741824:2147483648:gt,connected_slaves:1:0:lt)
    #[arg(long, env = "REDIS_METRICS", default_value = "")]
    pub metrics: String,

    /// Report format on stdout
    #[arg(long, value_enum, env = "CHECK_FORMAT", default_value = "text")]
    pub format: OutputFormat,

    /// Verbosity level on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print help
    #[arg(long, action = clap::ArgAction::Help)]
    pub help: Option<bool>,
}
