//! Environment variable and value parsing utilities.

use std::str::FromStr;
use std::time::Duration;

use super::ConfigError;

/// Get environment variable with default value.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse environment variable with type conversion.
pub fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(v) if !v.is_empty() => v.parse().map_err(|e: T::Err| ConfigError::Parse {
            key: key.into(),
            value: v,
            error: e.to_string(),
        }),
        _ => Ok(default),
    }
}

/// Parse a timeout (e.g., "1000", "250ms", "2s", "1m").
///
/// A bare number is milliseconds. Zero is rejected: the probe needs a
/// deadline.
pub fn parse_timeout(s: &str) -> Result<Duration, String> {
    let s = s.trim().to_lowercase();

    let (num_str, millis_per_unit) = if let Some(n) = s.strip_suffix("ms") {
        (n, 1)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1_000)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60_000)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid timeout: {}", s))?;

    if num == 0 {
        return Err("timeout must be greater than zero".to_string());
    }

    num.checked_mul(millis_per_unit)
        .map(Duration::from_millis)
        .ok_or_else(|| format!("timeout too large: {}", s))
}
