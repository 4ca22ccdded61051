//! Monitoring-plugin severities and the raise-only accumulator.

use std::fmt;
use std::process::ExitCode;

use serde::Serialize;

/// Check severity, ordered from best to worst.
///
/// The discriminants are the exit codes a monitoring framework expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Ok = 0,
    Warning = 1,
    Critical = 2,
    Unknown = 3,
}

impl Severity {
    /// Combine two severities, keeping the worse one.
    #[inline]
    pub fn combine(self, other: Severity) -> Severity {
        self.max(other)
    }

    /// Process exit code for this severity.
    #[inline]
    pub fn exit_code(self) -> u8 {
        self as u8
    }

    /// Short tag used in report lines (`[OK]`, `[WARN]`, ...).
    pub fn tag(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARN",
            Severity::Critical => "CRIT",
            Severity::Unknown => "Unknown",
        }
    }

    /// Lowercase label used in JSON output and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Ok => "ok",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
            Severity::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Severity> for ExitCode {
    fn from(severity: Severity) -> Self {
        ExitCode::from(severity.exit_code())
    }
}

/// Worst severity observed so far during one probe run.
///
/// Starts at [`Severity::Ok`] and can only be raised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityAccumulator {
    current: Severity,
}

impl SeverityAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise to `severity` if it is worse than the current value.
    #[inline]
    pub fn raise(&mut self, severity: Severity) {
        self.current = self.current.combine(severity);
    }

    #[inline]
    pub fn current(&self) -> Severity {
        self.current
    }
}
