//! Serializable report shapes for JSON output.

use serde::Serialize;

use crate::metrics::Finding;
use crate::severity::Severity;

/// Top-level JSON document.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    /// Aggregate status: "ok", "warning", "critical", "unknown"
    pub status: Severity,
    /// Process exit code for `status`
    pub exit_code: u8,
    /// Connection and authentication outcome
    pub connection: ConnectionCheck,
    /// One entry per finding, in evaluation order
    pub checks: Vec<CheckResult>,
}

/// Connection phase outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionCheck {
    /// "pass" or "fail"
    pub status: &'static str,
    /// Error class on failure ("connection", "authentication", ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    /// Report line shown in text output
    pub message: String,
}

impl ConnectionCheck {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            status: "pass",
            error: None,
            message: message.into(),
        }
    }

    pub fn fail(error: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: "fail",
            error: Some(error),
            message: message.into(),
        }
    }

    pub fn is_pass(&self) -> bool {
        self.status == "pass"
    }
}

/// Individual metric check result.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// Metric name (absent for malformed rules)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    /// Severity of this check
    pub status: Severity,
    /// Numeric value, when one was read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Report line shown in text output
    pub message: String,
}

impl From<&Finding> for CheckResult {
    fn from(finding: &Finding) -> Self {
        Self {
            metric: finding.metric().map(str::to_string),
            status: finding.severity(),
            value: finding.value(),
            message: finding.to_string(),
        }
    }
}
