//! Probe report: what gets printed and which exit code follows.
//!
//! Text output is the monitoring-plugin format, one line per entry:
//!
//! ```text
//! [OK]Connection and Authorization Ok
//! [WARN]used_memory:2000000000.0 gt (warn1073741824.0 crit2147483648.0)
//! [Unknown]metrics evicted_keyz
//! ```

mod status;

pub use status::{CheckResult, ConnectionCheck, ReportDocument};

use crate::config::OutputFormat;
use crate::metrics::Evaluation;
use crate::protocol::ProbeError;
use crate::severity::{Severity, SeverityAccumulator};

/// Connection line for a successful exchange.
pub const CONNECTION_OK: &str = "[OK]Connection and Authorization Ok";

/// Outcome of one probe run.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    connection: ConnectionCheck,
    evaluation: Evaluation,
    severity: SeverityAccumulator,
}

impl ProbeReport {
    /// Report for a run whose exchange failed; no metrics are evaluated.
    pub fn failed(error: &ProbeError) -> Self {
        let mut severity = SeverityAccumulator::new();
        severity.raise(Severity::Unknown);
        Self {
            connection: ConnectionCheck::fail(error.kind(), format!("[Unknown]{}", error)),
            evaluation: Evaluation::default(),
            severity,
        }
    }

    /// Report for a run that fetched the report and evaluated `evaluation`.
    pub fn connected(evaluation: Evaluation) -> Self {
        let mut severity = SeverityAccumulator::new();
        severity.raise(Severity::Ok);
        severity.raise(evaluation.severity());
        Self {
            connection: ConnectionCheck::pass(CONNECTION_OK),
            evaluation,
            severity,
        }
    }

    /// Aggregate severity over the connection phase and every finding.
    pub fn severity(&self) -> Severity {
        self.severity.current()
    }

    pub fn connection(&self) -> &ConnectionCheck {
        &self.connection
    }

    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    /// Text report, each line `\n`-terminated.
    pub fn render_text(&self) -> String {
        let mut out = String::with_capacity(64 * (self.evaluation.findings.len() + 1));
        out.push_str(&self.connection.message);
        out.push('\n');
        out.push_str(&self.evaluation.render());
        out
    }

    pub fn document(&self) -> ReportDocument {
        let status = self.severity();
        ReportDocument {
            status,
            exit_code: status.exit_code(),
            connection: self.connection.clone(),
            checks: self
                .evaluation
                .findings
                .iter()
                .map(CheckResult::from)
                .collect(),
        }
    }

    /// JSON report followed by a newline.
    pub fn render_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.document()).map(|mut s| {
            s.push('\n');
            s
        })
    }

    /// Render in the requested format. Falls back to text if JSON
    /// serialization fails.
    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => self.render_text(),
            OutputFormat::Json => self.render_json().unwrap_or_else(|e| {
                tracing::error!(error = %e, "Failed to serialize JSON report");
                self.render_text()
            }),
        }
    }
}
