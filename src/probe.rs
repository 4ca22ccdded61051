//! One probe run: fetch `INFO`, evaluate metrics, build the report.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::ProbeConfig;
use crate::metrics::{evaluate, Evaluation};
use crate::protocol::fetch_info;
use crate::report::ProbeReport;

/// Run the probe described by `config`.
///
/// Never fails: exchange errors become an UNKNOWN report so the caller
/// always has something to print and an exit code.
pub async fn run(config: &ProbeConfig) -> ProbeReport {
    let start = Instant::now();
    let addr = config.connection.address();

    let info = match fetch_info(&config.connection).await {
        Ok(info) => info,
        Err(e) => {
            warn!(
                target_addr = %addr,
                kind = e.kind(),
                error = %e,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Probe failed"
            );
            return ProbeReport::failed(&e);
        }
    };

    debug!(bytes = info.len(), "Received INFO report");

    let evaluation = if config.metrics.is_empty() {
        Evaluation::default()
    } else {
        evaluate(&config.metrics, &info)
    };

    let report = ProbeReport::connected(evaluation);
    info!(
        target_addr = %addr,
        status = %report.severity(),
        findings = report.evaluation().findings.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Probe finished"
    );
    report
}
