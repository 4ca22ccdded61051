//! Threshold evaluation of metric rules against an `INFO` report.

use std::fmt;

use tracing::debug;

use super::info::InfoReport;
use super::rule::{parse_rules, Direction, RuleError, Threshold};
use crate::severity::{Severity, SeverityAccumulator};

/// One evaluated report line.
#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    /// The rule segment could not be parsed.
    Malformed { segment: String, error: RuleError },
    /// No report line carries the metric.
    Missing { name: String },
    /// The metric is present but its value is not a number.
    Unparsable { name: String, raw: String },
    /// The metric value was compared against the rule's thresholds.
    Measured {
        severity: Severity,
        name: String,
        value: f64,
        direction: Direction,
        warning: Threshold,
        critical: Threshold,
    },
}

impl Finding {
    pub fn severity(&self) -> Severity {
        match self {
            Finding::Measured { severity, .. } => *severity,
            _ => Severity::Unknown,
        }
    }

    /// Metric name, if the segment got far enough to have one.
    pub fn metric(&self) -> Option<&str> {
        match self {
            Finding::Malformed { .. } => None,
            Finding::Missing { name }
            | Finding::Unparsable { name, .. }
            | Finding::Measured { name, .. } => Some(name),
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Finding::Measured { value, .. } => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::Malformed { segment, .. } => {
                write!(f, "[Unknown]metrics parameter invalid ({})", segment)
            }
            Finding::Missing { name } => write!(f, "[Unknown]metrics {}", name),
            Finding::Unparsable { name, raw } => {
                write!(f, "[Unknown]{} value '{}' is not numeric", name, raw)
            }
            Finding::Measured {
                severity,
                name,
                value,
                direction,
                warning,
                critical,
            } => {
                write!(f, "[{}]{}:{:.1} {} ", severity.tag(), name, value, direction)?;
                match (warning.value(), critical.value()) {
                    (Some(w), Some(c)) => write!(f, "(warn{:.1} crit{:.1})", w, c),
                    (Some(w), None) => write!(f, "(warn{:.1})", w),
                    (None, Some(c)) => write!(f, "(crit{:.1})", c),
                    (None, None) => write!(f, "no threshold"),
                }
            }
        }
    }
}

/// Result of evaluating a rule string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub findings: Vec<Finding>,
    severity: SeverityAccumulator,
}

impl Evaluation {
    fn push(&mut self, finding: Finding) {
        self.severity.raise(finding.severity());
        self.findings.push(finding);
    }

    /// Worst severity across all findings.
    pub fn severity(&self) -> Severity {
        self.severity.current()
    }

    /// Report lines, each terminated by `\n`.
    pub fn render(&self) -> String {
        self.findings
            .iter()
            .map(|finding| format!("{}\n", finding))
            .collect()
    }
}

/// Grade a single metric value. Critical wins over warning.
fn grade(value: f64, direction: Direction, warning: Threshold, critical: Threshold) -> Severity {
    if critical.is_breached_by(value, direction) {
        Severity::Critical
    } else if warning.is_breached_by(value, direction) {
        Severity::Warning
    } else {
        Severity::Ok
    }
}

/// Evaluate every rule in `rules` against `report`.
///
/// Each rule is independent: a malformed or missing one yields an UNKNOWN
/// finding and evaluation moves on to the next.
pub fn evaluate(rules: &str, report: &InfoReport) -> Evaluation {
    let mut evaluation = Evaluation::default();

    for (segment, parsed) in parse_rules(rules) {
        let rule = match parsed {
            Ok(rule) => rule,
            Err(error) => {
                debug!(segment, %error, "Malformed metric rule");
                evaluation.push(Finding::Malformed {
                    segment: segment.to_string(),
                    error,
                });
                continue;
            }
        };

        let mut matched = false;
        for raw in report.values(&rule.name) {
            matched = true;
            let finding = match raw.parse::<f64>() {
                Ok(value) => Finding::Measured {
                    severity: grade(value, rule.direction, rule.warning, rule.critical),
                    name: rule.name.clone(),
                    value,
                    direction: rule.direction,
                    warning: rule.warning,
                    critical: rule.critical,
                },
                Err(_) => Finding::Unparsable {
                    name: rule.name.clone(),
                    raw: raw.to_string(),
                },
            };
            debug!(metric = %rule.name, severity = %finding.severity(), "Metric evaluated");
            evaluation.push(finding);
        }

        if !matched {
            debug!(metric = %rule.name, "Metric not present in report");
            evaluation.push(Finding::Missing { name: rule.name });
        }
    }

    evaluation
}
