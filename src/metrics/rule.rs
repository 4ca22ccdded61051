//! Metric rule grammar.
//!
//! A rule string is a comma-separated list of segments, each of the form
//!
//! ```text
//! name[:warn[:crit[:direction]]]
//! ```
//!
//! `warn` and `crit` are optional floating-point thresholds (empty means
//! unset). `direction` is `lt` for "breach when below"; any other token,
//! including an empty one, means `gt`.

use std::fmt;

use serde::Serialize;

/// Maximum number of colon-separated fields in one segment.
const MAX_FIELDS: usize = 4;

/// Comparison direction for threshold checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Direction {
    /// Breach when the value exceeds the threshold.
    #[default]
    #[serde(rename = "gt")]
    GreaterThan,
    /// Breach when the value falls below the threshold.
    #[serde(rename = "lt")]
    LessThan,
}

impl Direction {
    /// Parse a direction token. Unrecognized tokens fall back to `gt`.
    pub fn parse(token: &str) -> Self {
        if token == "lt" {
            Direction::LessThan
        } else {
            Direction::GreaterThan
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::GreaterThan => "gt",
            Direction::LessThan => "lt",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional numeric bound.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Threshold(pub Option<f64>);

impl Threshold {
    pub const UNSET: Threshold = Threshold(None);

    pub fn new(value: f64) -> Self {
        Self(Some(value))
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    #[inline]
    pub fn value(&self) -> Option<f64> {
        self.0
    }

    /// True when the threshold is set and `value` is past it in `direction`.
    pub fn is_breached_by(&self, value: f64, direction: Direction) -> bool {
        match (self.0, direction) {
            (Some(limit), Direction::GreaterThan) => value > limit,
            (Some(limit), Direction::LessThan) => value < limit,
            (None, _) => false,
        }
    }

    fn parse(field: &'static str, text: &str) -> Result<Self, RuleError> {
        if text.is_empty() {
            return Ok(Threshold::UNSET);
        }
        text.parse::<f64>()
            .map(Threshold::new)
            .map_err(|e| RuleError::InvalidThreshold {
                field,
                value: text.to_string(),
                error: e.to_string(),
            })
    }
}

/// Why a rule segment could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleError {
    /// The metric name field is empty.
    EmptyName,
    /// A threshold field is present but not a number.
    InvalidThreshold {
        field: &'static str,
        value: String,
        error: String,
    },
    /// More than `name:warn:crit:direction`.
    TooManyFields(usize),
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleError::EmptyName => write!(f, "empty metric name"),
            RuleError::InvalidThreshold { field, value, error } => {
                write!(f, "invalid {} threshold '{}': {}", field, value, error)
            }
            RuleError::TooManyFields(n) => {
                write!(f, "expected at most {} fields, got {}", MAX_FIELDS, n)
            }
        }
    }
}

impl std::error::Error for RuleError {}

/// One parsed metric rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub name: String,
    pub warning: Threshold,
    pub critical: Threshold,
    pub direction: Direction,
}

impl Rule {
    /// Parse a single rule segment.
    pub fn parse(segment: &str) -> Result<Self, RuleError> {
        let fields: Vec<&str> = segment.split(':').collect();
        if fields.len() > MAX_FIELDS {
            return Err(RuleError::TooManyFields(fields.len()));
        }

        let name = fields[0];
        if name.is_empty() {
            return Err(RuleError::EmptyName);
        }

        let field = |i: usize| fields.get(i).copied().unwrap_or("");

        Ok(Self {
            name: name.to_string(),
            warning: Threshold::parse("warning", field(1))?,
            critical: Threshold::parse("critical", field(2))?,
            direction: Direction::parse(field(3)),
        })
    }
}

/// Split a rule string into segments, parsing each independently.
///
/// Yields the raw segment alongside its parse result so malformed segments
/// can be reported verbatim.
pub fn parse_rules(spec: &str) -> impl Iterator<Item = (&str, Result<Rule, RuleError>)> {
    spec.split(',').map(|segment| (segment, Rule::parse(segment)))
}
