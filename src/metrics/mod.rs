//! Metric rules and threshold evaluation.
//!
//! ```rust
//! use check_redis::metrics::{evaluate, InfoReport};
//! use check_redis::Severity;
//!
//! let info = InfoReport::new("used_memory:2000000000\r\n");
//! let eval = evaluate("used_memory:1073741824:2147483648:gt", &info);
//! assert_eq!(eval.severity(), Severity::Warning);
//! ```

mod evaluator;
mod info;
mod rule;

pub use evaluator::{evaluate, Evaluation, Finding};
pub use info::InfoReport;
pub use rule::{parse_rules, Direction, Rule, RuleError, Threshold};
