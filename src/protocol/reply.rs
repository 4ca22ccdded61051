//! Reply line parsing.

use super::error::{ProbeError, ProbeResult};

pub const ERROR_REPLY: u8 = b'-';
pub const STATUS_REPLY: u8 = b'+';
pub const INTEGER_REPLY: u8 = b':';
pub const BULK_REPLY: u8 = b'$';
pub const ARRAY_REPLY: u8 = b'*';

/// Header line of a server reply, line terminator stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Error(String),
    Status(String),
    Integer(i64),
    /// Bulk string header. `None` is the nil bulk (`$-1`).
    Bulk(Option<usize>),
    /// Array header. Never expected by the probe.
    Array(i64),
}

impl Reply {
    /// Parse one reply line (with or without its trailing `\r\n`).
    pub fn parse(line: &[u8]) -> ProbeResult<Self> {
        let line = line
            .strip_suffix(b"\n")
            .map(|l| l.strip_suffix(b"\r").unwrap_or(l))
            .unwrap_or(line);

        let (&marker, rest) = line
            .split_first()
            .ok_or_else(|| ProbeError::protocol("empty reply line"))?;
        let rest = String::from_utf8_lossy(rest);

        match marker {
            ERROR_REPLY => Ok(Reply::Error(rest.into_owned())),
            STATUS_REPLY => Ok(Reply::Status(rest.into_owned())),
            INTEGER_REPLY => parse_int(&rest).map(Reply::Integer),
            BULK_REPLY => {
                let len = parse_int(&rest)?;
                if len < 0 {
                    Ok(Reply::Bulk(None))
                } else {
                    usize::try_from(len)
                        .map(|n| Reply::Bulk(Some(n)))
                        .map_err(|_| ProbeError::protocol(format!("bulk length {} too large", len)))
                }
            }
            ARRAY_REPLY => parse_int(&rest).map(Reply::Array),
            other => Err(ProbeError::protocol(format!(
                "unknown reply marker '{}' in '{}'",
                other.escape_ascii(),
                excerpt(&rest)
            ))),
        }
    }

    /// Short description for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Reply::Error(_) => "error",
            Reply::Status(_) => "status",
            Reply::Integer(_) => "integer",
            Reply::Bulk(Some(_)) => "bulk string",
            Reply::Bulk(None) => "nil bulk string",
            Reply::Array(_) => "array",
        }
    }
}

/// Longest slice of peer text echoed into an error message.
const EXCERPT_LEN: usize = 32;

fn parse_int(text: &str) -> ProbeResult<i64> {
    text.trim()
        .parse()
        .map_err(|e| ProbeError::protocol(format!("invalid length '{}': {}", excerpt(text), e)))
}

fn excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_LEN) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
