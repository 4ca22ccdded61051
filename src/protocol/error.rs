//! Probe error types.

use std::fmt;
use std::io;
use std::time::Duration;

/// Fatal errors of the connect/auth/fetch exchange.
#[derive(Debug)]
pub enum ProbeError {
    /// The server refused the connection or is unreachable.
    Connect { addr: String, source: io::Error },

    /// The connection was not established before the deadline.
    ConnectTimeout { addr: String, timeout: Duration },

    /// The server rejected the password.
    Auth(String),

    /// The server answered with an error or an unexpected reply.
    Protocol(String),

    /// Read or write failure mid-exchange, including short reads.
    Transport(io::Error),

    /// The exchange did not finish before the deadline.
    Deadline(Duration),
}

impl ProbeError {
    /// Stable label for logs and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::Connect { .. } | ProbeError::ConnectTimeout { .. } => "connection",
            ProbeError::Auth(_) => "authentication",
            ProbeError::Protocol(_) => "protocol",
            ProbeError::Transport(_) | ProbeError::Deadline(_) => "transport",
        }
    }

    /// Check if this is a connect-phase error.
    pub fn is_connection(&self) -> bool {
        self.kind() == "connection"
    }

    pub(crate) fn protocol(message: impl Into<String>) -> Self {
        ProbeError::Protocol(message.into())
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::Connect { addr, source } => {
                write!(f, "connection to {} failed: {}", addr, source)
            }
            ProbeError::ConnectTimeout { addr, timeout } => {
                write!(
                    f,
                    "connection to {} timed out after {}ms",
                    addr,
                    timeout.as_millis()
                )
            }
            ProbeError::Auth(msg) => write!(f, "Authorization failed:{}", msg),
            ProbeError::Protocol(msg) => write!(f, "protocol error: {}", msg),
            ProbeError::Transport(e) => write!(f, "transport error: {}", e),
            ProbeError::Deadline(timeout) => {
                write!(f, "probe deadline of {}ms exceeded", timeout.as_millis())
            }
        }
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProbeError::Connect { source, .. } => Some(source),
            ProbeError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ProbeError {
    fn from(e: io::Error) -> Self {
        ProbeError::Transport(e)
    }
}

/// Result type alias for probe operations.
pub type ProbeResult<T> = Result<T, ProbeError>;
