//! Minimal client for the `AUTH` + `INFO` exchange.

use std::time::Duration;

use tokio::io::{
    AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tokio::net::TcpStream;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};

use super::bulk::read_bulk;
use super::error::{ProbeError, ProbeResult};
use super::reply::Reply;
use crate::config::ConnectionParams;
use crate::metrics::InfoReport;

/// Line terminator for commands and replies.
pub const CRLF: &[u8] = b"\r\n";

/// Largest bulk reply the client accepts (server-side default limit, 512 MiB).
pub const MAX_BULK_LEN: usize = 512 * 1024 * 1024;

/// Longest reply header line, terminator included.
pub const MAX_REPLY_LINE: usize = 64 * 1024;

/// Encode `AUTH "<password>"` as an inline command.
pub fn auth_command(password: &str) -> Vec<u8> {
    let mut cmd = Vec::with_capacity(password.len() + 10);
    cmd.extend_from_slice(b"AUTH \"");
    for &b in password.as_bytes() {
        if b == b'"' || b == b'\\' {
            cmd.push(b'\\');
        }
        cmd.push(b);
    }
    cmd.push(b'"');
    cmd.extend_from_slice(CRLF);
    cmd
}

/// Encode `INFO`.
pub fn info_command() -> Vec<u8> {
    let mut cmd = b"INFO".to_vec();
    cmd.extend_from_slice(CRLF);
    cmd
}

/// One probe connection.
///
/// [`Client::fetch_report`] consumes the client, so the connection is closed
/// once the report has been read or the exchange failed.
pub struct Client<S = TcpStream> {
    stream: BufReader<S>,
}

impl Client<TcpStream> {
    /// Open a TCP connection, failing if `deadline` passes first.
    pub async fn connect(params: &ConnectionParams, deadline: Instant) -> ProbeResult<Self> {
        let addr = params.address();
        debug!(addr = %addr, "Connecting");

        let connect = TcpStream::connect((params.host.as_str(), params.port));
        let stream = match timeout_at(deadline, connect).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => return Err(ProbeError::Connect { addr, source }),
            Err(_) => {
                return Err(ProbeError::ConnectTimeout {
                    addr,
                    timeout: params.timeout,
                })
            }
        };

        if let Err(e) = stream.set_nodelay(true) {
            warn!(error = %e, "Failed to set TCP_NODELAY");
        }

        Ok(Self::from_stream(stream))
    }
}

impl<S> Client<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap an already-established stream.
    pub fn from_stream(stream: S) -> Self {
        Self {
            stream: BufReader::new(stream),
        }
    }

    /// Authenticate, then fetch the report.
    ///
    /// An empty password skips `AUTH`.
    pub async fn exchange(mut self, password: &str) -> ProbeResult<InfoReport> {
        if !password.is_empty() {
            self.authenticate(password).await?;
        }
        self.fetch_report().await
    }

    /// Send `AUTH` and check the reply is not an error.
    pub async fn authenticate(&mut self, password: &str) -> ProbeResult<()> {
        self.send(&auth_command(password)).await?;

        match self.read_reply().await? {
            Reply::Error(msg) => Err(ProbeError::Auth(msg)),
            reply => {
                debug!(reply = reply.describe(), "Authenticated");
                Ok(())
            }
        }
    }

    /// Send `INFO` and read the bulk reply body.
    pub async fn fetch_report(mut self) -> ProbeResult<InfoReport> {
        self.send(&info_command()).await?;

        let len = match self.read_reply().await? {
            Reply::Error(msg) => return Err(ProbeError::Protocol(msg)),
            Reply::Bulk(Some(len)) => len,
            other => {
                return Err(ProbeError::protocol(format!(
                    "expected bulk string reply to INFO, got {}",
                    other.describe()
                )))
            }
        };

        if len > MAX_BULK_LEN {
            return Err(ProbeError::protocol(format!(
                "bulk length {} exceeds limit of {} bytes",
                len, MAX_BULK_LEN
            )));
        }

        debug!(len, "Reading INFO body");
        let body = read_bulk(&mut self.stream, len).await?;

        let mut terminator = [0u8; 2];
        self.stream.read_exact(&mut terminator).await?;
        if terminator != CRLF {
            return Err(ProbeError::protocol("bulk string not terminated by CRLF"));
        }

        Ok(InfoReport::from_bytes(&body))
    }

    async fn send(&mut self, cmd: &[u8]) -> ProbeResult<()> {
        let stream = self.stream.get_mut();
        stream.write_all(cmd).await?;
        stream.flush().await?;
        Ok(())
    }

    async fn read_reply(&mut self) -> ProbeResult<Reply> {
        let mut line = Vec::new();
        let n = (&mut self.stream)
            .take(MAX_REPLY_LINE as u64)
            .read_until(b'\n', &mut line)
            .await?;
        if n == 0 {
            return Err(ProbeError::Transport(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "connection closed before reply",
            )));
        }
        if n == MAX_REPLY_LINE && line.last() != Some(&b'\n') {
            return Err(ProbeError::protocol("reply line too long"));
        }
        Reply::parse(&line)
    }
}

/// Run the whole probe exchange under a single deadline.
///
/// The deadline starts now and covers connect, `AUTH` and `INFO`.
pub async fn fetch_info(params: &ConnectionParams) -> ProbeResult<InfoReport> {
    let deadline = Instant::now() + params.timeout;
    let client = Client::connect(params, deadline).await?;
    with_deadline(deadline, params.timeout, client.exchange(&params.password)).await
}

async fn with_deadline<F>(deadline: Instant, timeout: Duration, fut: F) -> ProbeResult<InfoReport>
where
    F: std::future::Future<Output = ProbeResult<InfoReport>>,
{
    match timeout_at(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(ProbeError::Deadline(timeout)),
    }
}
