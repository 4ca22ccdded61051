//! Test helpers and utilities

use std::net::SocketAddr;
use std::time::Duration;

use check_redis::config::{ConnectionParams, ProbeConfig};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Encode a bulk string reply.
pub fn bulk(body: &[u8]) -> Vec<u8> {
    let mut reply = format!("${}\r\n", body.len()).into_bytes();
    reply.extend_from_slice(body);
    reply.extend_from_slice(b"\r\n");
    reply
}

/// What the fake server does once its script is exhausted.
#[derive(Clone, Copy, PartialEq, Eq)]
enum AfterScript {
    /// Keep reading (and recording commands) until the client hangs up.
    Drain,
    /// Close the connection immediately.
    Close,
}

/// Single-connection scripted server on 127.0.0.1.
///
/// For each script entry the server reads one command line and writes the
/// canned reply. Every command line received is recorded.
pub struct FakeServer {
    addr: SocketAddr,
    handle: JoinHandle<Vec<String>>,
}

#[allow(dead_code)]
impl FakeServer {
    /// Reply to each command in turn, then wait for the client to hang up.
    pub async fn start(script: Vec<Vec<u8>>) -> Self {
        Self::spawn(script, AfterScript::Drain).await
    }

    /// Reply to each command in turn, then close the socket.
    pub async fn start_then_close(script: Vec<Vec<u8>>) -> Self {
        Self::spawn(script, AfterScript::Close).await
    }

    /// Accept and read, but never answer.
    pub async fn silent() -> Self {
        Self::spawn(Vec::new(), AfterScript::Drain).await
    }

    async fn spawn(script: Vec<Vec<u8>>, after: AfterScript) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake server");
        let addr = listener.local_addr().expect("Failed to get local addr");

        let handle = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("Accept failed");
            let mut stream = BufReader::new(stream);
            let mut received = Vec::new();

            for reply in script {
                let mut line = String::new();
                match stream.read_line(&mut line).await {
                    Ok(0) | Err(_) => return received,
                    Ok(_) => received.push(line.trim_end().to_string()),
                }
                if stream.get_mut().write_all(&reply).await.is_err() {
                    return received;
                }
            }

            if after == AfterScript::Drain {
                let mut rest = Vec::new();
                let _ = stream.read_to_end(&mut rest).await;
                received.extend(
                    String::from_utf8_lossy(&rest)
                        .lines()
                        .filter(|l| !l.is_empty())
                        .map(str::to_string),
                );
            }

            received
        });

        Self { addr, handle }
    }

    pub fn params(&self) -> ConnectionParams {
        ConnectionParams::new(self.addr.ip().to_string(), self.addr.port())
            .with_timeout(Duration::from_secs(5))
    }

    pub fn config(&self) -> ProbeConfig {
        ProbeConfig::new(self.params())
    }

    /// Commands the server received, in order.
    pub async fn received(self) -> Vec<String> {
        self.handle.await.expect("Fake server panicked")
    }
}

/// An address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    listener.local_addr().expect("Failed to get local addr")
}
