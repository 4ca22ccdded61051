//! Fatal probe failures: every one ends in UNKNOWN with no metrics evaluated

use std::time::{Duration, Instant};

use check_redis::config::ConnectionParams;
use check_redis::protocol::MAX_REPLY_LINE;
use check_redis::{probe, ProbeConfig, Severity};

use crate::helpers::{bulk, closed_port, FakeServer};

#[tokio::test]
async fn test_connection_refused() {
    let addr = closed_port().await;
    let config = ProbeConfig::new(
        ConnectionParams::new("127.0.0.1", addr.port()).with_timeout(Duration::from_secs(2)),
    )
    .with_metrics("used_memory:1:2");

    let report = probe::run(&config).await;

    assert_eq!(report.severity(), Severity::Unknown);
    assert_eq!(report.connection().error, Some("connection"));
    assert!(report.evaluation().findings.is_empty());
    assert!(report.render_text().starts_with("[Unknown]connection to 127.0.0.1:"));
}

#[tokio::test]
async fn test_auth_failure_stops_before_info() {
    let server =
        FakeServer::start(vec![b"-WRONGPASS invalid username-password pair\r\n".to_vec()]).await;
    let mut config = server.config().with_metrics("used_memory:1:2");
    config.connection.password = "wrong".to_string();

    let report = probe::run(&config).await;

    assert_eq!(report.severity(), Severity::Unknown);
    assert_eq!(report.connection().error, Some("authentication"));
    assert_eq!(
        report.render_text(),
        "[Unknown]Authorization failed:WRONGPASS invalid username-password pair\n"
    );
    // Nothing after AUTH reached the server
    assert_eq!(server.received().await, vec!["AUTH \"wrong\""]);
}

#[tokio::test]
async fn test_info_error_reply() {
    let server = FakeServer::start(vec![b"-NOAUTH Authentication required.\r\n".to_vec()]).await;
    let report = probe::run(&server.config().with_metrics("used_memory")).await;

    assert_eq!(report.severity(), Severity::Unknown);
    assert_eq!(report.connection().error, Some("protocol"));
    assert!(report.render_text().contains("NOAUTH"));
}

#[tokio::test]
async fn test_truncated_body() {
    let mut reply = bulk(b"used_memory:1024\r\n");
    reply.truncate(10);
    let server = FakeServer::start_then_close(vec![reply]).await;

    let report = probe::run(&server.config()).await;

    assert_eq!(report.severity(), Severity::Unknown);
    assert_eq!(report.connection().error, Some("transport"));
}

#[tokio::test]
async fn test_silent_server_hits_deadline() {
    let server = FakeServer::silent().await;
    let config = ProbeConfig::new(server.params().with_timeout(Duration::from_millis(200)));

    let start = Instant::now();
    let report = probe::run(&config).await;

    assert!(start.elapsed() < Duration::from_secs(3));
    assert_eq!(report.severity(), Severity::Unknown);
    assert!(report.render_text().contains("deadline of 200ms exceeded"));

    // The probe dropped the connection, so the server sees INFO then EOF
    assert_eq!(server.received().await, vec!["INFO"]);
}

#[tokio::test]
async fn test_endless_header_line_is_bounded() {
    let flood = vec![b'$'; 4 * MAX_REPLY_LINE];
    let server = FakeServer::start(vec![flood]).await;

    let report = probe::run(&server.config()).await;

    assert_eq!(report.severity(), Severity::Unknown);
    assert_eq!(report.connection().error, Some("protocol"));
    assert_eq!(report.render_text(), "[Unknown]protocol error: reply line too long\n");
}
