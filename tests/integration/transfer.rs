//! Bulk reply sizes around the buffer growth boundaries

use check_redis::protocol::{fetch_info, INITIAL_BUFFER_SIZE, MAX_GROWTH_STEP};
use check_redis::{probe, Severity};

use crate::helpers::{bulk, FakeServer};

/// INFO-like body of at least `min_len` bytes, with `used_memory` last.
fn padded_info(min_len: usize) -> String {
    let mut body = String::with_capacity(min_len + 64);
    let mut i = 0usize;
    while body.len() < min_len {
        body.push_str(&format!("filler_metric_{}:{}\r\n", i, i));
        i += 1;
    }
    body.push_str("used_memory:3000000000\r\n");
    body
}

#[tokio::test]
async fn test_body_just_above_initial_buffer() {
    let body = padded_info(INITIAL_BUFFER_SIZE + 1);
    assert!(body.len() > INITIAL_BUFFER_SIZE);

    let server = FakeServer::start(vec![bulk(body.as_bytes())]).await;
    let info = fetch_info(&server.params()).await.unwrap();

    assert_eq!(info.as_str(), body);
}

#[tokio::test]
async fn test_body_spanning_several_growth_steps() {
    let body = padded_info(3 * MAX_GROWTH_STEP + 12_345);

    let server = FakeServer::start(vec![bulk(body.as_bytes())]).await;
    let info = fetch_info(&server.params()).await.unwrap();

    assert_eq!(info.len(), body.len());
    assert_eq!(info.as_str(), body);
}

#[tokio::test]
async fn test_metric_at_end_of_large_body() {
    let body = padded_info(2 * MAX_GROWTH_STEP);
    let server = FakeServer::start(vec![bulk(body.as_bytes())]).await;
    let config = server
        .config()
        .with_metrics("used_memory:1073741824:2147483648,filler_metric_0:1");

    let report = probe::run(&config).await;

    assert_eq!(report.severity(), Severity::Critical);
    let text = report.render_text();
    assert!(text.contains("[CRIT]used_memory:3000000000.0 gt"));
    assert!(text.contains("[OK]filler_metric_0:0.0 gt (warn1.0)"));
}

#[tokio::test]
async fn test_empty_body() {
    let server = FakeServer::start(vec![b"$0\r\n\r\n".to_vec()]).await;
    let config = server.config().with_metrics("used_memory");

    let report = probe::run(&config).await;

    assert_eq!(report.severity(), Severity::Unknown);
    assert!(report.render_text().ends_with("[Unknown]metrics used_memory\n"));
}
