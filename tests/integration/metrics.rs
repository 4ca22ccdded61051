//! Full probe runs with metric rules

use check_redis::config::OutputFormat;
use check_redis::{probe, Severity};

use crate::helpers::{bulk, FakeServer};

const INFO: &str = "# Server\r\n\
                    redis_version:7.2.4\r\n\
                    uptime_in_seconds:86400\r\n\
                    \r\n\
                    # Clients\r\n\
                    connected_clients:12\r\n\
                    \r\n\
                    # Memory\r\n\
                    used_memory:2000000000\r\n\
                    used_memory_rss:3000000000\r\n\
                    \r\n\
                    # Replication\r\n\
                    role:master\r\n\
                    connected_slaves:1\r\n";

#[tokio::test]
async fn test_connection_only() {
    let server = FakeServer::start(vec![bulk(INFO.as_bytes())]).await;
    let report = probe::run(&server.config()).await;

    assert_eq!(report.severity(), Severity::Ok);
    assert_eq!(report.render_text(), "[OK]Connection and Authorization Ok\n");
    assert_eq!(server.received().await, vec!["INFO"]);
}

#[tokio::test]
async fn test_warning_not_critical() {
    let server = FakeServer::start(vec![bulk(INFO.as_bytes())]).await;
    let config = server
        .config()
        .with_metrics("used_memory:1073741824:2147483648:gt");

    let report = probe::run(&config).await;

    assert_eq!(report.severity(), Severity::Warning);
    assert_eq!(report.severity().exit_code(), 1);
    assert_eq!(
        report.render_text(),
        "[OK]Connection and Authorization Ok\n\
         [WARN]used_memory:2000000000.0 gt (warn1073741824.0 crit2147483648.0)\n"
    );
}

#[tokio::test]
async fn test_critical() {
    let server = FakeServer::start(vec![bulk(INFO.as_bytes())]).await;
    let config = server
        .config()
        .with_metrics("used_memory_rss:1073741824:2147483648:gt");

    let report = probe::run(&config).await;

    assert_eq!(report.severity(), Severity::Critical);
    assert!(report
        .render_text()
        .contains("[CRIT]used_memory_rss:3000000000.0 gt"));
}

#[tokio::test]
async fn test_less_than_rule() {
    let server = FakeServer::start(vec![bulk(INFO.as_bytes())]).await;
    let config = server.config().with_metrics("connected_slaves:2:0:lt");

    let report = probe::run(&config).await;

    assert_eq!(report.severity(), Severity::Warning);
    assert!(report
        .render_text()
        .contains("[WARN]connected_slaves:1.0 lt (warn2.0 crit0.0)"));
}

#[tokio::test]
async fn test_mixed_rules_report_everything() {
    let server = FakeServer::start(vec![bulk(INFO.as_bytes())]).await;
    let config = server
        .config()
        .with_metrics("connected_clients:100:200,:10:20:gt,evicted_keys:1:2,role:1:2");

    let report = probe::run(&config).await;
    let text = report.render_text();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(report.severity(), Severity::Unknown);
    assert_eq!(
        lines,
        vec![
            "[OK]Connection and Authorization Ok",
            "[OK]connected_clients:12.0 gt (warn100.0 crit200.0)",
            "[Unknown]metrics parameter invalid (:10:20:gt)",
            "[Unknown]metrics evicted_keys",
            "[Unknown]role value 'master' is not numeric",
        ]
    );
}

#[tokio::test]
async fn test_password_sends_auth_first() {
    let server = FakeServer::start(vec![b"+OK\r\n".to_vec(), bulk(INFO.as_bytes())]).await;
    let mut config = server.config().with_metrics("uptime_in_seconds::60:lt");
    config.connection.password = "s3cret".to_string();

    let report = probe::run(&config).await;

    assert_eq!(report.severity(), Severity::Ok);
    assert_eq!(
        server.received().await,
        vec!["AUTH \"s3cret\"", "INFO"]
    );
}

#[tokio::test]
async fn test_json_output() {
    let server = FakeServer::start(vec![bulk(INFO.as_bytes())]).await;
    let config = server
        .config()
        .with_metrics("used_memory:1073741824:2147483648")
        .with_format(OutputFormat::Json);

    let report = probe::run(&config).await;
    let json: serde_json::Value = serde_json::from_str(&report.render(config.format)).unwrap();

    assert_eq!(json["status"], "warning");
    assert_eq!(json["exit_code"], 1);
    assert_eq!(json["connection"]["status"], "pass");
    assert_eq!(json["checks"][0]["metric"], "used_memory");
    assert_eq!(json["checks"][0]["value"], 2000000000.0);
}
