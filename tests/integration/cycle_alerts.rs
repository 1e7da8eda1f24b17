//! Integration tests for the check-and-alert cycle
//!
//! These tests verify that:
//! - Healthy monitor sets produce no alerts, cycle after cycle
//! - Down monitors alert exactly their owner, exactly once
//! - Inactive monitors are never probed
//! - Empty and failing sources end the cycle the right way

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use sitewatch::cycle::{CheckCycle, CycleSummary};
use sitewatch::source::MemoryMonitorSource;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helpers::{FailingSource, RecordingNotifier, inactive_monitor, test_monitor};

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn healthy_monitors_alert_nothing_run_after_run() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&mock_server)
        .await;

    let source = Arc::new(MemoryMonitorSource::with_monitors(vec![
        test_monitor(1, 42, &mock_server.uri()),
        test_monitor(2, 7, &format!("{}/health", mock_server.uri())),
    ]));
    let notifier = Arc::new(RecordingNotifier::new());
    let cycle = CheckCycle::new(source, notifier.clone(), PROBE_TIMEOUT);

    // two back-to-back cycles over an unchanged healthy set
    for _ in 0..2 {
        let summary = cycle.run().await.unwrap();

        assert_eq!(
            summary,
            CycleSummary {
                monitors_checked: 2,
                alerts_sent: 0,
                probe_failures: 0,
            }
        );
    }

    assert!(notifier.attempts().is_empty());
}

#[tokio::test]
async fn down_monitor_alerts_its_owner_once() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let url = format!("{}/down", mock_server.uri());
    let source = Arc::new(MemoryMonitorSource::with_monitors(vec![test_monitor(
        1, 42, &url,
    )]));
    let notifier = Arc::new(RecordingNotifier::new());
    let cycle = CheckCycle::new(source, notifier.clone(), PROBE_TIMEOUT);

    let summary = cycle.run().await.unwrap();

    assert_eq!(summary.alerts_sent, 1);

    let attempts = notifier.attempts();
    assert_eq!(attempts.len(), 1);

    let (user_id, message) = &attempts[0];
    assert_eq!(*user_id, 42);
    assert!(message.contains(&url));
    assert!(message.contains("Status 503"));
}

#[tokio::test]
async fn inactive_monitors_are_never_probed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let source = Arc::new(MemoryMonitorSource::with_monitors(vec![inactive_monitor(
        1,
        42,
        &mock_server.uri(),
    )]));
    let notifier = Arc::new(RecordingNotifier::new());
    let cycle = CheckCycle::new(source, notifier.clone(), PROBE_TIMEOUT);

    let summary = cycle.run().await.unwrap();

    assert_eq!(summary, CycleSummary::default());
    assert!(notifier.attempts().is_empty());
    // mock server verifies the zero-request expectation on drop
}

#[tokio::test]
async fn empty_source_completes_with_zero_summary() {
    let source = Arc::new(MemoryMonitorSource::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let cycle = CheckCycle::new(source, notifier.clone(), PROBE_TIMEOUT);

    let summary = cycle.run().await.unwrap();

    assert_eq!(summary, CycleSummary::default());
    assert!(notifier.attempts().is_empty());
}

#[tokio::test]
async fn source_failure_aborts_before_probing() {
    let notifier = Arc::new(RecordingNotifier::new());
    let cycle = CheckCycle::new(Arc::new(FailingSource), notifier.clone(), PROBE_TIMEOUT);

    let result = cycle.run().await;

    assert!(result.is_err());
    assert!(notifier.attempts().is_empty());
}
