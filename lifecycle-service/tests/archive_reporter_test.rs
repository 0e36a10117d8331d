//! Archive reporter tests
//!
//! The report itself is a single form-encoded POST; failures must never
//! escape the coordinator's archive-save path.

mod common;

use common::{service_with, InMemoryStatusStore, RecordingRegistry};
use lifecycle_service::services::ArchiveReporter;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn reporter_for(server: &MockServer) -> ArchiveReporter {
    ArchiveReporter::new(
        format!("{}/archive", server.uri()),
        "edge-test".to_string(),
        Duration::from_secs(1),
    )
    .expect("failed to build reporter")
}

#[tokio::test]
async fn successful_report_returns_ack_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/archive"))
        .and(body_string_contains("server=edge-test"))
        .and(body_string_contains("username=abc123"))
        .and(body_string_contains("location=archive%2Fabc123"))
        .and(body_string_contains("duration=120.5"))
        .and(body_string_contains("thumbnails%5B%5D=thumb1"))
        .and(body_string_contains("thumbnails%5B%5D=thumb2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("saved"))
        .expect(1)
        .mount(&server)
        .await;

    let reporter = reporter_for(&server);
    let thumbnails = vec!["thumb1".to_string(), "thumb2".to_string()];
    let ack = reporter
        .report("abc123", "archive/abc123", 120.5, &thumbnails)
        .await
        .unwrap();

    assert_eq!(ack, "saved");
}

#[tokio::test]
async fn non_2xx_response_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/archive"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let reporter = reporter_for(&server);
    let result = reporter.report("abc123", "archive/abc123", 120.5, &[]).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn coordinator_swallows_report_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/archive"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let svc = service_with(
        InMemoryStatusStore::new(),
        RecordingRegistry::new(),
        common::unreachable_verifier(),
        reporter_for(&server),
    );

    // The archive-save path is best-effort; the caller still succeeds.
    svc.save_archive("abc123", "archive/abc123", 120.5, &[])
        .await
        .unwrap();
}
