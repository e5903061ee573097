//! Integration Test: ポーリングサイクルとヘルスファイル公開
//!
//! モックAPIに対して実際のHTTPクライアントでサイクルを回し、公開ファイルを検証する。

use bond_poller::{CycleOutcome, PollRunner, ShutdownController};
use bond_poller_common::types::HealthRecord;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::TestPoller;

/// 正常応答 → healthy
#[tokio::test]
async fn test_successful_cycle_publishes_healthy() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/bonds"))
        .and(header("x-api-key", "sk_test"))
        .and(header("accept", "*/*"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"bonds":[]}"#))
        .expect(1)
        .mount(&mock)
        .await;

    let poller = TestPoller::new(&mock.uri());
    let mut runner = PollRunner::new(
        poller.client(),
        poller.publisher(),
        ShutdownController::default(),
    );

    assert_eq!(runner.run_cycle().await, CycleOutcome::Succeeded);

    let published = poller.published_record();
    assert!(published.is_healthy);
    assert!(published.last_error.is_empty());
    assert_eq!(&published, runner.record());
    assert_eq!(poller.published_signal(), "healthy");
}

/// 初回失敗 → lastSuccessは初期値のまま、unhealthy
#[tokio::test]
async fn test_first_cycle_failure_publishes_unhealthy() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/bonds"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock)
        .await;

    let poller = TestPoller::new(&mock.uri());
    let mut runner = PollRunner::new(
        poller.client(),
        poller.publisher(),
        ShutdownController::default(),
    );

    let outcome = runner.run_cycle().await;
    assert_eq!(outcome, CycleOutcome::Failed("HTTP 401 Unauthorized".to_string()));

    let published = poller.published_record();
    assert_eq!(published.last_success, HealthRecord::default().last_success);
    assert_eq!(published.last_error, "HTTP 401 Unauthorized");
    assert!(!published.is_healthy);
    assert_eq!(poller.published_signal(), "unhealthy");
}

/// 到達不能なエンドポイントでもループは継続できる
#[tokio::test]
async fn test_transport_error_is_recorded() {
    let poller = TestPoller::new("http://127.0.0.1:9");
    let mut runner = PollRunner::new(
        poller.client(),
        poller.publisher(),
        ShutdownController::default(),
    );

    assert!(matches!(runner.run_cycle().await, CycleOutcome::Failed(_)));
    assert!(matches!(runner.run_cycle().await, CycleOutcome::Failed(_)));

    let published = poller.published_record();
    assert!(published.last_error.starts_with("HTTP request failed"));
    assert_eq!(poller.published_signal(), "unhealthy");
    assert_eq!(runner.cycles(), 2);
}

/// 成功後の一時的な失敗は閾値内であればhealthyのまま
#[tokio::test]
async fn test_transient_failure_after_success_stays_healthy() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/bonds"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .up_to_n_times(3)
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/bonds"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock)
        .await;

    let poller = TestPoller::new(&mock.uri());
    let mut runner = PollRunner::new(
        poller.client(),
        poller.publisher(),
        ShutdownController::default(),
    );

    for _ in 0..3 {
        assert_eq!(runner.run_cycle().await, CycleOutcome::Succeeded);
    }
    let last_success = runner.record().last_success;

    assert!(matches!(runner.run_cycle().await, CycleOutcome::Failed(_)));

    let published = poller.published_record();
    assert_eq!(published.last_success, last_success);
    assert_eq!(published.last_error, "HTTP 502 Bad Gateway");
    assert!(published.is_healthy);
    assert_eq!(poller.published_signal(), "healthy");
    assert!(poller.dir().join("healthstatus.json").exists());
}
