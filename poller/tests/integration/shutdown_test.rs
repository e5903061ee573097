//! Integration Test: シャットダウン
//!
//! API呼び出し中・待機中のシャットダウンでループが速やかに終了することを確認する。

use bond_poller::{PollRunner, ShutdownController};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::TestPoller;

/// 応答が遅いAPIへの呼び出し中にシャットダウン → 公開せずに終了
#[tokio::test]
async fn test_shutdown_aborts_in_flight_call() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/bonds"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
        .mount(&mock)
        .await;

    let mut poller = TestPoller::new(&mock.uri());
    poller.config.request_timeout_secs = 60;
    let shutdown = ShutdownController::default();

    let mut runner = PollRunner::new(poller.client(), poller.publisher(), shutdown.clone());
    let handle = tokio::spawn(async move {
        runner.run().await;
        runner
    });

    // リクエストがモックに届くまで待つ
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let received = mock.received_requests().await.unwrap_or_default();
            if !received.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("request should reach the mock");

    shutdown.request_shutdown();

    let runner = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("runner should stop without waiting for the response")
        .unwrap();

    assert_eq!(runner.cycles(), 1);
    assert!(runner.record().last_error.is_empty());
    assert!(!poller.config.health_json_path().exists());
    assert!(!poller.config.health_text_path().exists());
}

/// 待機中のシャットダウン → 次のサイクルを開始しない
#[tokio::test]
async fn test_shutdown_during_wait() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/bonds"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&mock)
        .await;

    let poller = TestPoller::new(&mock.uri());
    let shutdown = ShutdownController::default();

    let mut runner = PollRunner::new(poller.client(), poller.publisher(), shutdown.clone())
        .with_interval(Duration::from_secs(3600));
    let handle = tokio::spawn(async move {
        runner.run().await;
        runner
    });

    let text_path = poller.config.health_text_path();
    tokio::time::timeout(Duration::from_secs(5), async {
        while !text_path.exists() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("first cycle should publish");

    shutdown.request_shutdown();

    let runner = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("runner should stop during wait")
        .unwrap();

    assert_eq!(runner.cycles(), 1);
    assert_eq!(poller.published_signal(), "healthy");
}
