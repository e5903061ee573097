//! ポーリングサイクルランナー
//!
//! 1サイクル = API呼び出し → 結果記録 → ヘルス公開 → 待機。
//! サイクルは常に直列に実行され、シャットダウン要求はループ先頭・API呼び出し中・待機中のいずれでも検知する。

use crate::client::BondsApi;
use crate::health::HealthPublisher;
use crate::shutdown::ShutdownController;
use bond_poller_common::config::PollerConfig;
use bond_poller_common::types::HealthRecord;
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// 1サイクルの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// API呼び出し成功
    Succeeded,
    /// API呼び出し失敗（メッセージは`last_error`に記録済み）
    Failed(String),
    /// 呼び出し中にシャットダウンが要求された（記録・公開は行わない）
    Cancelled,
}

/// ポーリングループ
///
/// `HealthRecord`はこのランナーだけが所有・更新する。
pub struct PollRunner<C> {
    client: C,
    publisher: HealthPublisher,
    shutdown: ShutdownController,
    interval: Duration,
    record: HealthRecord,
    cycles: u64,
}

impl<C: BondsApi> PollRunner<C> {
    /// 新しいランナーを作成
    ///
    /// 間隔は[`PollerConfig`]のデフォルト値で初期化される。
    pub fn new(client: C, publisher: HealthPublisher, shutdown: ShutdownController) -> Self {
        Self {
            client,
            publisher,
            shutdown,
            interval: PollerConfig::default().poll_interval(),
            record: HealthRecord::default(),
            cycles: 0,
        }
    }

    /// ポーリング間隔を設定
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// 現在のヘルスレコード
    pub fn record(&self) -> &HealthRecord {
        &self.record
    }

    /// 開始したサイクル数
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// シャットダウンが要求されるまでポーリングを続ける
    ///
    /// 初回は待機なしで即座に実行する。
    pub async fn run(&mut self) {
        info!(
            interval_secs = self.interval.as_secs(),
            staleness_threshold_secs = self.publisher.staleness_threshold().as_secs(),
            "Bond poller started"
        );

        loop {
            if self.shutdown.is_shutdown_requested() {
                break;
            }

            if self.run_cycle().await == CycleOutcome::Cancelled {
                break;
            }

            info!(interval_secs = self.interval.as_secs(), "Next check scheduled");

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.shutdown.wait() => break,
            }
        }

        info!(cycles = self.cycles, "Bond poller stopping");
    }

    /// 1サイクルを実行する
    ///
    /// API呼び出しの失敗はここで吸収し、呼び出し元へは伝播しない。
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        self.cycles += 1;
        self.record.begin_cycle(Utc::now());

        info!(cycle = self.cycles, "Calling Bonds API");

        let result = tokio::select! {
            biased;
            _ = self.shutdown.wait() => None,
            result = self.client.fetch_bonds() => Some(result),
        };

        let outcome = match result {
            None => {
                warn!(cycle = self.cycles, "Shutdown requested during Bonds API call, aborting");
                return CycleOutcome::Cancelled;
            }
            Some(Ok(body)) => {
                self.record.record_success(Utc::now());
                info!(bytes = body.len(), "Bonds API call succeeded");
                debug!("=== Bonds API response ===\n{}", body);
                CycleOutcome::Succeeded
            }
            Some(Err(e)) => {
                let message = e.to_string();
                self.record.record_failure(message.clone());
                error!(error = %message, "Error calling Bonds API");
                CycleOutcome::Failed(message)
            }
        };

        self.publisher.publish(&mut self.record, Utc::now()).await;
        outcome
    }
}
