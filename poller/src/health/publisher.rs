//! ヘルスステート公開
//!
//! `is_healthy`を再計算し、JSONスナップショットとプレーンテキストのシグナルを書き出す。
//! 書き込みは一時ファイル経由のリネームで置き換えるため、読み手が途中状態を見ることはない。

use crate::error::PollerError;
use bond_poller_common::config::PollerConfig;
use bond_poller_common::types::{HealthRecord, HealthSignal};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, error};

/// ヘルスファイル書き出し
#[derive(Debug, Clone)]
pub struct HealthPublisher {
    json_path: PathBuf,
    text_path: PathBuf,
    staleness_threshold: Duration,
}

impl HealthPublisher {
    /// 新しいパブリッシャーを作成
    pub fn new(
        json_path: impl Into<PathBuf>,
        text_path: impl Into<PathBuf>,
        staleness_threshold: Duration,
    ) -> Self {
        Self {
            json_path: json_path.into(),
            text_path: text_path.into(),
            staleness_threshold,
        }
    }

    /// 設定から作成
    pub fn from_config(config: &PollerConfig) -> Self {
        Self::new(
            config.health_json_path(),
            config.health_text_path(),
            config.staleness_threshold(),
        )
    }

    /// JSONヘルスファイルのパス
    pub fn json_path(&self) -> &Path {
        &self.json_path
    }

    /// プレーンテキストヘルスファイルのパス
    pub fn text_path(&self) -> &Path {
        &self.text_path
    }

    /// unhealthy判定の閾値
    pub fn staleness_threshold(&self) -> Duration {
        self.staleness_threshold
    }

    /// `is_healthy`を再計算し、両方のヘルスファイルを書き出す
    ///
    /// 書き込みエラーはログに残して握りつぶす。2つのファイルは独立して書き込む。
    pub async fn publish(&self, record: &mut HealthRecord, now: DateTime<Utc>) -> HealthSignal {
        let signal = record.refresh(now, self.staleness_threshold);

        if let Err(e) = self.write_json(record).await {
            error!(error = %e, "Failed to write health JSON file");
        }
        if let Err(e) = write_atomic(&self.text_path, signal.as_str().as_bytes()).await {
            error!(error = %e, "Failed to write health text file");
        }

        debug!(
            healthy = signal.is_healthy(),
            last_success = %record.last_success,
            "Health status published"
        );
        signal
    }

    async fn write_json(&self, record: &HealthRecord) -> Result<(), PollerError> {
        let json = serde_json::to_vec_pretty(record)?;
        write_atomic(&self.json_path, &json).await
    }
}

/// 同じディレクトリの一時ファイルに書き込んでからリネームする
async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), PollerError> {
    let tmp = tmp_path(path);
    let to_error = |source: std::io::Error| PollerError::HealthWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Err(e) = fs::write(&tmp, contents).await {
        return Err(to_error(e));
    }
    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(to_error(e));
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
