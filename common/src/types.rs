//! 共通型定義
//!
//! ヘルスレコードと外部公開用のヘルスシグナル

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// ポーリングの稼働状況
///
/// プロセス内に1つだけ存在し、ポーリングサイクルごとに更新される。
/// `is_healthy`は公開のたびに`last_success`と現在時刻から再計算される派生値。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    /// 直近にサイクルを開始した時刻（成否に関わらず更新）
    pub last_run: DateTime<Utc>,
    /// 直近にAPI呼び出しが成功した時刻
    pub last_success: DateTime<Utc>,
    /// 直近の失敗メッセージ（成功時は空文字）
    pub last_error: String,
    /// 公開時点で`last_success`が閾値内かどうか
    pub is_healthy: bool,
}

impl Default for HealthRecord {
    fn default() -> Self {
        Self {
            last_run: DateTime::<Utc>::UNIX_EPOCH,
            last_success: DateTime::<Utc>::UNIX_EPOCH,
            last_error: String::new(),
            is_healthy: false,
        }
    }
}

impl HealthRecord {
    /// サイクル開始を記録
    pub fn begin_cycle(&mut self, now: DateTime<Utc>) {
        self.last_run = now;
    }

    /// 成功を記録し、エラーメッセージをクリアする
    ///
    /// `last_success`は後退しない。
    pub fn record_success(&mut self, now: DateTime<Utc>) {
        if now > self.last_success {
            self.last_success = now;
        }
        self.last_error.clear();
    }

    /// 失敗を記録する（`last_success`は変更しない）
    pub fn record_failure(&mut self, message: impl Into<String>) {
        self.last_error = message.into();
    }

    /// `now - last_success < threshold`を判定
    ///
    /// `last_success`が未来の場合は経過時間ゼロとして扱う。
    pub fn is_fresh(&self, now: DateTime<Utc>, threshold: Duration) -> bool {
        let age = (now - self.last_success)
            .to_std()
            .unwrap_or(Duration::ZERO);
        age < threshold
    }

    /// `is_healthy`を再計算して保存し、対応するシグナルを返す
    pub fn refresh(&mut self, now: DateTime<Utc>, threshold: Duration) -> HealthSignal {
        self.is_healthy = self.is_fresh(now, threshold);
        HealthSignal::from(self.is_healthy)
    }
}

/// プレーンテキストのヘルスファイルに書き出す値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthSignal {
    /// 正常
    Healthy,
    /// 異常
    Unhealthy,
}

impl HealthSignal {
    /// ファイルに書き込むリテラル値
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthSignal::Healthy => "healthy",
            HealthSignal::Unhealthy => "unhealthy",
        }
    }

    /// 正常かどうか
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthSignal::Healthy)
    }
}

impl From<bool> for HealthSignal {
    fn from(healthy: bool) -> Self {
        if healthy {
            HealthSignal::Healthy
        } else {
            HealthSignal::Unhealthy
        }
    }
}

impl fmt::Display for HealthSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
