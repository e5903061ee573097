//! 設定管理
//!
//! PollerConfig（ポーリング先・間隔・ヘルスファイル出力先）

use crate::error::{CommonError, CommonResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// ポーラー設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PollerConfig {
    /// APIのベースURL (デフォルト: "https://tiwaz.hayatnet.local/")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// ベースURLからの相対パス (デフォルト: "v1/bonds")
    #[serde(default = "default_api_path")]
    pub api_path: String,

    /// `X-API-KEY`ヘッダーに載せるAPIキー
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// ポーリング間隔（秒）(デフォルト: 60)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// 最終成功からunhealthyと判定するまでの時間（秒）(デフォルト: 600)
    #[serde(default = "default_staleness_threshold")]
    pub staleness_threshold_secs: u64,

    /// HTTPリクエストのタイムアウト（秒）(デフォルト: 30)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// ヘルスファイルの出力ディレクトリ (デフォルト: OSの一時ディレクトリ)
    #[serde(default = "default_health_dir")]
    pub health_dir: PathBuf,

    /// JSONヘルスファイル名 (デフォルト: "healthstatus.json")
    #[serde(default = "default_health_json_file")]
    pub health_json_file: String,

    /// プレーンテキストのヘルスファイル名 (デフォルト: "healthy")
    #[serde(default = "default_health_text_file")]
    pub health_text_file: String,
}

fn default_base_url() -> String {
    "https://tiwaz.hayatnet.local/".to_string()
}

fn default_api_path() -> String {
    "v1/bonds".to_string()
}

fn default_poll_interval() -> u64 {
    60
}

fn default_staleness_threshold() -> u64 {
    600
}

fn default_request_timeout() -> u64 {
    30
}

fn default_health_dir() -> PathBuf {
    std::env::temp_dir()
}

fn default_health_json_file() -> String {
    "healthstatus.json".to_string()
}

fn default_health_text_file() -> String {
    "healthy".to_string()
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_path: default_api_path(),
            api_key: None,
            poll_interval_secs: default_poll_interval(),
            staleness_threshold_secs: default_staleness_threshold(),
            request_timeout_secs: default_request_timeout(),
            health_dir: default_health_dir(),
            health_json_file: default_health_json_file(),
            health_text_file: default_health_text_file(),
        }
    }
}

impl PollerConfig {
    /// ポーリング間隔
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// unhealthy判定の閾値
    pub fn staleness_threshold(&self) -> Duration {
        Duration::from_secs(self.staleness_threshold_secs)
    }

    /// HTTPリクエストのタイムアウト
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// JSONヘルスファイルのフルパス
    pub fn health_json_path(&self) -> PathBuf {
        self.health_dir.join(&self.health_json_file)
    }

    /// プレーンテキストヘルスファイルのフルパス
    pub fn health_text_path(&self) -> PathBuf {
        self.health_dir.join(&self.health_text_file)
    }

    /// 設定値を検証する
    ///
    /// ポーリング間隔と閾値は独立した値として扱い、両者の比率は検証しない。
    pub fn validate(&self) -> CommonResult<()> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(CommonError::Validation("base_url must not be empty".to_string()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CommonError::Validation(format!(
                "base_url must start with http:// or https:// (got '{}')",
                base_url
            )));
        }
        if self.api_path.trim().is_empty() {
            return Err(CommonError::Validation("api_path must not be empty".to_string()));
        }
        if self.poll_interval_secs == 0 {
            return Err(CommonError::Validation(
                "poll_interval_secs must be greater than 0".to_string(),
            ));
        }
        if self.staleness_threshold_secs == 0 {
            return Err(CommonError::Validation(
                "staleness_threshold_secs must be greater than 0".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(CommonError::Validation(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.health_json_file.trim().is_empty() || self.health_text_file.trim().is_empty() {
            return Err(CommonError::Validation(
                "health file names must not be empty".to_string(),
            ));
        }
        if self.health_json_file == self.health_text_file {
            return Err(CommonError::Validation(format!(
                "health_json_file and health_text_file must differ (both '{}')",
                self.health_json_file
            )));
        }
        Ok(())
    }
}
