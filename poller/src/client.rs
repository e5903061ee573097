//! Bonds APIクライアント
//!
//! ポーリング対象への単一GETリクエストを抽象化する。
//! ランナーは[`BondsApi`]越しに呼び出すため、テストではスクリプト化した実装に差し替えられる。

use crate::error::PollerError;
use async_trait::async_trait;
use bond_poller_common::config::PollerConfig;
use bond_poller_common::error::CommonError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client, Url};
use tracing::debug;

/// APIキーを載せるヘッダー名
pub const API_KEY_HEADER: &str = "x-api-key";

/// リモート呼び出しの抽象
#[async_trait]
pub trait BondsApi: Send + Sync {
    /// 債券一覧を取得し、レスポンスボディを返す
    ///
    /// 2xx以外のステータスは`PollerError::Status`として返す。
    async fn fetch_bonds(&self) -> Result<String, PollerError>;
}

/// reqwestによる[`BondsApi`]実装
#[derive(Debug, Clone)]
pub struct HttpBondsClient {
    client: Client,
    url: Url,
}

impl HttpBondsClient {
    /// 設定からクライアントを構築
    pub fn new(config: &PollerConfig) -> Result<Self, PollerError> {
        let url = resolve_url(&config.base_url, &config.api_path)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        if let Some(api_key) = &config.api_key {
            let mut value = HeaderValue::from_str(api_key).map_err(|_| {
                CommonError::Config("API key contains invalid header characters".to_string())
            })?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { client, url })
    }

    /// リクエスト先URL
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl BondsApi for HttpBondsClient {
    async fn fetch_bonds(&self) -> Result<String, PollerError> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PollerError::Status(status));
        }

        let body = response.text().await?;
        debug!(status = %status, bytes = body.len(), "Bonds API response received");
        Ok(body)
    }
}

/// ベースURLと相対パスを結合する
///
/// ベースURLの末尾スラッシュが無い場合も最後のセグメントを落とさないよう補う。
fn resolve_url(base_url: &str, api_path: &str) -> Result<Url, CommonError> {
    let base_url = base_url.trim();
    let base = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    };
    let base = Url::parse(&base)
        .map_err(|e| CommonError::Config(format!("invalid base_url '{}': {}", base_url, e)))?;

    base.join(api_path.trim().trim_start_matches('/'))
        .map_err(|e| CommonError::Config(format!("invalid api_path '{}': {}", api_path, e)))
}
