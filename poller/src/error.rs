//! エラー型定義
//!
//! ポーラー層の統一エラー型（thiserror使用）

use bond_poller_common::error::CommonError;
use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Poller error type
#[derive(Debug, Error)]
pub enum PollerError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Transport-level failure (connect, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the API
    #[error("HTTP {0}")]
    Status(StatusCode),

    /// Failed to write one of the health files
    #[error("Failed to write health file {}: {source}", path.display())]
    HealthWrite {
        /// Target file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the health record
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
