//! Bond Poller
//!
//! Bonds APIを定期的に呼び出し、その成否をファイルベースのヘルスシグナルとして公開するワーカー

#![warn(missing_docs)]

/// Bonds APIクライアント
pub mod client;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// エラー型定義
pub mod error;

/// ヘルスステート公開
pub mod health;

/// ロギング初期化ユーティリティ
pub mod logging;

/// ポーリングループ
pub mod runner;

/// Shutdown controller
pub mod shutdown;

pub use client::{BondsApi, HttpBondsClient};
pub use error::PollerError;
pub use health::HealthPublisher;
pub use runner::{CycleOutcome, PollRunner};
pub use shutdown::ShutdownController;
