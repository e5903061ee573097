//! ヘルスステート公開
//!
//! ポーリング結果をファイルベースのヘルスシグナルとして外部（オーケストレーターのプローブ等）へ公開する。
//! 公開されたファイルをこのプロセスが読み戻すことはない。

pub mod publisher;

pub use publisher::HealthPublisher;
