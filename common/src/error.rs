//! エラー型定義
//!
//! 共通層のエラー（thiserror使用）

use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Common layer result type
pub type CommonResult<T> = Result<T, CommonError>;
