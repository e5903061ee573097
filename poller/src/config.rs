//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to legacy variable names, and builds [`PollerConfig`] from them.

use bond_poller_common::config::PollerConfig;
use bond_poller_common::error::CommonResult;
use std::path::PathBuf;

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use bond_poller::config::get_env_with_fallback;
///
/// let base_url = get_env_with_fallback("BOND_POLLER_BASE_URL", "TIWAZ_BASE_URL");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither variable is set or parsing fails.
/// An unparseable value is logged as a warning naming the variable.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|raw| parse_env_value(new_name, &raw))
        .unwrap_or(default)
}

fn parse_env_value<T: std::str::FromStr>(name: &str, raw: &str) -> Option<T> {
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(
                "Environment variable '{}' has invalid value '{}', using default",
                name,
                raw
            );
            None
        }
    }
}

/// 環境変数からポーラー設定を読み込み、検証する
///
/// 未設定の項目は [`PollerConfig::default`] の値を使う。
pub fn load_from_env() -> CommonResult<PollerConfig> {
    let defaults = PollerConfig::default();

    let api_key = get_env_with_fallback("BOND_POLLER_API_KEY", "TIWAZ_API_KEY")
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty());

    let health_dir = get_env_with_fallback("BOND_POLLER_HEALTH_DIR", "BOND_POLLER_HEALTH_DIR")
        .filter(|dir| !dir.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or(defaults.health_dir);

    let config = PollerConfig {
        base_url: get_env_with_fallback_or(
            "BOND_POLLER_BASE_URL",
            "TIWAZ_BASE_URL",
            &defaults.base_url,
        ),
        api_path: get_env_with_fallback_or(
            "BOND_POLLER_API_PATH",
            "BOND_POLLER_API_PATH",
            &defaults.api_path,
        ),
        api_key,
        poll_interval_secs: get_env_with_fallback_parse(
            "BOND_POLLER_INTERVAL_SECS",
            "BOND_POLLER_INTERVAL_SECS",
            defaults.poll_interval_secs,
        ),
        staleness_threshold_secs: get_env_with_fallback_parse(
            "BOND_POLLER_STALENESS_SECS",
            "BOND_POLLER_STALENESS_SECS",
            defaults.staleness_threshold_secs,
        ),
        request_timeout_secs: get_env_with_fallback_parse(
            "BOND_POLLER_REQUEST_TIMEOUT_SECS",
            "BOND_POLLER_REQUEST_TIMEOUT_SECS",
            defaults.request_timeout_secs,
        ),
        health_dir,
        health_json_file: get_env_with_fallback_or(
            "BOND_POLLER_HEALTH_JSON_FILE",
            "BOND_POLLER_HEALTH_JSON_FILE",
            &defaults.health_json_file,
        ),
        health_text_file: get_env_with_fallback_or(
            "BOND_POLLER_HEALTH_TEXT_FILE",
            "BOND_POLLER_HEALTH_TEXT_FILE",
            &defaults.health_text_file,
        ),
    };

    config.validate()?;
    Ok(config)
}

/// ログファイル出力先ディレクトリを取得
///
/// 環境変数 `BOND_POLLER_LOG_DIR` が未設定の場合はコンソール出力のみ。
pub fn get_log_dir() -> Option<PathBuf> {
    get_env_with_fallback("BOND_POLLER_LOG_DIR", "BOND_POLLER_LOG_DIR")
        .filter(|dir| !dir.trim().is_empty())
        .map(PathBuf::from)
}
