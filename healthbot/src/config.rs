//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to deprecated variable names with warning logs.

use crate::common::error::{CommonError, CommonResult};
use std::path::PathBuf;
use std::time::Duration;

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
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

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns the default value if neither variable is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// デフォルトのプローブタイムアウト（秒）
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// デフォルトのチェック間隔（秒）
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 3600;

/// Bot configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Discord botトークン
    pub discord_token: String,
    /// レポート配信先チャンネルID
    pub channel_id: String,
    /// 1プローブあたりのタイムアウト
    pub probe_timeout: Duration,
    /// チェック間隔
    pub check_interval: Duration,
    /// 監視対象リストのJSONファイル（未指定時は組み込みリスト）
    pub targets_file: Option<PathBuf>,
}

impl BotConfig {
    /// Load configuration from environment variables.
    ///
    /// `TOKEN` and `CHANNEL_ID` are legacy variable names from earlier
    /// deployments and remain supported as deprecated fallbacks.
    pub fn from_env() -> CommonResult<Self> {
        let discord_token = get_env_with_fallback("HEALTHBOT_DISCORD_TOKEN", "TOKEN")
            .ok_or_else(|| CommonError::Config("HEALTHBOT_DISCORD_TOKEN is not set".to_string()))?;
        let channel_id = get_env_with_fallback("HEALTHBOT_CHANNEL_ID", "CHANNEL_ID")
            .ok_or_else(|| CommonError::Config("HEALTHBOT_CHANNEL_ID is not set".to_string()))?;

        let probe_timeout_secs = get_env_with_fallback_parse(
            "HEALTHBOT_PROBE_TIMEOUT_SECS",
            "PROBE_TIMEOUT_SECS",
            DEFAULT_PROBE_TIMEOUT_SECS,
        );
        let check_interval_secs = get_env_with_fallback_parse(
            "HEALTHBOT_CHECK_INTERVAL_SECS",
            "CHECK_INTERVAL_SECS",
            DEFAULT_CHECK_INTERVAL_SECS,
        );

        // tokio::time::intervalはゼロ周期を受け付けないため、ここで弾く
        if probe_timeout_secs == 0 {
            return Err(CommonError::Config(
                "HEALTHBOT_PROBE_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }
        if check_interval_secs == 0 {
            return Err(CommonError::Config(
                "HEALTHBOT_CHECK_INTERVAL_SECS must be greater than 0".to_string(),
            ));
        }

        let targets_file =
            get_env_with_fallback("HEALTHBOT_TARGETS_FILE", "TARGETS_FILE").map(PathBuf::from);

        Ok(Self {
            discord_token,
            channel_id,
            probe_timeout: Duration::from_secs(probe_timeout_secs),
            check_interval: Duration::from_secs(check_interval_secs),
            targets_file,
        })
    }
}
