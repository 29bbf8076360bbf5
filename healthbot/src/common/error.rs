//! エラー型定義
//!
//! 統一エラー型（thiserror使用）

use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bot error type
#[derive(Debug, Error)]
pub enum BotError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Delivery sink rejected the report
    #[error("Sink error: {0}")]
    Sink(String),

    /// Delivery channel is unreachable (transport-level failure)
    #[error("Sink unavailable: {0}")]
    SinkUnavailable(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias (Common)
pub type CommonResult<T> = Result<T, CommonError>;

/// Result type alias (Bot)
pub type BotResult<T> = Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_error_display() {
        let error = CommonError::Config("HEALTHBOT_DISCORD_TOKEN is not set".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: HEALTHBOT_DISCORD_TOKEN is not set"
        );
    }

    #[test]
    fn test_bot_error_sink_display() {
        let error = BotError::Sink("Discord API returned HTTP 403".to_string());
        assert_eq!(error.to_string(), "Sink error: Discord API returned HTTP 403");
    }

    #[test]
    fn test_common_error_transparent_in_bot_error() {
        let error: BotError = CommonError::Validation("empty target name".to_string()).into();
        assert_eq!(error.to_string(), "Validation error: empty target name");
    }

    #[test]
    fn test_error_from_serde_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let common_error: CommonError = json_error.into();
        assert!(matches!(common_error, CommonError::Serialization(_)));
    }
}
