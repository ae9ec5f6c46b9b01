//! 핵심 에러 타입.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 지원하지 않는 통화
    #[error("지원하지 않는 통화: {0}")]
    UnsupportedCurrency(String),
}

/// 핵심 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::UnsupportedCurrency("eth".to_string());
        assert_eq!(err.to_string(), "지원하지 않는 통화: eth");

        let err = CoreError::Config("bot_token 누락".to_string());
        assert!(err.to_string().contains("bot_token"));
    }
}
