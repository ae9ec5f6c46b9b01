//! 설정 관리.
//!
//! 기본값 → 설정 파일(선택) → 환경 변수 순서로 덮어씁니다.
//! 환경 변수는 `BUDABOT__` 접두사와 `__` 구분자를 사용합니다.
//! (예: `BUDABOT__TELEGRAM__BOT_TOKEN`, `BUDABOT__EXCHANGE__API_SECRET`)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// 기본 설정 파일 경로 (확장자 제외).
pub const DEFAULT_CONFIG_PATH: &str = "config/default";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 텔레그램 설정
    pub telegram: TelegramSettings,
    /// 거래소 설정
    pub exchange: ExchangeSettings,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// 텔레그램 봇 설정.
#[derive(Clone, Deserialize, Serialize)]
pub struct TelegramSettings {
    /// @BotFather에서 받은 봇 토큰 (웹훅 경로로도 사용)
    pub bot_token: String,
    /// 웹훅 콜백의 공개 기본 URL (예: "https://bot.example.com/")
    pub webhook_base_url: String,
    /// Telegram Bot API 기본 URL
    pub api_base_url: String,
}

impl fmt::Debug for TelegramSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramSettings")
            .field("bot_token", &"***REDACTED***")
            .field("webhook_base_url", &self.webhook_base_url)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// 거래소 API 설정.
#[derive(Clone, Deserialize, Serialize)]
pub struct ExchangeSettings {
    /// API 키
    pub api_key: String,
    /// API 시크릿
    pub api_secret: String,
    /// REST API 기본 URL
    pub base_url: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl fmt::Debug for ExchangeSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeSettings")
            .field("api_key", &"***REDACTED***")
            .field("api_secret", &"***REDACTED***")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 기본 설정 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 호스팅 플랫폼이 주입하는 `PORT` 환경 변수가 있으면 서버 포트를 덮어씁니다.
    pub fn load() -> CoreResult<Self> {
        let builder = Self::builder()?
            .add_source(config::File::with_name(DEFAULT_CONFIG_PATH).required(false))
            .add_source(Self::environment());

        let builder = match std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            Some(port) => builder.set_override("server.port", i64::from(port))?,
            None => builder,
        };

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 로드합니다. 누락된 항목은 기본값을 사용합니다.
    pub fn from_toml_str(toml: &str) -> CoreResult<Self> {
        let config: AppConfig = Self::builder()?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// `BUDABOT__*` 환경 변수 소스.
    ///
    /// 값은 문자열 그대로 두고 숫자 필드는 역직렬화 시점에 변환합니다.
    fn environment() -> config::Environment {
        config::Environment::with_prefix("BUDABOT").separator("__")
    }

    /// 기본값이 채워진 빌더.
    fn builder() -> CoreResult<config::ConfigBuilder<config::builder::DefaultState>> {
        let server = ServerConfig::default();
        let logging = LoggingConfig::default();

        Ok(config::Config::builder()
            .set_default("server.host", server.host)?
            .set_default("server.port", i64::from(server.port))?
            .set_default("telegram.bot_token", "")?
            .set_default("telegram.webhook_base_url", "")?
            .set_default("telegram.api_base_url", "https://api.telegram.org")?
            .set_default("exchange.api_key", "")?
            .set_default("exchange.api_secret", "")?
            .set_default("exchange.base_url", "https://www.buda.com")?
            .set_default("exchange.timeout_secs", 30)?
            .set_default("logging.level", logging.level)?
            .set_default("logging.format", logging.format)?)
    }

    /// 필수 자격증명이 모두 설정되었는지 확인합니다.
    pub fn validate(&self) -> CoreResult<()> {
        let required = [
            ("telegram.bot_token", &self.telegram.bot_token),
            ("telegram.webhook_base_url", &self.telegram.webhook_base_url),
            ("exchange.api_key", &self.exchange.api_key),
            ("exchange.api_secret", &self.exchange.api_secret),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(key, _)| *key)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Config(format!(
                "필수 설정 누락: {}",
                missing.join(", ")
            )))
        }
    }

    /// 웹훅 콜백 URL (`{webhook_base_url}{bot_token}`).
    pub fn webhook_url(&self) -> String {
        format!(
            "{}{}",
            self.telegram.webhook_base_url, self.telegram.bot_token
        )
    }
}
