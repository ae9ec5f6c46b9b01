//! 텔레그램 Bot API 전송.
//!
//! 명령어 응답 전송(`sendMessage`)과 웹훅 등록(`setWebhook`)만 다룹니다.

use std::fmt;

use buda_core::TelegramSettings;
use tracing::{debug, error, info};

use crate::types::{NotificationError, NotificationResult, TelegramApiResponse};

/// 기본 Bot API URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.telegram.org";

/// 텔레그램 봇 설정.
#[derive(Clone)]
pub struct TelegramConfig {
    /// @BotFather에서 받은 봇 토큰
    pub bot_token: String,
    /// Bot API 기본 URL
    pub api_base_url: String,
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"***REDACTED***")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl TelegramConfig {
    /// 새 텔레그램 설정을 생성합니다.
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Bot API 기본 URL을 변경합니다.
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// 애플리케이션 설정의 텔레그램 섹션에서 생성합니다.
    pub fn from_settings(settings: &TelegramSettings) -> Self {
        Self::new(settings.bot_token.clone()).with_api_base_url(settings.api_base_url.clone())
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base_url, self.bot_token, method)
    }
}

/// 텔레그램 메시지 전송기.
pub struct TelegramSender {
    config: TelegramConfig,
    client: reqwest::Client,
}

impl TelegramSender {
    /// 새 전송기를 생성합니다.
    ///
    /// # Errors
    /// 봇 토큰이 비어 있으면 `NotificationError::InvalidConfig`를 반환합니다.
    pub fn new(config: TelegramConfig) -> NotificationResult<Self> {
        if config.bot_token.trim().is_empty() {
            return Err(NotificationError::InvalidConfig(
                "bot_token이 비어 있습니다".to_string(),
            ));
        }

        Ok(Self {
            config,
            client: reqwest::Client::new(),
        })
    }

    /// 봇 토큰 (웹훅 경로에 사용).
    pub fn bot_token(&self) -> &str {
        &self.config.bot_token
    }

    /// 채팅에 일반 텍스트 메시지를 전송합니다.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> NotificationResult<()> {
        let params = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
            "disable_web_page_preview": true,
        });

        let response = self
            .client
            .post(self.config.method_url("sendMessage"))
            .json(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("응답 전송 실패: {} - {}", status, body);
            return Err(NotificationError::SendFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let api_response: TelegramApiResponse = serde_json::from_str(&body)?;
        if !api_response.ok {
            let description = api_response.description.unwrap_or_default();
            error!("응답 전송 거부: {}", description);
            return Err(NotificationError::SendFailed(description));
        }

        debug!(chat_id = chat_id, "응답 전송 완료");
        Ok(())
    }

    /// 웹훅 URL을 등록합니다.
    ///
    /// Bot API가 등록을 수락하면 `true`를 반환합니다.
    pub async fn set_webhook(&self, url: &str) -> NotificationResult<bool> {
        let response = self
            .client
            .post(self.config.method_url("setWebhook"))
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await?;

        let status = response.status();
        let api_response: TelegramApiResponse = response.json().await?;

        let accepted = status.is_success()
            && api_response.ok
            && api_response
                .result
                .as_ref()
                .and_then(|r| r.as_bool())
                .unwrap_or(false);

        if accepted {
            info!("웹훅 등록 완료");
        } else {
            error!(
                status = status.as_u16(),
                description = api_response.description.as_deref().unwrap_or(""),
                "웹훅 등록 실패"
            );
        }

        Ok(accepted)
    }
}
