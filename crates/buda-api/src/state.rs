//! 애플리케이션 상태 관리.
//!
//! 모든 요청 핸들러에서 공유하는 상태를 정의합니다.
//! 요청 간 공유되는 것은 불변 설정과 거래소/텔레그램 클라이언트뿐입니다.

use std::sync::Arc;

use anyhow::Context;
use buda_core::AppConfig;
use buda_exchange::{BudaClient, BudaConfig};
use buda_telegram::{CommandDispatcher, TelegramBot, TelegramConfig, TelegramSender};

/// 애플리케이션 공유 상태.
pub struct AppState {
    /// 명령어 처리 및 응답 전송
    pub bot: TelegramBot,

    /// 텔레그램에 등록할 웹훅 URL
    pub webhook_url: String,

    /// 서버 버전
    pub version: String,
}

impl AppState {
    /// 이미 구성된 봇으로 상태를 생성합니다.
    pub fn new(bot: TelegramBot, webhook_url: impl Into<String>) -> Self {
        Self {
            bot,
            webhook_url: webhook_url.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 애플리케이션 설정으로 거래소/텔레그램 클라이언트를 만들고 상태를 생성합니다.
    ///
    /// # Errors
    /// HTTP 클라이언트 생성에 실패하거나 봇 토큰이 비어 있으면 에러를 반환합니다.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let exchange = BudaClient::new(BudaConfig::from_settings(&config.exchange))
            .context("Buda 클라이언트 생성 실패")?;
        let sender = TelegramSender::new(TelegramConfig::from_settings(&config.telegram))
            .context("텔레그램 전송기 생성 실패")?;

        let dispatcher = CommandDispatcher::new(Arc::new(exchange));
        Ok(Self::new(
            TelegramBot::new(dispatcher, sender),
            config.webhook_url(),
        ))
    }

    /// 웹훅 수신 경로 (`/{bot_token}`).
    pub fn webhook_path(&self) -> String {
        format!("/{}", self.bot.sender().bot_token())
    }
}
