//! 텔레그램 웹훅 endpoint.
//!
//! 웹훅 수신 경로는 봇 토큰이므로 라우터 생성 시점에 결정됩니다.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use buda_telegram::{TelegramUpdate, WebhookOutcome};
use tracing::{info, warn};

use crate::state::AppState;

/// 웹훅 등록 성공 응답.
pub const WEBHOOK_SETUP_OK: &str = "Webhook setup successful";

/// 웹훅 등록 실패 응답.
pub const WEBHOOK_SETUP_FAILED: &str = "Webhook setup failed";

/// 텔레그램 업데이트 수신.
///
/// POST /{bot_token}
///
/// 텔레그램이 재전송하지 않도록 항상 200으로 응답하고, 처리 결과는 본문 문자열로 전달합니다.
pub async fn receive_update(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> (StatusCode, String) {
    let outcome = match serde_json::from_slice::<TelegramUpdate>(&body) {
        Ok(update) => state.bot.handle_update(&update).await,
        Err(e) => {
            warn!(error = %e, "웹훅 본문 파싱 실패");
            WebhookOutcome::Ignored
        }
    };

    (StatusCode::OK, outcome.to_string())
}

/// 웹훅 등록.
///
/// GET|POST /set_webhook
pub async fn set_webhook(State(state): State<Arc<AppState>>) -> (StatusCode, &'static str) {
    match state.bot.sender().set_webhook(&state.webhook_url).await {
        Ok(true) => {
            info!("웹훅 등록 요청 완료");
            (StatusCode::OK, WEBHOOK_SETUP_OK)
        }
        Ok(false) => (StatusCode::OK, WEBHOOK_SETUP_FAILED),
        Err(e) => {
            warn!(error = %e, "웹훅 등록 요청 실패");
            (StatusCode::OK, WEBHOOK_SETUP_FAILED)
        }
    }
}

/// 웹훅 라우터 생성.
///
/// # Arguments
/// * `webhook_path` - 업데이트 수신 경로 (`/{bot_token}`)
pub fn webhook_router(webhook_path: &str) -> Router<Arc<AppState>> {
    Router::new()
        .route(webhook_path, post(receive_update))
        .route("/set_webhook", get(set_webhook).post(set_webhook))
}
