//! HTTP 라우트.
//!
//! # 라우트 구조
//!
//! - `/` - 루트
//! - `/health` - 헬스 체크 (liveness)
//! - `/{bot_token}` - 텔레그램 업데이트 수신
//! - `/set_webhook` - 텔레그램 웹훅 등록

pub mod health;
pub mod webhook;

use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, Router};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub use health::{health_check, health_router, index};
pub use webhook::{receive_update, set_webhook, webhook_router};

/// 요청 타임아웃 (초).
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// 전체 라우터 생성.
pub fn create_router(state: Arc<AppState>) -> Router {
    let webhook_path = state.webhook_path();

    Router::new()
        .merge(health_router())
        .merge(webhook_router(&webhook_path))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // 거래소 호출이 길어져도 408로 끊음
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        ))
}
