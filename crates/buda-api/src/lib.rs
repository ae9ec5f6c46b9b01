//! 텔레그램 웹훅 HTTP 서버.
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: 웹훅/헬스 체크 엔드포인트

pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
