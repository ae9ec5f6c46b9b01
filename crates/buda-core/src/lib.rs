//! # Buda Core
//!
//! Buda 트레이딩 봇의 핵심 값 타입과 공통 인프라를 제공합니다.
//!
//! - 시세/잔고/주문 스냅샷 타입
//! - 통화 및 금액 표현
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use types::*;
