//! # Buda Telegram
//!
//! 텔레그램 웹훅으로 들어온 메시지를 거래소 명령어로 처리합니다.
//!
//! # 봇 명령어
//!
//! - `/info` - BTC-CLP 시세 요약
//! - `/balance` - BTC/CLP 잔고
//! - `/convert [amount] [clp | btc]` - 최저 매도 호가 기준 환산
//! - `/order create [direction] [btc_amount]` - 시장가 주문
//! - `/order status [order_id]` - 주문 상태
//! - `/order cancel [order_id]` - 주문 취소

pub mod bot_handler;
pub mod reply;
pub mod telegram;
pub mod types;

pub use bot_handler::*;
pub use telegram::*;
pub use types::*;
