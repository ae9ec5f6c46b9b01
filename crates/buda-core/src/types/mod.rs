//! 거래소 응답을 요청 단위로 표현하는 값 타입.
//!
//! 모든 타입은 한 번의 메시지 처리 동안만 존재하며 저장되지 않습니다.

mod account;
mod currency;
mod market;
mod order;

pub use account::*;
pub use currency::*;
pub use market::*;
pub use order::*;
