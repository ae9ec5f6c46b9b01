//! Buda.com 거래소 연결.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - `ExchangeClient` trait: 봇 명령어가 사용하는 거래소 작업
//! - Buda 커넥터 (공개/서명된 REST 요청)
//! - HMAC-SHA384 요청 서명 및 단조 증가 nonce

pub mod connector;
pub mod error;
pub mod traits;

pub use connector::buda::{BudaClient, BudaConfig};
pub use connector::signing::{BudaSigner, NonceGenerator, SignedHeaders};
pub use error::*;
pub use traits::*;
