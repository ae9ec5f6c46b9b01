//! 거래소 trait 정의.

use async_trait::async_trait;
use buda_core::{BalanceSnapshot, CancelOutcome, Conversion, Currency, OrderRecord, Ticker};
use rust_decimal::Decimal;

use crate::ExchangeError;

/// 거래소 작업을 위한 Result 타입.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// 봇 명령어가 사용하는 거래소 작업.
///
/// 각 작업은 재시도 없이 HTTP 호출 한두 번으로 끝납니다.
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// 거래소 이름 반환.
    fn name(&self) -> &str;

    // === 시장 데이터 ===

    /// 현재 시세 조회 (공개 API).
    async fn fetch_ticker(&self) -> ExchangeResult<Ticker>;

    /// 최저 매도 호가 기준 통화 환산.
    async fn convert(&self, amount: Decimal, from: Currency) -> ExchangeResult<Conversion>;

    // === 계좌 ===

    /// BTC/CLP 잔고와 BTC의 CLP 환산 금액 조회.
    async fn fetch_balance(&self) -> ExchangeResult<BalanceSnapshot>;

    // === 주문 ===

    /// 시장가 주문 생성. `direction`은 해석 없이 거래소에 그대로 전달됩니다.
    async fn create_order(&self, direction: &str, amount: Decimal) -> ExchangeResult<OrderRecord>;

    /// 주문 상태 조회.
    async fn get_order_status(&self, order_id: &str) -> ExchangeResult<OrderRecord>;

    /// 주문 취소 요청.
    async fn cancel_order(&self, order_id: &str) -> ExchangeResult<CancelOutcome>;
}
