//! 주문 레코드.

use serde::{Deserialize, Serialize};

use super::currency::Amount;

/// 주문 레코드.
///
/// 주문 생성/조회 응답 하나를 평탄화한 값입니다. 봇은 응답 이후 사본을 보관하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// 주문 ID
    pub order_id: String,
    /// 마켓 ID (예: "BTC-CLP")
    pub market_id: String,
    /// 주문 방향 (거래소 표기 그대로, 예: "Bid", "Ask")
    pub order_type: String,
    /// 주문 상태 (예: "pending", "traded", "canceled")
    pub status: String,
    /// 주문 수량
    pub amount: Option<Amount>,
    /// 체결 수량
    pub traded_amount: Option<Amount>,
    /// 체결 대금
    pub paid: Option<Amount>,
    /// 수수료
    pub fee: Option<Amount>,
}

/// 주문 취소 요청 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelOutcome {
    /// 이미 전량 체결되어 취소할 수 없음
    AlreadyTraded,
    /// 취소 진행 중
    InProcess,
}

impl CancelOutcome {
    /// 취소 요청 후 거래소가 돌려준 상태에서 결과를 판정합니다.
    pub fn from_state(state: &str) -> Self {
        if state == "traded" {
            CancelOutcome::AlreadyTraded
        } else {
            CancelOutcome::InProcess
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_outcome_from_state() {
        assert_eq!(CancelOutcome::from_state("traded"), CancelOutcome::AlreadyTraded);
        assert_eq!(CancelOutcome::from_state("canceling"), CancelOutcome::InProcess);
        assert_eq!(CancelOutcome::from_state("pending"), CancelOutcome::InProcess);
        assert_eq!(CancelOutcome::from_state("Traded"), CancelOutcome::InProcess);
    }
}
