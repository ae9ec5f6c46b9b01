//! 시세 스냅샷 및 환산 결과.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::{Amount, Currency};

/// 시세 스냅샷.
///
/// 공개 ticker 엔드포인트의 응답 중 봇이 사용하는 필드만 담습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    /// 최저 매도 호가
    pub min_ask: Amount,
    /// 24시간 거래량
    pub volume: Amount,
    /// 24시간 가격 변동률 (거래소 표기 그대로)
    pub price_variation_24h: String,
    /// 7일 가격 변동률 (거래소 표기 그대로)
    pub price_variation_7d: String,
}

/// 통화 환산 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    /// 입력 금액
    pub amount: Decimal,
    /// 입력 통화
    pub from: Currency,
    /// 결과 통화
    pub to: Currency,
    /// 환산 금액
    pub result: Decimal,
    /// 환산에 사용한 최저 매도 호가
    pub rate: Decimal,
}

impl Conversion {
    /// 최저 매도 호가 하나로 환산합니다.
    ///
    /// `clp → btc`는 나눗셈, `btc → clp`는 곱셈이며 매수/매도 호가를 구분하지 않습니다.
    /// 호가가 0이거나 결과가 표현 범위를 넘으면 `None`을 반환합니다.
    pub fn at_min_ask(amount: Decimal, from: Currency, min_ask: Decimal) -> Option<Self> {
        let result = match from {
            Currency::Clp => amount.checked_div(min_ask)?,
            Currency::Btc => amount.checked_mul(min_ask)?,
        };

        Some(Self {
            amount,
            from,
            to: from.counterpart(),
            result: result.normalize(),
            rate: min_ask,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_clp_to_btc_divides_by_min_ask() {
        let conversion = Conversion::at_min_ask(dec!(31000), Currency::Clp, dec!(31000000))
            .expect("환산 실패");
        assert_eq!(conversion.to, Currency::Btc);
        assert_eq!(conversion.result, dec!(0.001));
        assert_eq!(conversion.rate, dec!(31000000));
    }

    #[test]
    fn test_btc_to_clp_multiplies_by_min_ask() {
        let conversion = Conversion::at_min_ask(dec!(0.5), Currency::Btc, dec!(31000000.0))
            .expect("환산 실패");
        assert_eq!(conversion.to, Currency::Clp);
        assert_eq!(conversion.result, dec!(15500000));
        assert_eq!(conversion.result.to_string(), "15500000");
    }

    #[test]
    fn test_zero_min_ask() {
        assert!(Conversion::at_min_ask(dec!(1000), Currency::Clp, Decimal::ZERO).is_none());
        let conversion = Conversion::at_min_ask(dec!(1), Currency::Btc, Decimal::ZERO)
            .expect("곱셈은 0 호가에서도 성공");
        assert_eq!(conversion.result, Decimal::ZERO);
    }
}
