//! 잔고 스냅샷.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::Currency;

/// 통화 코드별 잔고.
///
/// 거래소가 돌려주는 잔고 목록을 통화 코드로 조회할 수 있게 바꿉니다.
/// 목록 순서에 의존하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Balances {
    amounts: HashMap<String, Decimal>,
}

impl Balances {
    /// `(통화 코드, 금액)` 목록에서 생성합니다.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: AsRef<str>,
    {
        let amounts = entries
            .into_iter()
            .map(|(code, amount)| (code.as_ref().to_uppercase(), amount))
            .collect();
        Self { amounts }
    }

    /// 통화 잔고 조회.
    pub fn get(&self, currency: Currency) -> Option<Decimal> {
        self.amounts.get(currency.code()).copied()
    }
}

/// 잔고 스냅샷.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    /// BTC 보유량
    pub btc: Decimal,
    /// CLP 보유량
    pub clp: Decimal,
    /// BTC 보유량의 CLP 환산 금액
    pub btc_in_clp: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_lookup_by_code_ignores_order() {
        let balances = Balances::from_entries([
            ("CLP", dec!(150000)),
            ("ETH", dec!(3)),
            ("btc", dec!(0.25)),
        ]);

        assert_eq!(balances.get(Currency::Btc), Some(dec!(0.25)));
        assert_eq!(balances.get(Currency::Clp), Some(dec!(150000)));
    }

    #[test]
    fn test_missing_currency() {
        let balances = Balances::from_entries([("ETH", dec!(1))]);
        assert_eq!(balances.get(Currency::Btc), None);
        assert_eq!(Balances::default().get(Currency::Clp), None);
    }
}
