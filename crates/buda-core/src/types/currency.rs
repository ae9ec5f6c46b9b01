//! 통화 및 금액 타입.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// BTC-CLP 마켓에서 다루는 통화.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// 비트코인
    Btc,
    /// 칠레 페소
    Clp,
}

impl Currency {
    /// 거래소에서 사용하는 통화 코드.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Btc => "BTC",
            Currency::Clp => "CLP",
        }
    }

    /// BTC-CLP 마켓에서 반대편 통화.
    pub fn counterpart(&self) -> Currency {
        match self {
            Currency::Btc => Currency::Clp,
            Currency::Clp => Currency::Btc,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "btc" => Ok(Currency::Btc),
            "clp" => Ok(Currency::Clp),
            _ => Err(CoreError::UnsupportedCurrency(s.to_string())),
        }
    }
}

/// 통화 코드가 붙은 금액.
///
/// 거래소는 금액을 `["31000000.0", "CLP"]` 형태의 2원소 배열로 전달합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Decimal, String)", into = "(Decimal, String)")]
pub struct Amount {
    /// 수치
    pub value: Decimal,
    /// 통화 코드 (거래소 표기 그대로)
    pub currency: String,
}

impl Amount {
    /// 새 금액 생성.
    pub fn new(value: Decimal, currency: impl Into<String>) -> Self {
        Self {
            value,
            currency: currency.into(),
        }
    }
}

impl From<(Decimal, String)> for Amount {
    fn from((value, currency): (Decimal, String)) -> Self {
        Self { value, currency }
    }
}

impl From<Amount> for (Decimal, String) {
    fn from(amount: Amount) -> Self {
        (amount.value, amount.currency)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}
