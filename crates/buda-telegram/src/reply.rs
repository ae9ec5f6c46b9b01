//! 명령어 응답 문구.

use buda_core::{Amount, BalanceSnapshot, CancelOutcome, Conversion, OrderRecord, Ticker};

/// 알 수 없는 명령어 응답.
pub const UNKNOWN_COMMAND: &str = "I don't understand :(";

/// 지원하지 않는 통화 응답.
pub const UNSUPPORTED_CURRENCY: &str =
    "Error: The currency youre converting must be either CLP or BTC";

/// 이미 체결된 주문의 취소 응답.
pub const CANCEL_ALREADY_TRADED: &str = "Unable to cancel order, order was already fulfilled.";

/// 취소 진행 중 응답.
pub const CANCEL_IN_PROCESS: &str =
    "Order cancel in process. Check buda.com or run '/order status [order_id]' to make sure it works.";

/// 명령어 사용법.
pub mod usage {
    pub const CONVERT: &str = "/convert [amount] [clp | btc]";
    pub const ORDER: &str = "/order [create | status | cancel]";
    pub const ORDER_CREATE: &str = "/order create [buy | sell] [btc_amount]";
    pub const ORDER_STATUS: &str = "/order status [order_id]";
    pub const ORDER_CANCEL: &str = "/order cancel [order_id]";
}

/// 사용법 안내 문구.
pub fn usage_hint(usage: &str) -> String {
    format!("I can't understand. \nCommand should be: {}.", usage)
}

/// 거래소/통신 에러 문구.
pub fn error_occurred(message: impl std::fmt::Display) -> String {
    format!("An error has occurred: {}", message)
}

/// `/info` 응답.
pub fn ticker(ticker: &Ticker) -> String {
    format!(
        "Min ask: {}, \n24h vol: {}, \n24h var: {}%, \n7d var: {}%",
        ticker.min_ask, ticker.volume, ticker.price_variation_24h, ticker.price_variation_7d
    )
}

/// `/balance` 응답.
pub fn balance(snapshot: &BalanceSnapshot) -> String {
    format!(
        "BTC: {} ({}CLP), \nCLP: {}",
        snapshot.btc, snapshot.btc_in_clp, snapshot.clp
    )
}

/// `/convert` 응답.
pub fn conversion(conversion: &Conversion) -> String {
    format!(
        "{}{} is equal to {}{}",
        conversion.amount,
        conversion.from.code().to_lowercase(),
        conversion.result,
        conversion.to
    )
}

fn amount_or_na(amount: &Option<Amount>) -> String {
    amount
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "N/A".to_string())
}

/// `/order create` 응답.
pub fn order_created(order: &OrderRecord) -> String {
    format!(
        "Order created successfully! \n Order details: \n \nOrder ID: {}, \nMarket ID: {}, \nType: {}, \nStatus: {}, \nOrdered: {}",
        order.order_id,
        order.market_id,
        order.order_type,
        order.status,
        amount_or_na(&order.amount)
    )
}

/// `/order status` 응답.
pub fn order_status(order: &OrderRecord) -> String {
    format!(
        "Order ID: {}, \nMarket ID: {}, \nType: {}, \nStatus: {}, \nTraded: {}, \nPaid: {}, \nFee: {}",
        order.order_id,
        order.market_id,
        order.order_type,
        order.status,
        amount_or_na(&order.traded_amount),
        amount_or_na(&order.paid),
        amount_or_na(&order.fee)
    )
}

/// `/order cancel` 응답.
pub fn cancel(outcome: CancelOutcome) -> String {
    match outcome {
        CancelOutcome::AlreadyTraded => CANCEL_ALREADY_TRADED,
        CancelOutcome::InProcess => CANCEL_IN_PROCESS,
    }
    .to_string()
}
