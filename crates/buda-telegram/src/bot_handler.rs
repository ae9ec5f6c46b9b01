//! 텔레그램 봇 명령어 핸들러.
//!
//! 웹훅으로 받은 메시지를 명령어로 파싱하고 거래소 작업을 실행한 뒤
//! 텍스트 응답을 만듭니다.
//! - `/info` - 시세 요약
//! - `/balance` - 잔고 조회
//! - `/convert` - CLP/BTC 환산
//! - `/order` - 주문 생성/조회/취소

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use buda_core::Currency;
use buda_exchange::{ExchangeClient, ExchangeError};
use rust_decimal::Decimal;
use tracing::{debug, error, warn};

use crate::reply::{self, usage};
use crate::telegram::TelegramSender;
use crate::types::TelegramUpdate;

/// 명령어 처리 에러.
///
/// `Display` 결과가 그대로 사용자 응답이 됩니다.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// 인자 누락/형식 오류
    #[error("I can't understand. \nCommand should be: {0}.")]
    Usage(&'static str),

    /// 지원하지 않는 환산 통화
    #[error("Error: The currency youre converting must be either CLP or BTC")]
    UnsupportedCurrency,

    /// 거래소 호출 실패
    #[error("An error has occurred: {0}")]
    Exchange(#[from] ExchangeError),
}

/// `/order` 하위 명령어.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderCommand {
    /// 시장가 주문 생성
    Create { direction: String, amount: Decimal },
    /// 주문 상태 조회
    Status { order_id: String },
    /// 주문 취소
    Cancel { order_id: String },
}

/// 봇 명령어 타입.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    /// 시세 요약
    Info,
    /// 잔고 조회
    Balance,
    /// 통화 환산
    Convert { amount: Decimal, currency: Currency },
    /// 주문 관련 명령어
    Order(OrderCommand),
    /// 알 수 없는 명령어
    Unknown(String),
}

impl BotCommand {
    /// 텍스트에서 명령어 파싱.
    ///
    /// 메시지는 소문자로 바꾼 뒤 공백 단위로 나눕니다. 인자가 빠지거나 형식이
    /// 맞지 않으면 `CommandError::Usage`, 환산 통화가 CLP/BTC가 아니면
    /// `CommandError::UnsupportedCurrency`를 반환합니다.
    pub fn parse(text: &str) -> Result<Self, CommandError> {
        let text = text.to_lowercase();
        let parts: Vec<&str> = text.split_whitespace().collect();

        // 그룹 채팅의 "/info@my_bot" 형식 지원
        let command = parts
            .first()
            .map(|token| token.split('@').next().unwrap_or_default());

        match command {
            Some("/info") => Ok(BotCommand::Info),
            Some("/balance") => Ok(BotCommand::Balance),
            Some("/convert") => Self::parse_convert(&parts[1..]),
            Some("/order") => Self::parse_order(&parts[1..]).map(BotCommand::Order),
            _ => Ok(BotCommand::Unknown(text.trim().to_string())),
        }
    }

    fn parse_convert(args: &[&str]) -> Result<Self, CommandError> {
        let (Some(amount), Some(currency)) = (args.first(), args.get(1)) else {
            return Err(CommandError::Usage(usage::CONVERT));
        };

        let currency =
            Currency::from_str(currency).map_err(|_| CommandError::UnsupportedCurrency)?;
        let amount = parse_amount(amount).ok_or(CommandError::Usage(usage::CONVERT))?;

        Ok(BotCommand::Convert { amount, currency })
    }

    fn parse_order(args: &[&str]) -> Result<OrderCommand, CommandError> {
        match args.first().copied() {
            Some("create") => {
                let (Some(direction), Some(amount)) = (args.get(1), args.get(2)) else {
                    return Err(CommandError::Usage(usage::ORDER_CREATE));
                };
                let amount = parse_amount(amount).ok_or(CommandError::Usage(usage::ORDER_CREATE))?;

                Ok(OrderCommand::Create {
                    direction: direction.to_string(),
                    amount,
                })
            }
            Some("status") => {
                let order_id = args.get(1).ok_or(CommandError::Usage(usage::ORDER_STATUS))?;
                Ok(OrderCommand::Status {
                    order_id: order_id.to_string(),
                })
            }
            Some("cancel") => {
                let order_id = args.get(1).ok_or(CommandError::Usage(usage::ORDER_CANCEL))?;
                Ok(OrderCommand::Cancel {
                    order_id: order_id.to_string(),
                })
            }
            _ => Err(CommandError::Usage(usage::ORDER)),
        }
    }
}

/// 양수 10진수 금액 파싱.
fn parse_amount(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .ok()
        .filter(|amount| amount.is_sign_positive() && !amount.is_zero())
}

/// 명령어 디스패처.
///
/// 명령어마다 에러를 가두고 항상 응답 텍스트를 돌려줍니다.
pub struct CommandDispatcher {
    exchange: Arc<dyn ExchangeClient>,
}

impl CommandDispatcher {
    /// 새 디스패처 생성.
    pub fn new(exchange: Arc<dyn ExchangeClient>) -> Self {
        Self { exchange }
    }

    /// 메시지를 처리하고 응답 텍스트를 반환합니다.
    pub async fn dispatch(&self, text: &str) -> String {
        let result = match BotCommand::parse(text) {
            Ok(command) => {
                debug!(command = ?command, "명령어 수신");
                self.execute(command).await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(reply) => reply,
            Err(CommandError::Exchange(e)) => {
                error!(exchange = self.exchange.name(), error = %e, "거래소 호출 실패");
                reply::error_occurred(e)
            }
            Err(e) => {
                debug!(error = ?e, "명령어 검증 실패");
                e.to_string()
            }
        }
    }

    /// 명령어 실행.
    async fn execute(&self, command: BotCommand) -> Result<String, CommandError> {
        match command {
            BotCommand::Info => {
                let ticker = self.exchange.fetch_ticker().await?;
                Ok(reply::ticker(&ticker))
            }
            BotCommand::Balance => {
                let snapshot = self.exchange.fetch_balance().await?;
                Ok(reply::balance(&snapshot))
            }
            BotCommand::Convert { amount, currency } => {
                let conversion = self.exchange.convert(amount, currency).await?;
                Ok(reply::conversion(&conversion))
            }
            BotCommand::Order(order) => self.execute_order(order).await,
            BotCommand::Unknown(_) => Ok(reply::UNKNOWN_COMMAND.to_string()),
        }
    }

    async fn execute_order(&self, command: OrderCommand) -> Result<String, CommandError> {
        match command {
            OrderCommand::Create { direction, amount } => {
                let order = self.exchange.create_order(&direction, amount).await?;
                Ok(reply::order_created(&order))
            }
            OrderCommand::Status { order_id } => {
                let order = self.exchange.get_order_status(&order_id).await?;
                Ok(reply::order_status(&order))
            }
            OrderCommand::Cancel { order_id } => {
                let outcome = self.exchange.cancel_order(&order_id).await?;
                Ok(reply::cancel(outcome))
            }
        }
    }
}

/// 웹훅 업데이트 처리 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// 응답 전송 완료
    Sent,
    /// 텍스트 메시지가 아니어서 무시
    Ignored,
    /// 응답 전송 실패
    DeliveryFailed(String),
}

impl fmt::Display for WebhookOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebhookOutcome::Sent => f.write_str("Response sent successfully"),
            WebhookOutcome::Ignored => f.write_str("No message to handle"),
            WebhookOutcome::DeliveryFailed(e) => write!(
                f,
                "Failed to send response. An error has occurred. Error: {}",
                e
            ),
        }
    }
}

/// 텔레그램 봇.
///
/// 업데이트 하나당 명령어 하나를 처리하고 응답을 한 번 전송합니다.
pub struct TelegramBot {
    dispatcher: CommandDispatcher,
    sender: TelegramSender,
}

impl TelegramBot {
    /// 새 봇 생성.
    pub fn new(dispatcher: CommandDispatcher, sender: TelegramSender) -> Self {
        Self { dispatcher, sender }
    }

    /// 전송기 반환.
    pub fn sender(&self) -> &TelegramSender {
        &self.sender
    }

    /// 웹훅 업데이트 처리.
    ///
    /// 명령어 처리 실패는 응답 텍스트로 전달되고, 전송 실패만 `DeliveryFailed`가 됩니다.
    pub async fn handle_update(&self, update: &TelegramUpdate) -> WebhookOutcome {
        let Some((chat_id, text)) = update.text_message() else {
            debug!(update_id = update.update_id, "텍스트가 없는 업데이트 무시");
            return WebhookOutcome::Ignored;
        };

        let response = self.dispatcher.dispatch(text).await;

        match self.sender.send_message(chat_id, &response).await {
            Ok(()) => WebhookOutcome::Sent,
            Err(e) => {
                warn!(chat_id = chat_id, error = %e, "응답 전송 실패");
                WebhookOutcome::DeliveryFailed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(BotCommand::parse("/info").unwrap(), BotCommand::Info);
        assert_eq!(BotCommand::parse("  /INFO  ").unwrap(), BotCommand::Info);
        assert_eq!(BotCommand::parse("/info@buda_bot").unwrap(), BotCommand::Info);
        assert_eq!(BotCommand::parse("/balance extra").unwrap(), BotCommand::Balance);
    }

    #[test]
    fn test_parse_convert() {
        assert_eq!(
            BotCommand::parse("/convert 1000 CLP").unwrap(),
            BotCommand::Convert {
                amount: dec!(1000),
                currency: Currency::Clp
            }
        );
        assert_eq!(
            BotCommand::parse("/convert 0.25 btc").unwrap(),
            BotCommand::Convert {
                amount: dec!(0.25),
                currency: Currency::Btc
            }
        );
    }

    #[test]
    fn test_parse_convert_errors() {
        assert!(matches!(
            BotCommand::parse("/convert 1000 xyz"),
            Err(CommandError::UnsupportedCurrency)
        ));
        assert!(matches!(
            BotCommand::parse("/convert abc xyz"),
            Err(CommandError::UnsupportedCurrency)
        ));
        assert!(matches!(
            BotCommand::parse("/convert 1000"),
            Err(CommandError::Usage(usage::CONVERT))
        ));
        assert!(matches!(
            BotCommand::parse("/convert abc clp"),
            Err(CommandError::Usage(usage::CONVERT))
        ));
        assert!(matches!(
            BotCommand::parse("/convert -5 clp"),
            Err(CommandError::Usage(usage::CONVERT))
        ));
    }

    #[test]
    fn test_parse_order_commands() {
        assert_eq!(
            BotCommand::parse("/order create buy 0.01").unwrap(),
            BotCommand::Order(OrderCommand::Create {
                direction: "buy".to_string(),
                amount: dec!(0.01)
            })
        );
        // 방향은 검증하지 않고 그대로 전달
        assert_eq!(
            BotCommand::parse("/order create Sideways 1").unwrap(),
            BotCommand::Order(OrderCommand::Create {
                direction: "sideways".to_string(),
                amount: dec!(1)
            })
        );
        assert_eq!(
            BotCommand::parse("/order status 123").unwrap(),
            BotCommand::Order(OrderCommand::Status {
                order_id: "123".to_string()
            })
        );
        assert_eq!(
            BotCommand::parse("/order cancel 123").unwrap(),
            BotCommand::Order(OrderCommand::Cancel {
                order_id: "123".to_string()
            })
        );
    }

    #[test]
    fn test_parse_order_usage_errors() {
        for text in ["/order", "/order foo", "/order   "] {
            assert!(matches!(
                BotCommand::parse(text),
                Err(CommandError::Usage(usage::ORDER))
            ));
        }
        assert!(matches!(
            BotCommand::parse("/order create buy"),
            Err(CommandError::Usage(usage::ORDER_CREATE))
        ));
        assert!(matches!(
            BotCommand::parse("/order status"),
            Err(CommandError::Usage(usage::ORDER_STATUS))
        ));
        assert!(matches!(
            BotCommand::parse("/order cancel"),
            Err(CommandError::Usage(usage::ORDER_CANCEL))
        ));
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(
            BotCommand::parse("/price"),
            Ok(BotCommand::Unknown(_))
        ));
        assert!(matches!(BotCommand::parse("hola"), Ok(BotCommand::Unknown(_))));
        assert!(matches!(BotCommand::parse(""), Ok(BotCommand::Unknown(_))));
    }

    #[test]
    fn test_command_error_messages() {
        assert_eq!(
            CommandError::Usage(usage::ORDER).to_string(),
            reply::usage_hint(usage::ORDER)
        );
        assert_eq!(
            CommandError::UnsupportedCurrency.to_string(),
            reply::UNSUPPORTED_CURRENCY
        );
        assert_eq!(
            CommandError::Exchange(ExchangeError::Timeout("30s".to_string())).to_string(),
            "An error has occurred: Request timeout: 30s"
        );
    }

    #[test]
    fn test_webhook_outcome_display() {
        assert_eq!(WebhookOutcome::Sent.to_string(), "Response sent successfully");
        assert_eq!(
            WebhookOutcome::DeliveryFailed("HTTP 400".to_string()).to_string(),
            "Failed to send response. An error has occurred. Error: HTTP 400"
        );
    }
}
