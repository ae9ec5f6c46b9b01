//! Buda.com 거래소 커넥터.
//!
//! BTC-CLP 마켓의 공개 시세 조회와 서명된 잔고/주문 REST API 구현.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use buda_core::{
    Amount, BalanceSnapshot, Balances, CancelOutcome, Conversion, Currency, ExchangeSettings,
    OrderRecord, Ticker,
};
use reqwest::{header::CONTENT_TYPE, Client, Method, Url};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::signing::BudaSigner;
use crate::traits::{ExchangeClient, ExchangeResult};
use crate::ExchangeError;

/// 기본 REST API URL.
pub const DEFAULT_BASE_URL: &str = "https://www.buda.com";

/// 봇이 거래하는 마켓.
pub const DEFAULT_MARKET_ID: &str = "btc-clp";

// ============================================================================
// 설정
// ============================================================================

/// Buda 클라이언트 설정.
///
/// # 보안
/// - `Debug` 구현은 민감 정보(`api_key`, `api_secret`)를 마스킹합니다.
#[derive(Clone)]
pub struct BudaConfig {
    /// API 키
    pub api_key: String,
    /// API 시크릿
    pub api_secret: String,
    /// REST API 기본 URL
    pub base_url: String,
    /// 마켓 ID
    pub market_id: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl fmt::Debug for BudaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masked_key = if self.api_key.chars().count() > 8 {
            let head: String = self.api_key.chars().take(4).collect();
            let tail: String = {
                let mut tail: Vec<char> = self.api_key.chars().rev().take(4).collect();
                tail.reverse();
                tail.into_iter().collect()
            };
            format!("{}...{}", head, tail)
        } else {
            "***REDACTED***".to_string()
        };

        f.debug_struct("BudaConfig")
            .field("api_key", &masked_key)
            .field("api_secret", &"***REDACTED***")
            .field("base_url", &self.base_url)
            .field("market_id", &self.market_id)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl BudaConfig {
    /// 새 설정 생성.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            market_id: DEFAULT_MARKET_ID.to_string(),
            timeout_secs: 30,
        }
    }

    /// REST API 기본 URL 변경.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// 요청 타임아웃 변경.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// 애플리케이션 설정의 거래소 섹션에서 생성.
    pub fn from_settings(settings: &ExchangeSettings) -> Self {
        Self::new(settings.api_key.clone(), settings.api_secret.clone())
            .with_base_url(settings.base_url.clone())
            .with_timeout_secs(settings.timeout_secs)
    }
}

// ============================================================================
// API 요청/응답 타입
// ============================================================================

#[derive(Debug, Deserialize)]
struct BudaTickerResponse {
    ticker: BudaTicker,
}

#[derive(Debug, Deserialize)]
struct BudaTicker {
    min_ask: Amount,
    volume: Amount,
    price_variation_24h: String,
    price_variation_7d: String,
}

#[derive(Debug, Deserialize)]
struct BudaBalancesResponse {
    balances: Vec<BudaBalance>,
}

#[derive(Debug, Deserialize)]
struct BudaBalance {
    /// 통화 코드 (예: "BTC")
    id: String,
    amount: Amount,
}

#[derive(Debug, Deserialize)]
struct BudaOrderResponse {
    order: BudaOrder,
}

#[derive(Debug, Deserialize)]
struct BudaOrder {
    id: u64,
    market_id: String,
    #[serde(rename = "type")]
    order_type: String,
    state: String,
    #[serde(default)]
    amount: Option<Amount>,
    #[serde(default)]
    traded_amount: Option<Amount>,
    #[serde(default)]
    total_exchanged: Option<Amount>,
    #[serde(default)]
    paid_fee: Option<Amount>,
}

impl From<BudaOrder> for OrderRecord {
    fn from(order: BudaOrder) -> Self {
        Self {
            order_id: order.id.to_string(),
            market_id: order.market_id,
            order_type: order.order_type,
            status: order.state,
            amount: order.amount,
            traded_amount: order.traded_amount,
            paid: order.total_exchanged,
            fee: order.paid_fee,
        }
    }
}

#[derive(Debug, Serialize)]
struct BudaNewOrder<'a> {
    #[serde(rename = "type")]
    order_type: &'a str,
    price_type: &'static str,
    amount: Decimal,
}

#[derive(Debug, Serialize)]
struct BudaOrderStateUpdate {
    state: &'static str,
}

#[derive(Debug, Deserialize)]
struct BudaError {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

// ============================================================================
// Buda 클라이언트
// ============================================================================

/// Buda 거래소 클라이언트.
pub struct BudaClient {
    config: BudaConfig,
    client: Client,
    signer: BudaSigner,
}

impl BudaClient {
    /// 새 Buda 클라이언트 생성.
    ///
    /// # Errors
    /// HTTP 클라이언트 생성에 실패하면 `ExchangeError::NetworkError`를 반환합니다.
    pub fn new(config: BudaConfig) -> ExchangeResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                ExchangeError::NetworkError(format!("HTTP 클라이언트 생성 실패: {}", e))
            })?;
        let signer = BudaSigner::new(config.api_key.clone(), config.api_secret.clone());

        Ok(Self {
            config,
            client,
            signer,
        })
    }

    /// 엔드포인트 전체 URL.
    fn url(&self, endpoint: &str) -> ExchangeResult<Url> {
        let raw = format!("{}{}", self.config.base_url, endpoint);
        Url::parse(&raw).map_err(|e| ExchangeError::InvalidRequest(format!("{}: {}", raw, e)))
    }

    /// 서명에 사용할 경로 (쿼리 문자열 포함).
    fn path_with_query(url: &Url) -> String {
        match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        }
    }

    /// 공개 API 요청 (인증 불필요).
    async fn public_get<T: DeserializeOwned>(&self, endpoint: &str) -> ExchangeResult<T> {
        let url = self.url(endpoint)?;

        debug!("GET {}", endpoint);

        let response = self.client.get(url).send().await?;
        self.handle_response(response).await
    }

    /// 서명된 API 요청.
    ///
    /// 본문은 한 번만 직렬화하고, 서명한 바이트를 그대로 전송합니다.
    async fn signed_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> ExchangeResult<T> {
        let url = self.url(endpoint)?;
        let path = Self::path_with_query(&url);
        let body = match body {
            Some(body) => serde_json::to_vec(body)?,
            None => Vec::new(),
        };

        let headers = self.signer.headers(method.as_str(), &path, &body)?;

        debug!(method = %method, nonce = %headers.nonce, "{} (signed)", path);

        let mut request = self.client.request(method, url);
        for (name, value) in headers.pairs() {
            request = request.header(name, value);
        }
        if !body.is_empty() {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// 서명된 GET 요청.
    async fn signed_get<T: DeserializeOwned>(&self, endpoint: &str) -> ExchangeResult<T> {
        self.signed_request::<T, ()>(Method::GET, endpoint, None)
            .await
    }

    /// API 응답 처리.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ExchangeResult<T> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&body).map_err(|e| {
                error!("Failed to parse response: {} - Body: {}", e, body);
                ExchangeError::ParseError(e.to_string())
            })
        } else {
            let message = match serde_json::from_str::<BudaError>(&body) {
                Ok(error) => match error.code {
                    Some(code) => format!("{} ({})", error.message, code),
                    None => error.message,
                },
                Err(_) => body,
            };

            error!(status = status.as_u16(), "Buda API error: {}", message);

            Err(match status.as_u16() {
                401 | 403 => ExchangeError::Unauthorized(message),
                404 => ExchangeError::OrderNotFound(message),
                code => ExchangeError::ApiError { code, message },
            })
        }
    }

    /// 주문 엔드포인트 경로. 주문 ID는 경로 세그먼트 하나여야 합니다.
    fn order_endpoint(order_id: &str) -> ExchangeResult<String> {
        if order_id.is_empty() || !order_id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ExchangeError::InvalidRequest(format!(
                "Invalid order id: {}",
                order_id
            )));
        }
        Ok(format!("/api/v2/orders/{}", order_id))
    }
}

#[async_trait]
impl ExchangeClient for BudaClient {
    fn name(&self) -> &str {
        "Buda"
    }

    async fn fetch_ticker(&self) -> ExchangeResult<Ticker> {
        let endpoint = format!("/api/v2/markets/{}/ticker", self.config.market_id);
        let resp: BudaTickerResponse = self.public_get(&endpoint).await?;

        Ok(Ticker {
            min_ask: resp.ticker.min_ask,
            volume: resp.ticker.volume,
            price_variation_24h: resp.ticker.price_variation_24h,
            price_variation_7d: resp.ticker.price_variation_7d,
        })
    }

    async fn convert(&self, amount: Decimal, from: Currency) -> ExchangeResult<Conversion> {
        let ticker = self.fetch_ticker().await?;
        let min_ask = ticker.min_ask.value;

        Conversion::at_min_ask(amount, from, min_ask).ok_or_else(|| {
            ExchangeError::ParseError(format!(
                "Cannot convert {} {} at min ask {}",
                amount, from, min_ask
            ))
        })
    }

    async fn fetch_balance(&self) -> ExchangeResult<BalanceSnapshot> {
        let resp: BudaBalancesResponse = self.signed_get("/api/v2/balances").await?;
        let balances =
            Balances::from_entries(resp.balances.into_iter().map(|b| (b.id, b.amount.value)));

        let lookup = |currency: Currency| {
            balances
                .get(currency)
                .ok_or_else(|| ExchangeError::AssetNotFound(currency.code().to_string()))
        };
        let btc = lookup(Currency::Btc)?;
        let clp = lookup(Currency::Clp)?;

        let conversion = self.convert(btc, Currency::Btc).await?;

        Ok(BalanceSnapshot {
            btc,
            clp,
            btc_in_clp: conversion.result,
        })
    }

    async fn create_order(&self, direction: &str, amount: Decimal) -> ExchangeResult<OrderRecord> {
        let endpoint = format!("/api/v2/markets/{}/orders", self.config.market_id);
        let order = BudaNewOrder {
            order_type: direction,
            price_type: "market",
            amount,
        };

        let resp: BudaOrderResponse = self
            .signed_request(Method::POST, &endpoint, Some(&order))
            .await?;
        Ok(resp.order.into())
    }

    async fn get_order_status(&self, order_id: &str) -> ExchangeResult<OrderRecord> {
        let endpoint = Self::order_endpoint(order_id)?;
        let resp: BudaOrderResponse = self.signed_get(&endpoint).await?;
        Ok(resp.order.into())
    }

    async fn cancel_order(&self, order_id: &str) -> ExchangeResult<CancelOutcome> {
        let endpoint = Self::order_endpoint(order_id)?;
        let update = BudaOrderStateUpdate { state: "canceling" };

        let resp: BudaOrderResponse = self
            .signed_request(Method::PUT, &endpoint, Some(&update))
            .await?;
        Ok(CancelOutcome::from_state(&resp.order.state))
    }
}
