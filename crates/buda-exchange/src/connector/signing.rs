//! Buda 비공개 API 요청 서명.
//!
//! 서명 대상 메시지는 다음 요소를 공백으로 이어 붙인 문자열입니다:
//! `{METHOD} {path?query} [{base64(body)}] {nonce}`
//!
//! 본문이 비어 있으면 base64 요소는 생략됩니다. 서명은 API 시크릿을 키로 한
//! HMAC-SHA384의 소문자 hex 문자열입니다.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha384;

use crate::error::ExchangeError;
use crate::traits::ExchangeResult;

type HmacSha384 = Hmac<Sha384>;

/// API 키 헤더.
pub const HEADER_API_KEY: &str = "X-SBTC-APIKEY";
/// nonce 헤더.
pub const HEADER_NONCE: &str = "X-SBTC-NONCE";
/// 서명 헤더.
pub const HEADER_SIGNATURE: &str = "X-SBTC-SIGNATURE";

/// 엄격하게 증가하는 nonce 생성기.
///
/// 기본값은 Unix epoch 이후 마이크로초입니다. 같은 마이크로초 안에 여러 요청이
/// 서명되거나 시계가 뒤로 가더라도 직전 값보다 1 이상 큰 값을 반환합니다.
#[derive(Debug, Default)]
pub struct NonceGenerator {
    last: AtomicU64,
}

impl NonceGenerator {
    /// 새 생성기.
    pub fn new() -> Self {
        Self::default()
    }

    /// 다음 nonce.
    pub fn next(&self) -> u64 {
        let now = Self::now_micros();
        let advance = |last: u64| now.max(last.saturating_add(1));

        // 클로저가 항상 Some을 반환하므로 Err는 발생하지 않음
        let previous = match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(advance(last)))
        {
            Ok(previous) | Err(previous) => previous,
        };

        advance(previous)
    }

    fn now_micros() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as u64)
            .unwrap_or(0)
    }
}

/// 요청에 붙일 인증 헤더 값.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// API 키
    pub api_key: String,
    /// nonce (10진수 문자열)
    pub nonce: String,
    /// HMAC-SHA384 hex 서명
    pub signature: String,
}

impl SignedHeaders {
    /// `(헤더 이름, 값)` 목록.
    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            (HEADER_API_KEY, self.api_key.as_str()),
            (HEADER_NONCE, self.nonce.as_str()),
            (HEADER_SIGNATURE, self.signature.as_str()),
        ]
    }
}

/// Buda HMAC 서명기.
pub struct BudaSigner {
    api_key: String,
    api_secret: String,
    nonces: NonceGenerator,
}

impl BudaSigner {
    /// 새 서명기 생성.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            nonces: NonceGenerator::new(),
        }
    }

    /// 서명 대상 메시지 생성.
    pub fn message(method: &str, path: &str, body: &[u8], nonce: &str) -> String {
        let mut components = vec![method.to_string(), path.to_string()];
        if !body.is_empty() {
            components.push(BASE64.encode(body));
        }
        components.push(nonce.to_string());
        components.join(" ")
    }

    /// 주어진 nonce로 서명.
    pub fn sign(&self, method: &str, path: &str, body: &[u8], nonce: &str) -> ExchangeResult<String> {
        let mut mac = HmacSha384::new_from_slice(self.api_secret.as_bytes())
            .map_err(|e| ExchangeError::Unauthorized(format!("Invalid API secret: {}", e)))?;
        mac.update(Self::message(method, path, body, nonce).as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// 새 nonce를 발급하고 인증 헤더를 생성합니다.
    ///
    /// `body`는 실제로 전송할 바이트와 같아야 합니다.
    pub fn headers(&self, method: &str, path: &str, body: &[u8]) -> ExchangeResult<SignedHeaders> {
        let nonce = self.nonces.next().to_string();
        let signature = self.sign(method, path, body, &nonce)?;

        Ok(SignedHeaders {
            api_key: self.api_key.clone(),
            nonce,
            signature,
        })
    }
}
