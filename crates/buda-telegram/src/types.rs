//! 텔레그램 업데이트 타입 및 전송 에러.

use serde::Deserialize;

/// 웹훅으로 수신한 텔레그램 업데이트.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramUpdate {
    /// 업데이트 ID
    pub update_id: i64,
    /// 일반 메시지 (편집/채널 게시물 등은 무시)
    #[serde(default)]
    pub message: Option<TelegramMessage>,
}

impl TelegramUpdate {
    /// 텍스트 메시지인 경우 `(chat_id, text)` 반환.
    pub fn text_message(&self) -> Option<(i64, &str)> {
        let message = self.message.as_ref()?;
        let text = message.text.as_deref()?;
        Some((message.chat.id, text))
    }
}

/// 메시지 정보.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramMessage {
    /// 메시지 ID
    pub message_id: i64,
    /// 보낸 사용자
    #[serde(default)]
    pub from: Option<TelegramUser>,
    /// 채팅
    pub chat: TelegramChat,
    /// 본문
    #[serde(default)]
    pub text: Option<String>,
    /// 전송 시각 (Unix 초)
    #[serde(default)]
    pub date: i64,
}

/// 사용자 정보.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramUser {
    /// 사용자 ID
    pub id: i64,
    /// 사용자명
    #[serde(default)]
    pub username: Option<String>,
}

/// 채팅 정보.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramChat {
    /// 채팅 ID
    pub id: i64,
}

/// Bot API 공통 응답.
#[derive(Debug, Deserialize)]
pub(crate) struct TelegramApiResponse {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub description: Option<String>,
}

/// 텔레그램 작업용 Result 타입.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// 텔레그램 전송 에러.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("메시지 전송 실패: {0}")]
    SendFailed(String),

    #[error("잘못된 설정: {0}")]
    InvalidConfig(String),

    #[error("네트워크 에러: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("직렬화 에러: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_update() {
        let update: TelegramUpdate = serde_json::from_str(
            r#"{
                "update_id": 10000,
                "message": {
                    "message_id": 1365,
                    "from": {"id": 1111111, "is_bot": false, "first_name": "Test", "username": "test"},
                    "chat": {"id": 1111111, "type": "private", "first_name": "Test"},
                    "date": 1441645532,
                    "text": "/info"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(update.text_message(), Some((1111111, "/info")));
    }

    #[test]
    fn test_update_without_text() {
        let update: TelegramUpdate = serde_json::from_str(
            r#"{
                "update_id": 10001,
                "message": {
                    "message_id": 1366,
                    "chat": {"id": 42},
                    "date": 1441645532,
                    "sticker": {"file_id": "abc"}
                }
            }"#,
        )
        .unwrap();
        assert_eq!(update.text_message(), None);

        let update: TelegramUpdate =
            serde_json::from_str(r#"{"update_id": 10002, "edited_message": {}}"#).unwrap();
        assert!(update.message.is_none());
    }
}
