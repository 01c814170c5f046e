//! Value objects for the room domain.

use uuid::Uuid;

use super::error::{DisplayNameError, RoomIdError};

/// Maximum display name length in characters (after trimming).
pub const MAX_DISPLAY_NAME_CHARS: usize = 50;

/// User-chosen room key. Opaque, case-sensitive, trimmed on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(raw: &str) -> Result<Self, RoomIdError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RoomIdError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Display name assigned once at join time. Trimmed, 1-50 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(raw: &str) -> Result<Self, DisplayNameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DisplayNameError::Empty);
        }
        let length = trimmed.chars().count();
        if length > MAX_DISPLAY_NAME_CHARS {
            return Err(DisplayNameError::TooLong { length });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Opaque id issued at transport accept time, used as the membership map
/// key. Decoupled from the transport object so fake connections work in
/// tests.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Network-derived deduplication key for a connection. Never exposed to
/// other clients; distinct from the display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientIdentity(String);

impl ClientIdentity {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Random message id. Collision-tolerant, not cryptographically unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    pub fn generate() -> Self {
        let uuid = Uuid::new_v4().simple().to_string();
        Self(uuid[..8].to_string())
    }

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_is_trimmed() {
        // テスト項目: RoomId が前後の空白をトリムして生成される
        // given (前提条件):
        let raw = "  lounge-1  ";

        // when (操作):
        let room_id = RoomId::new(raw).unwrap();

        // then (期待する結果):
        assert_eq!(room_id.as_str(), "lounge-1");
    }

    #[test]
    fn test_room_id_rejects_empty_after_trim() {
        // テスト項目: トリム後に空となる Room ID は拒否される
        // given (前提条件):
        let raw = "   ";

        // when (操作):
        let result = RoomId::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(RoomIdError::Empty));
    }

    #[test]
    fn test_room_id_is_case_sensitive() {
        // テスト項目: Room ID は大文字小文字を区別する
        // given (前提条件):
        let lower = RoomId::new("lounge").unwrap();
        let upper = RoomId::new("Lounge").unwrap();

        // when (操作):

        // then (期待する結果):
        assert_ne!(lower, upper);
    }

    #[test]
    fn test_display_name_is_trimmed() {
        // テスト項目: 表示名が前後の空白をトリムして生成される
        // given (前提条件):
        let raw = "  alice  ";

        // when (操作):
        let name = DisplayName::new(raw).unwrap();

        // then (期待する結果):
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn test_display_name_rejects_empty_after_trim() {
        // テスト項目: トリム後に空となる表示名は拒否される
        // given (前提条件):
        let raw = " ";

        // when (操作):
        let result = DisplayName::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(DisplayNameError::Empty));
    }

    #[test]
    fn test_display_name_accepts_exactly_50_chars() {
        // テスト項目: ちょうど 50 文字の表示名は受理される
        // given (前提条件):
        let raw = "a".repeat(50);

        // when (操作):
        let result = DisplayName::new(&raw);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_display_name_rejects_over_50_chars() {
        // テスト項目: 50 文字を超える表示名は拒否される
        // given (前提条件):
        let raw = "a".repeat(51);

        // when (操作):
        let result = DisplayName::new(&raw);

        // then (期待する結果):
        assert_eq!(result, Err(DisplayNameError::TooLong { length: 51 }));
    }

    #[test]
    fn test_connection_id_is_unique() {
        // テスト項目: 生成される接続 ID が重複しない
        // given (前提条件):

        // when (操作):
        let first = ConnectionId::generate();
        let second = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
    }

    #[test]
    fn test_message_id_is_short_and_unique() {
        // テスト項目: メッセージ ID が短い不透明文字列として生成され、重複しない
        // given (前提条件):

        // when (操作):
        let first = MessageId::generate();
        let second = MessageId::generate();

        // then (期待する結果):
        assert_eq!(first.as_str().len(), 8);
        assert_ne!(first, second);
    }

    #[test]
    fn test_timestamp_preserves_value() {
        // テスト項目: Timestamp が渡された値をそのまま保持する
        // given (前提条件):
        let millis = 1735689600000;

        // when (操作):
        let timestamp = Timestamp::new(millis);

        // then (期待する結果):
        assert_eq!(timestamp.value(), millis);
    }
}
