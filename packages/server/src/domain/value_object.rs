//! Value objects.

use std::fmt;

use uuid::Uuid;

/// 1 本の WebSocket 接続を識別する不透明な ID
///
/// 表示名とは独立しており、同じ名前の接続が複数あっても区別できる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh random connection id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ユーザーの表示名
///
/// クライアントが送った文字列をそのまま保持する。接続間での一意性は要求しない。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unix timestamp in JST (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_keeps_raw_value() {
        // テスト項目: 前後の空白や長さに関係なく、送られた文字列がそのまま保持される
        // given (前提条件):
        let padded = " Alice ".to_string();
        let long = "あ".repeat(100);

        // when (操作):
        let padded_name = DisplayName::new(padded.clone());
        let long_name = DisplayName::new(long.clone());
        let empty_name = DisplayName::new("");

        // then (期待する結果):
        assert_eq!(padded_name.as_str(), padded);
        assert_eq!(long_name.into_string(), long);
        assert_eq!(empty_name.as_str(), "");
    }

    #[test]
    fn test_connection_ids_are_unique() {
        // テスト項目: 生成される ConnectionId は毎回異なる
        // given (前提条件):

        // when (操作):
        let a = ConnectionId::generate();
        let b = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(a, b);
    }
}
