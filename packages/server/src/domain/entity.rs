//! Domain entities: who is connected and what has been pressed.

use super::value_object::{ConnectionId, DisplayName, Timestamp};

/// Connection Registry
///
/// 接続ごとに高々 1 つの表示名を保持する。登録順を保つため `Vec` で管理する
/// （接続数は小さいので線形探索で十分）。
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    entries: Vec<(ConnectionId, DisplayName)>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or rename) the identity of a connection.
    ///
    /// A connection that is already registered keeps its position; only the
    /// name is replaced. Names are not required to be unique.
    pub fn register(&mut self, connection_id: ConnectionId, name: DisplayName) {
        match self.entries.iter_mut().find(|(id, _)| *id == connection_id) {
            Some(entry) => entry.1 = name,
            None => self.entries.push((connection_id, name)),
        }
    }

    /// Remove the identity of a connection, returning it if there was one.
    pub fn deregister(&mut self, connection_id: &ConnectionId) -> Option<DisplayName> {
        let index = self
            .entries
            .iter()
            .position(|(id, _)| id == connection_id)?;
        Some(self.entries.remove(index).1)
    }

    pub fn identity_of(&self, connection_id: &ConnectionId) -> Option<&DisplayName> {
        self.entries
            .iter()
            .find(|(id, _)| id == connection_id)
            .map(|(_, name)| name)
    }

    /// Names of all identified connections in registration order.
    pub fn list_names(&self) -> Vec<DisplayName> {
        self.entries.iter().map(|(_, name)| name.clone()).collect()
    }
}

/// A completed round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub presses: Vec<DisplayName>,
    pub closed_at: Timestamp,
}

/// Event Log: the presses of the current round and the saved rounds.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    current: Vec<DisplayName>,
    history: Vec<Round>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a press to the current round and return the updated round.
    ///
    /// No de-duplication and no rate limiting: the same name may appear any
    /// number of times.
    pub fn record_press(&mut self, name: DisplayName) -> Vec<DisplayName> {
        self.current.push(name);
        self.current.clone()
    }

    /// Move the current round into the history.
    ///
    /// Returns `false` without touching anything when the round is empty.
    pub fn close_round(&mut self, closed_at: Timestamp) -> bool {
        if self.current.is_empty() {
            return false;
        }

        let presses = std::mem::take(&mut self.current);
        self.history.push(Round { presses, closed_at });
        true
    }

    pub fn current_round(&self) -> &[DisplayName] {
        &self.current
    }

    pub fn history(&self) -> &[Round] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(value: &str) -> DisplayName {
        DisplayName::new(value)
    }

    #[test]
    fn test_register_keeps_registration_order() {
        // テスト項目: list_names が登録順で名前を返す
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        let (a, b, c) = (
            ConnectionId::generate(),
            ConnectionId::generate(),
            ConnectionId::generate(),
        );

        // when (操作):
        registry.register(b, name("Bob"));
        registry.register(a, name("Alice"));
        registry.register(c, name("Bob"));

        // then (期待する結果): 重複した名前もそのまま残る
        assert_eq!(
            registry.list_names(),
            vec![name("Bob"), name("Alice"), name("Bob")]
        );
    }

    #[test]
    fn test_register_overwrites_in_place() {
        // テスト項目: 同じ接続の再登録は名前を上書きし、順序は変わらない
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        let (a, b) = (ConnectionId::generate(), ConnectionId::generate());
        registry.register(a, name("Alice"));
        registry.register(b, name("Bob"));

        // when (操作):
        registry.register(a, name("Alicia"));

        // then (期待する結果):
        assert_eq!(registry.list_names(), vec![name("Alicia"), name("Bob")]);
        assert_eq!(registry.identity_of(&a), Some(&name("Alicia")));
    }

    #[test]
    fn test_deregister_unknown_connection_is_noop() {
        // テスト項目: 未登録の接続を削除しても何も起きない
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        registry.register(ConnectionId::generate(), name("Alice"));

        // when (操作):
        let removed = registry.deregister(&ConnectionId::generate());

        // then (期待する結果):
        assert_eq!(removed, None);
        assert_eq!(registry.list_names(), vec![name("Alice")]);
    }

    #[test]
    fn test_deregister_returns_removed_name() {
        // テスト項目: 削除した接続の名前が返される
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        let a = ConnectionId::generate();
        registry.register(a, name("Alice"));

        // when (操作):
        let removed = registry.deregister(&a);

        // then (期待する結果):
        assert_eq!(removed, Some(name("Alice")));
        assert!(registry.list_names().is_empty());
        assert_eq!(registry.identity_of(&a), None);
    }

    #[test]
    fn test_record_press_appends_in_order() {
        // テスト項目: プレスが順番通りに追加され、重複も許される
        // given (前提条件):
        let mut log = EventLog::new();

        // when (操作):
        log.record_press(name("Alice"));
        log.record_press(name("Bob"));
        let round = log.record_press(name("Alice"));

        // then (期待する結果):
        assert_eq!(round, vec![name("Alice"), name("Bob"), name("Alice")]);
        assert_eq!(log.current_round(), round.as_slice());
    }

    #[test]
    fn test_close_round_moves_presses_to_history() {
        // テスト項目: ラウンドを閉じると履歴に移動し、現在のラウンドは空になる
        // given (前提条件):
        let mut log = EventLog::new();
        log.record_press(name("Alice"));
        log.record_press(name("Bob"));

        // when (操作):
        let saved = log.close_round(Timestamp::new(1000));

        // then (期待する結果):
        assert!(saved);
        assert!(log.current_round().is_empty());
        assert_eq!(
            log.history(),
            &[Round {
                presses: vec![name("Alice"), name("Bob")],
                closed_at: Timestamp::new(1000),
            }]
        );
    }

    #[test]
    fn test_close_empty_round_changes_nothing() {
        // テスト項目: 空のラウンドを閉じても履歴は変わらない
        // given (前提条件):
        let mut log = EventLog::new();
        log.record_press(name("Alice"));
        log.close_round(Timestamp::new(1000));

        // when (操作):
        let saved = log.close_round(Timestamp::new(2000));

        // then (期待する結果):
        assert!(!saved);
        assert_eq!(log.history().len(), 1);
        assert_eq!(log.history()[0].closed_at, Timestamp::new(1000));
    }
}
