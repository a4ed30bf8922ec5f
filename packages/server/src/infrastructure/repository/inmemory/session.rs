//! InMemory Session Repository 実装
//!
//! ドメイン層が定義する SessionRepository trait の具体的な実装。
//! Connection Registry と Event Log をひとつの `Mutex` の中に保持します。
//! プロセスの終了とともに状態は失われます（永続化はしない）。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, ConnectionRegistry, DisplayName, EventLog, Round, SessionRepository, Timestamp,
};

/// The whole session state owned by one server process
#[derive(Debug, Default)]
pub struct SessionState {
    pub registry: ConnectionRegistry,
    pub event_log: EventLog,
}

/// インメモリ Session Repository 実装
pub struct InMemorySessionRepository {
    state: Arc<Mutex<SessionState>>,
}

impl InMemorySessionRepository {
    pub fn new(state: Arc<Mutex<SessionState>>) -> Self {
        Self { state }
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(SessionState::default())))
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn register_identity(&self, connection_id: ConnectionId, name: DisplayName) {
        let mut state = self.state.lock().await;
        state.registry.register(connection_id, name);
    }

    async fn deregister_identity(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
        let mut state = self.state.lock().await;
        state.registry.deregister(connection_id)
    }

    async fn identity_of(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
        let state = self.state.lock().await;
        state.registry.identity_of(connection_id).cloned()
    }

    async fn list_names(&self) -> Vec<DisplayName> {
        let state = self.state.lock().await;
        state.registry.list_names()
    }

    async fn record_press(&self, name: DisplayName) -> Vec<DisplayName> {
        let mut state = self.state.lock().await;
        state.event_log.record_press(name)
    }

    async fn close_round(&self, closed_at: Timestamp) -> bool {
        let mut state = self.state.lock().await;
        state.event_log.close_round(closed_at)
    }

    async fn current_round(&self) -> Vec<DisplayName> {
        let state = self.state.lock().await;
        state.event_log.current_round().to_vec()
    }

    async fn history(&self) -> Vec<Round> {
        let state = self.state.lock().await;
        state.event_log.history().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemorySessionRepository が Registry と EventLog に正しく委譲すること
    // - 返されるスナップショットが内部状態と独立していること
    //
    // 【なぜこのテストが必要か】
    // - UseCase 層はこの Repository 経由でしか状態に触れない
    // - スナップショットがブロードキャストの内容になるため、整合性が重要
    // ========================================

    fn name(value: &str) -> DisplayName {
        DisplayName::new(value)
    }

    #[tokio::test]
    async fn test_register_and_list_names() {
        // テスト項目: 登録した名前が登録順で取得できる
        // given (前提条件):
        let repo = InMemorySessionRepository::default();
        let (a, b) = (ConnectionId::generate(), ConnectionId::generate());

        // when (操作):
        repo.register_identity(a, name("Alice")).await;
        repo.register_identity(b, name("Bob")).await;

        // then (期待する結果):
        assert_eq!(repo.list_names().await, vec![name("Alice"), name("Bob")]);
        assert_eq!(repo.identity_of(&b).await, Some(name("Bob")));
    }

    #[tokio::test]
    async fn test_deregister_identity() {
        // テスト項目: 登録解除すると一覧から消える。未登録でもエラーにならない
        // given (前提条件):
        let repo = InMemorySessionRepository::default();
        let a = ConnectionId::generate();
        repo.register_identity(a, name("Alice")).await;

        // when (操作):
        let first = repo.deregister_identity(&a).await;
        let second = repo.deregister_identity(&a).await;

        // then (期待する結果):
        assert_eq!(first, Some(name("Alice")));
        assert_eq!(second, None);
        assert!(repo.list_names().await.is_empty());
    }

    #[tokio::test]
    async fn test_close_round_snapshot_is_detached() {
        // テスト項目: 履歴のスナップショットはその後の変更の影響を受けない
        // given (前提条件):
        let repo = InMemorySessionRepository::default();
        repo.record_press(name("Alice")).await;
        repo.close_round(Timestamp::new(1)).await;
        let snapshot = repo.history().await;

        // when (操作):
        repo.record_press(name("Bob")).await;
        repo.close_round(Timestamp::new(2)).await;

        // then (期待する結果):
        assert_eq!(snapshot.len(), 1);
        assert_eq!(repo.history().await.len(), 2);
        assert!(repo.current_round().await.is_empty());
    }

    #[tokio::test]
    async fn test_shared_state_is_visible_through_handle() {
        // テスト項目: 共有した SessionState の変更が Repository から見える
        // given (前提条件):
        let state = Arc::new(Mutex::new(SessionState::default()));
        let repo = InMemorySessionRepository::new(state.clone());

        // when (操作):
        repo.record_press(name("Alice")).await;

        // then (期待する結果):
        let state = state.lock().await;
        assert_eq!(state.event_log.current_round(), &[name("Alice")]);
    }
}
