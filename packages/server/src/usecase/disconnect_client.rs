//! UseCase: 切断処理
//!
//! クライアントからの切断、エラー、サーバーのシャットダウンのいずれでも同じ処理を行う。
//! Live Connection Set と Registry から取り除き、残りの接続に users 通知を送る。

use std::sync::Arc;

use crate::domain::{ConnectionId, DisplayName, MessagePusher, SessionRepository};

use super::notifier::SessionNotifier;

/// 切断のユースケース
pub struct DisconnectClientUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    notifier: Arc<SessionNotifier>,
}

impl DisconnectClientUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        notifier: Arc<SessionNotifier>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            notifier,
        }
    }

    /// 切断を実行し、登録されていた表示名を返す（未識別なら `None`）
    pub async fn execute(&self, connection_id: ConnectionId) -> Option<DisplayName> {
        let guard = self.notifier.lock().await;
        self.message_pusher.unregister_client(&connection_id).await;
        let removed = self.repository.deregister_identity(&connection_id).await;
        self.notifier.broadcast_users(&guard).await;
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemorySessionRepository,
    };
    use tokio::sync::mpsc;

    fn name(value: &str) -> DisplayName {
        DisplayName::new(value)
    }

    fn setup() -> (
        DisconnectClientUseCase,
        Arc<InMemorySessionRepository>,
        Arc<WebSocketMessagePusher>,
    ) {
        let repository = Arc::new(InMemorySessionRepository::default());
        let pusher = Arc::new(WebSocketMessagePusher::default());
        let notifier = Arc::new(SessionNotifier::new(repository.clone(), pusher.clone()));
        let usecase = DisconnectClientUseCase::new(repository.clone(), pusher.clone(), notifier);
        (usecase, repository, pusher)
    }

    #[tokio::test]
    async fn test_disconnect_identified_client() {
        // テスト項目: 識別済みの接続を切断すると Registry と Live Set から消え、users 通知が送られる
        // given (前提条件):
        let (usecase, repository, pusher) = setup();
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        let (tx_alice, _rx_alice) = mpsc::unbounded_channel();
        let (tx_bob, mut rx_bob) = mpsc::unbounded_channel();
        pusher.register_client(alice, tx_alice).await;
        pusher.register_client(bob, tx_bob).await;
        repository.register_identity(alice, name("Alice")).await;
        repository.register_identity(bob, name("Bob")).await;

        // when (操作):
        let removed = usecase.execute(alice).await;

        // then (期待する結果):
        assert_eq!(removed, Some(name("Alice")));
        assert_eq!(pusher.live_count().await, 1);
        assert_eq!(repository.list_names().await, vec![name("Bob")]);
        assert_eq!(
            rx_bob.recv().await.unwrap(),
            r#"{"type":"users","connected_users":["Bob"]}"#
        );
    }

    #[tokio::test]
    async fn test_disconnect_unidentified_client() {
        // テスト項目: 未識別の接続の切断はエラーにならず、Registry は変わらず、users 通知は送られる
        // given (前提条件):
        let (usecase, repository, pusher) = setup();
        let lurker = ConnectionId::generate();
        let bob = ConnectionId::generate();
        let (tx_lurker, _rx_lurker) = mpsc::unbounded_channel();
        let (tx_bob, mut rx_bob) = mpsc::unbounded_channel();
        pusher.register_client(lurker, tx_lurker).await;
        pusher.register_client(bob, tx_bob).await;
        repository.register_identity(bob, name("Bob")).await;

        // when (操作):
        let removed = usecase.execute(lurker).await;

        // then (期待する結果):
        assert_eq!(removed, None);
        assert_eq!(repository.list_names().await, vec![name("Bob")]);
        assert_eq!(
            rx_bob.recv().await.unwrap(),
            r#"{"type":"users","connected_users":["Bob"]}"#
        );
    }
}
