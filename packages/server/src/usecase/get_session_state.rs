//! UseCase: セッション状態の取得（デバッグ用）

use std::sync::Arc;

use crate::domain::{DisplayName, MessagePusher, SessionRepository};

use super::notifier::SessionNotifier;

/// Point-in-time view of the whole session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub live_connections: usize,
    pub users: Vec<DisplayName>,
    pub current_round: Vec<DisplayName>,
    pub saved_rounds: usize,
}

pub struct GetSessionStateUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    notifier: Arc<SessionNotifier>,
}

impl GetSessionStateUseCase {
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

    /// All four reads happen under the session lock, so the snapshot never
    /// mixes state from before and after a concurrent change.
    pub async fn execute(&self) -> SessionSnapshot {
        let _guard = self.notifier.lock().await;
        SessionSnapshot {
            live_connections: self.message_pusher.live_count().await,
            users: self.repository.list_names().await,
            current_round: self.repository.current_round().await,
            saved_rounds: self.repository.history().await.len(),
        }
    }
}
