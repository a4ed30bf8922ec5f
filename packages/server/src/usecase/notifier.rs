//! Session-wide broadcast coordination.
//!
//! Every state change that is followed by a broadcast runs while holding the
//! session lock, so the payload always reflects the state right after that
//! change and two handlers never interleave "mutate" and "snapshot".

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::domain::{ConnectionId, MessagePusher, Notification, SessionRepository};

/// Proof that the session lock is held
pub struct SessionGuard<'a> {
    _guard: MutexGuard<'a, ()>,
}

/// ブロードキャストと、送信失敗した接続の後始末を担当する
pub struct SessionNotifier {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    lock: Mutex<()>,
}

impl SessionNotifier {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            lock: Mutex::new(()),
        }
    }

    /// Enter the mutate-then-broadcast critical section
    pub async fn lock(&self) -> SessionGuard<'_> {
        SessionGuard {
            _guard: self.lock.lock().await,
        }
    }

    /// Broadcast the identified users to every live connection.
    ///
    /// Connections that fail to receive it are forgotten and the list is sent
    /// again, until one round of sends completes without failures.
    pub async fn broadcast_users(&self, _guard: &SessionGuard<'_>) {
        loop {
            let names = self.repository.list_names().await;
            let report = self
                .message_pusher
                .broadcast(&Notification::UsersChanged(names))
                .await;
            if !report.has_failures() {
                return;
            }
            self.forget(&report.failed).await;
        }
    }

    /// Broadcast the current round to every live connection.
    ///
    /// If any connection was dropped on the way, the user list is refreshed
    /// for everybody else.
    pub async fn broadcast_round(&self, guard: &SessionGuard<'_>) {
        let round = self.repository.current_round().await;
        let report = self
            .message_pusher
            .broadcast(&Notification::RoundUpdated(round))
            .await;
        if report.has_failures() {
            self.forget(&report.failed).await;
            self.broadcast_users(guard).await;
        }
    }

    async fn forget(&self, failed: &[ConnectionId]) {
        for connection_id in failed {
            match self.repository.deregister_identity(connection_id).await {
                Some(name) => tracing::info!(
                    "Dropped unreachable connection '{}' ({})",
                    connection_id,
                    name
                ),
                None => tracing::info!("Dropped unreachable connection '{}'", connection_id),
            }
        }
    }
}
