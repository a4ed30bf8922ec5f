//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - Live Connection Set（接続ごとの `UnboundedSender`）の管理
//! - 通知のエンコードと全接続へのブロードキャスト
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui::handler::websocket`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 実際のソケットへの書き込みは接続ごとの pusher loop が行うため、
//! ブロードキャストがソケットの書き込み待ちでブロックすることはありません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{
        BroadcastReport, ConnectionId, MessagePushError, MessagePusher, Notification,
        PusherChannel,
    },
    infrastructure::dto::conversion::encode_notification,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## フィールド
///
/// - `clients`: 接続中のクライアントと対応する WebSocket sender のマップ
pub struct WebSocketMessagePusher {
    /// Key: ConnectionId / Value: PusherChannel
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

fn push(
    connection_id: &ConnectionId,
    sender: &PusherChannel,
    content: &str,
) -> Result<(), MessagePushError> {
    sender
        .send(content.to_string())
        .map_err(|_| MessagePushError::ChannelClosed(connection_id.to_string()))
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        if clients.remove(connection_id).is_some() {
            tracing::debug!(
                "Connection '{}' unregistered from MessagePusher",
                connection_id
            );
        }
    }

    async fn broadcast(&self, notification: &Notification) -> BroadcastReport {
        let content = match encode_notification(notification) {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("Failed to encode notification: {}", e);
                return BroadcastReport::default();
            }
        };

        let mut clients = self.clients.lock().await;

        // Collect every outcome first; a failed target never stops the loop.
        let outcomes: Vec<(ConnectionId, Result<(), MessagePushError>)> = clients
            .iter()
            .map(|(connection_id, sender)| (*connection_id, push(connection_id, sender, &content)))
            .collect();

        let mut report = BroadcastReport::default();
        for (connection_id, outcome) in outcomes {
            match outcome {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::warn!("Failed to push message, dropping connection: {}", e);
                    clients.remove(&connection_id);
                    report.failed.push(connection_id);
                }
            }
        }

        tracing::debug!(
            "Broadcasted {:?} to {} connection(s), {} failed",
            notification,
            report.delivered,
            report.failed.len()
        );
        report
    }

    async fn live_count(&self) -> usize {
        self.clients.lock().await.len()
    }
}
