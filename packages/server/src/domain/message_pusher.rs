//! MessagePusher trait 定義
//!
//! 接続中のクライアントへの通知のインターフェース。
//! ブロードキャスト対象（Live Connection Set）の管理も MessagePusher が担う。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, DisplayName};

/// Outbound channel of one connection (already-encoded text frames)
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// State change pushed to every connected client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The presses of the current round
    RoundUpdated(Vec<DisplayName>),
    /// The names of all identified connections
    UsersChanged(Vec<DisplayName>),
}

/// Per-target outcome of one broadcast.
///
/// Failed targets have already been removed from the live connection set when
/// the report is returned; the caller decides what else to clean up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: usize,
    pub failed: Vec<ConnectionId>,
}

impl BroadcastReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Add a connection to the live connection set
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// Remove a connection from the live connection set (no-op if absent)
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// Deliver a notification to every live connection.
    ///
    /// Never fails as a whole: a target whose channel is broken is dropped
    /// from the live set and listed in the report.
    async fn broadcast(&self, notification: &Notification) -> BroadcastReport;

    /// Number of live connections
    async fn live_count(&self) -> usize;
}
