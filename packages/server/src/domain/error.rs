//! Domain errors.

use thiserror::Error;

/// MessagePusher の送信エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// The connection's outbound channel is closed (the pusher loop has ended)
    #[error("channel closed for connection {0}")]
    ChannelClosed(String),
}
