//! UseCase errors.

use thiserror::Error;

use crate::domain::ConnectionId;

/// プレス記録のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordPressError {
    /// The connection has not sent `on_connect` yet
    #[error("connection {0} has not identified itself yet")]
    NotIdentified(ConnectionId),
}
