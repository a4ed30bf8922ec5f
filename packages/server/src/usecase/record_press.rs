//! UseCase: プレスの記録（`button_press`）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RecordPressUseCase::execute() メソッド
//! - プレスが宣言された user 名で記録され、update 通知が送られること
//!
//! ### どのような状況を想定しているか
//! - 正常系：識別済みの接続からのプレス
//! - 異常系：未識別の接続からのプレス（記録もブロードキャストもしない）
//! - エッジケース：登録名と異なる user 名でのプレス

use std::sync::Arc;

use crate::domain::{ConnectionId, DisplayName, SessionRepository};

use super::{error::RecordPressError, notifier::SessionNotifier};

/// プレス記録のユースケース
pub struct RecordPressUseCase {
    repository: Arc<dyn SessionRepository>,
    notifier: Arc<SessionNotifier>,
}

impl RecordPressUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>, notifier: Arc<SessionNotifier>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// プレスを記録し、update 通知をブロードキャストする
    ///
    /// The press is attributed to `declared_user`, the name the client put in
    /// the message, even if it differs from the registered identity.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<DisplayName>)` - 更新後の現在のラウンド
    /// * `Err(RecordPressError::NotIdentified)` - 接続がまだ名前を登録していない
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        declared_user: DisplayName,
    ) -> Result<Vec<DisplayName>, RecordPressError> {
        let guard = self.notifier.lock().await;

        let identity = self
            .repository
            .identity_of(&connection_id)
            .await
            .ok_or(RecordPressError::NotIdentified(connection_id))?;
        if identity != declared_user {
            tracing::debug!(
                "Connection '{}' registered as '{}' pressed as '{}'",
                connection_id,
                identity,
                declared_user
            );
        }

        let round = self.repository.record_press(declared_user).await;
        self.notifier.broadcast_round(&guard).await;

        Ok(round)
    }
}
