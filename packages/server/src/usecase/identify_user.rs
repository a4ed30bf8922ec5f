//! UseCase: 表示名の登録（`on_connect`）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - IdentifyUserUseCase::execute() メソッド
//! - 登録後に users 通知が全接続に送られること
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数の接続が順番に名前を登録する
//! - エッジケース：同じ名前の重複登録、同じ接続の再登録

use std::sync::Arc;

use crate::domain::{ConnectionId, DisplayName, SessionRepository};

use super::notifier::SessionNotifier;

/// 表示名登録のユースケース
pub struct IdentifyUserUseCase {
    repository: Arc<dyn SessionRepository>,
    notifier: Arc<SessionNotifier>,
}

impl IdentifyUserUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>, notifier: Arc<SessionNotifier>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// 接続に表示名を登録し、users 通知をブロードキャストする
    pub async fn execute(&self, connection_id: ConnectionId, name: DisplayName) {
        let guard = self.notifier.lock().await;
        self.repository.register_identity(connection_id, name).await;
        self.notifier.broadcast_users(&guard).await;
    }
}
