//! Repository trait 定義
//!
//! ドメイン層が必要とするセッション状態へのアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ConnectionId, DisplayName, Round, Timestamp};

/// Session Repository trait
///
/// Connection Registry と Event Log をまとめて扱う。
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// 接続に表示名を登録（既存の名前は上書き）
    async fn register_identity(&self, connection_id: ConnectionId, name: DisplayName);

    /// 接続の表示名を削除し、削除した名前を返す
    async fn deregister_identity(&self, connection_id: &ConnectionId) -> Option<DisplayName>;

    /// 接続に登録された表示名を取得
    async fn identity_of(&self, connection_id: &ConnectionId) -> Option<DisplayName>;

    /// 登録順の表示名リストを取得
    async fn list_names(&self) -> Vec<DisplayName>;

    /// 現在のラウンドにプレスを追加し、更新後のラウンドを返す
    async fn record_press(&self, name: DisplayName) -> Vec<DisplayName>;

    /// 現在のラウンドを履歴に移動（空なら false）
    async fn close_round(&self, closed_at: Timestamp) -> bool;

    /// 現在のラウンドを取得
    async fn current_round(&self) -> Vec<DisplayName>;

    /// 保存済みラウンドの履歴を取得
    async fn history(&self) -> Vec<Round>;
}
