//! UseCase: ラウンドを履歴に保存（管理操作）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CloseRoundUseCase::execute() メソッド
//! - 保存後に空のラウンドが update 通知で送られること
//!
//! ### どのような状況を想定しているか
//! - 正常系：プレスのあるラウンドを保存
//! - エッジケース：空のラウンドの保存（何もしない）

use std::sync::Arc;

use buzzline_shared::time::Clock;

use crate::domain::{SessionRepository, Timestamp};

use super::notifier::SessionNotifier;

/// Result of closing the current round. Both are successful outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseRoundOutcome {
    Saved,
    NothingToSave,
}

impl CloseRoundOutcome {
    /// Acknowledgement text returned to the administrator
    pub fn message(&self) -> &'static str {
        match self {
            Self::Saved => "Saved to history",
            Self::NothingToSave => "Nothing to save",
        }
    }
}

/// ラウンド保存のユースケース
pub struct CloseRoundUseCase {
    repository: Arc<dyn SessionRepository>,
    notifier: Arc<SessionNotifier>,
    clock: Arc<dyn Clock>,
}

impl CloseRoundUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        notifier: Arc<SessionNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            notifier,
            clock,
        }
    }

    pub async fn execute(&self) -> CloseRoundOutcome {
        let guard = self.notifier.lock().await;

        let closed_at = Timestamp::new(self.clock.now_jst_millis());
        if !self.repository.close_round(closed_at).await {
            return CloseRoundOutcome::NothingToSave;
        }

        self.notifier.broadcast_round(&guard).await;
        CloseRoundOutcome::Saved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{BroadcastReport, DisplayName, MockMessagePusher, Notification},
        infrastructure::repository::InMemorySessionRepository,
    };
    use buzzline_shared::time::FixedClock;

    fn name(value: &str) -> DisplayName {
        DisplayName::new(value)
    }

    #[tokio::test]
    async fn test_close_round_saves_presses_in_order() {
        // テスト項目: プレス U1..Un の後に保存すると履歴の最後が [U1..Un] になり、ラウンドは空になる
        // given (前提条件):
        let repository = Arc::new(InMemorySessionRepository::default());
        for user in ["Bob", "Alice", "Bob", "Carol"] {
            repository.record_press(name(user)).await;
        }

        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast()
            .withf(|n| *n == Notification::RoundUpdated(vec![]))
            .times(1)
            .returning(|_| BroadcastReport::default());
        let notifier = Arc::new(SessionNotifier::new(repository.clone(), Arc::new(pusher)));
        let usecase = CloseRoundUseCase::new(
            repository.clone(),
            notifier,
            Arc::new(FixedClock::new(1672498800000)),
        );

        // when (操作):
        let outcome = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(outcome, CloseRoundOutcome::Saved);
        assert_eq!(outcome.message(), "Saved to history");
        let history = repository.history().await;
        let last = history.last().unwrap();
        assert_eq!(
            last.presses,
            vec![name("Bob"), name("Alice"), name("Bob"), name("Carol")]
        );
        assert_eq!(last.closed_at, Timestamp::new(1672498800000));
        assert!(repository.current_round().await.is_empty());
    }

    #[tokio::test]
    async fn test_close_empty_round() {
        // テスト項目: 空のラウンドを保存しても履歴は変わらず、ブロードキャストもされない
        // given (前提条件):
        let repository = Arc::new(InMemorySessionRepository::default());
        let mut pusher = MockMessagePusher::new();
        pusher.expect_broadcast().never();
        let notifier = Arc::new(SessionNotifier::new(repository.clone(), Arc::new(pusher)));
        let usecase = CloseRoundUseCase::new(
            repository.clone(),
            notifier,
            Arc::new(FixedClock::new(0)),
        );

        // when (操作):
        let outcome = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(outcome, CloseRoundOutcome::NothingToSave);
        assert_eq!(outcome.message(), "Nothing to save");
        assert!(repository.history().await.is_empty());
    }
}
