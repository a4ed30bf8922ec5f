//! UseCase: 保存済みラウンドの取得

use std::sync::Arc;

use crate::domain::{Round, SessionRepository};

pub struct GetHistoryUseCase {
    repository: Arc<dyn SessionRepository>,
}

impl GetHistoryUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// 保存順（古い順）のラウンド一覧
    pub async fn execute(&self) -> Vec<Round> {
        self.repository.history().await
    }
}
