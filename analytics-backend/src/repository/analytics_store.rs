// analytics-backend/src/repository/analytics_store.rs

use super::analytics_query::{BucketByDayQuery, CountQuery, DailyCount, GroupByQuery, GroupCount};
use super::task_repository::TaskRepository;
use super::user_repository::UserRepository;
use async_trait::async_trait;
use sea_orm::{DbConn, DbErr};
use std::time::Duration;
use thiserror::Error;

/// ストア層のエラー
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DbErr(#[from] DbErr),

    #[error("Store query timed out after {0:?}")]
    Timeout(Duration),

    #[error("'{0}' is not a valid owner reference")]
    InvalidOwner(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// 集計エンジンが利用する読み取り専用ストア
#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    async fn count_tasks(&self, query: &CountQuery) -> Result<u64, StoreError>;

    async fn group_tasks(&self, query: &GroupByQuery) -> Result<Vec<GroupCount>, StoreError>;

    /// 日付の昇順で返す
    async fn bucket_tasks_by_day(
        &self,
        query: &BucketByDayQuery,
    ) -> Result<Vec<DailyCount>, StoreError>;

    /// タスクを一件以上持つユーザーの数
    async fn count_distinct_owners(&self) -> Result<u64, StoreError>;

    async fn count_users(&self) -> Result<u64, StoreError>;
}

/// SeaORM 接続上のストア実装
pub struct DbAnalyticsStore {
    task_repo: TaskRepository,
    user_repo: UserRepository,
}

impl DbAnalyticsStore {
    pub fn new(db: DbConn) -> Self {
        Self {
            task_repo: TaskRepository::new(db.clone()),
            user_repo: UserRepository::new(db),
        }
    }
}

#[async_trait]
impl AnalyticsStore for DbAnalyticsStore {
    async fn count_tasks(&self, query: &CountQuery) -> Result<u64, StoreError> {
        Ok(self.task_repo.count_matching(&query.filter).await?)
    }

    async fn group_tasks(&self, query: &GroupByQuery) -> Result<Vec<GroupCount>, StoreError> {
        Ok(self
            .task_repo
            .count_grouped_by(&query.filter, query.field)
            .await?)
    }

    async fn bucket_tasks_by_day(
        &self,
        query: &BucketByDayQuery,
    ) -> Result<Vec<DailyCount>, StoreError> {
        let rows = self
            .task_repo
            .count_by_updated_day(&query.scoped_filter())
            .await?;

        Ok(rows
            .into_iter()
            .map(|(day, count)| DailyCount { day, count })
            .collect())
    }

    async fn count_distinct_owners(&self) -> Result<u64, StoreError> {
        Ok(self.task_repo.count_distinct_owners().await?)
    }

    async fn count_users(&self) -> Result<u64, StoreError> {
        Ok(self.user_repo.count_all().await?)
    }
}
