// analytics-backend/src/repository/memory_store.rs

use super::analytics_query::{
    updated_day_of, BucketByDayQuery, CountQuery, DailyCount, GroupByQuery, GroupCount,
};
use super::analytics_store::{AnalyticsStore, StoreError};
use crate::domain::task_model;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use uuid::Uuid;

/// タスクのスナップショットを保持するインメモリストア
///
/// テストスイートで DB 実装と同じ集計意味論を検証するために使う。
#[derive(Debug, Default)]
pub struct InMemoryAnalyticsStore {
    tasks: Vec<task_model::Model>,
    user_ids: BTreeSet<Uuid>,
    failure: Option<String>,
    delay: Option<Duration>,
    queries_served: AtomicUsize,
}

impl InMemoryAnalyticsStore {
    pub fn new(tasks: Vec<task_model::Model>) -> Self {
        Self {
            tasks,
            ..Default::default()
        }
    }

    pub fn with_users<I>(mut self, user_ids: I) -> Self
    where
        I: IntoIterator<Item = Uuid>,
    {
        self.user_ids.extend(user_ids);
        self
    }

    /// すべてのクエリを指定メッセージで失敗させる
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Default::default()
        }
    }

    /// 各クエリの応答を遅らせる
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// これまでに受け付けたクエリ数
    pub fn queries_served(&self) -> usize {
        self.queries_served.load(Ordering::SeqCst)
    }

    async fn begin_query(&self) -> Result<(), StoreError> {
        self.queries_served.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some(message) => Err(StoreError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AnalyticsStore for InMemoryAnalyticsStore {
    async fn count_tasks(&self, query: &CountQuery) -> Result<u64, StoreError> {
        self.begin_query().await?;
        Ok(self
            .tasks
            .iter()
            .filter(|task| query.filter.matches(task))
            .count() as u64)
    }

    async fn group_tasks(&self, query: &GroupByQuery) -> Result<Vec<GroupCount>, StoreError> {
        self.begin_query().await?;

        let mut groups: HashMap<Option<String>, u64> = HashMap::new();
        for task in self.tasks.iter().filter(|task| query.filter.matches(task)) {
            let label = query.field.value_of(task).map(str::to_string);
            *groups.entry(label).or_default() += 1;
        }

        Ok(groups.into_iter().collect())
    }

    async fn bucket_tasks_by_day(
        &self,
        query: &BucketByDayQuery,
    ) -> Result<Vec<DailyCount>, StoreError> {
        self.begin_query().await?;

        let filter = query.scoped_filter();
        let mut by_day: BTreeMap<String, u64> = BTreeMap::new();
        for task in self.tasks.iter().filter(|task| filter.matches(task)) {
            *by_day.entry(updated_day_of(task)).or_default() += 1;
        }

        Ok(by_day
            .into_iter()
            .map(|(day, count)| DailyCount { day, count })
            .collect())
    }

    async fn count_distinct_owners(&self) -> Result<u64, StoreError> {
        self.begin_query().await?;
        let owners: BTreeSet<Uuid> = self.tasks.iter().map(|task| task.user_id).collect();
        Ok(owners.len() as u64)
    }

    async fn count_users(&self) -> Result<u64, StoreError> {
        self.begin_query().await?;
        Ok(self.user_ids.len() as u64)
    }
}
