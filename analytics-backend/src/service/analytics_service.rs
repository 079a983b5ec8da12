// analytics-backend/src/service/analytics_service.rs

use crate::api::dto::analytics_dto::{
    ProductivityResponse, PublicStatsResponse, UserStatisticsResponse,
};
use crate::domain::distribution::CategoryDistribution;
use crate::domain::task_status::TaskStatus;
use crate::error::AnalyticsError;
use crate::middleware::auth::CallerIdentity;
use crate::repository::analytics_query::{
    BucketByDayQuery, CountQuery, GroupByQuery, GroupField, TaskFilter, TaskPredicate,
};
use crate::repository::analytics_store::{AnalyticsStore, StoreError};
use crate::service::statistics::{self, PlatformCounts, UserTaskCounts};
use crate::service::window_resolver::{
    resolve_stats_window, resolve_trend_days, resolve_trend_window,
};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// 集計エンジン
///
/// ストアは起動時に `main` が生成して渡す。リクエストごとに独立した読み取りのみを行う。
pub struct AnalyticsService {
    store: Arc<dyn AnalyticsStore>,
    query_timeout: Duration,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn AnalyticsStore>, query_timeout: Duration) -> Self {
        Self {
            store,
            query_timeout,
        }
    }

    /// ストアへのクエリ一件をタイムアウト付きで実行
    async fn bounded<T, F>(&self, query: F) -> Result<T, AnalyticsError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(StoreError::Timeout(self.query_timeout).into()),
        }
    }

    pub async fn user_statistics(
        &self,
        caller: &CallerIdentity,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<UserStatisticsResponse, AnalyticsError> {
        self.user_statistics_at(caller, start_date, end_date, Utc::now())
            .await
    }

    pub async fn user_statistics_at(
        &self,
        caller: &CallerIdentity,
        start_date: Option<&str>,
        end_date: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<UserStatisticsResponse, AnalyticsError> {
        let owner = caller.owner_id()?;
        let window = resolve_stats_window(start_date, end_date, now)?;
        debug!(
            user_id = %owner,
            start = %window.start,
            end = %window.end,
            "Resolved statistics window"
        );

        let scope = TaskFilter::owned_by(owner);
        let total = CountQuery::new(scope.clone());
        let completed = CountQuery::new(
            scope
                .clone()
                .and(TaskPredicate::StatusIs(TaskStatus::Completed)),
        );
        let pending = CountQuery::new(
            scope
                .clone()
                .and(TaskPredicate::StatusIn(TaskStatus::pending())),
        );
        let due = CountQuery::new(
            scope
                .clone()
                .and(TaskPredicate::DueWithin(window))
                .and(TaskPredicate::StatusIsNot(TaskStatus::Completed)),
        );
        let overdue = CountQuery::new(
            scope
                .clone()
                .and(TaskPredicate::DueBefore(now))
                .and(TaskPredicate::StatusIsNot(TaskStatus::Completed)),
        );
        let by_status = GroupByQuery::new(scope.clone(), GroupField::Status);
        let by_priority = GroupByQuery::new(scope, GroupField::Priority);

        let store = self.store.as_ref();
        let (total, completed, pending, due, overdue, status_rows, priority_rows) = tokio::try_join!(
            self.bounded(store.count_tasks(&total)),
            self.bounded(store.count_tasks(&completed)),
            self.bounded(store.count_tasks(&pending)),
            self.bounded(store.count_tasks(&due)),
            self.bounded(store.count_tasks(&overdue)),
            self.bounded(store.group_tasks(&by_status)),
            self.bounded(store.group_tasks(&by_priority)),
        )?;

        info!(
            user_id = %owner,
            total_tasks = total,
            completed_tasks = completed,
            "User statistics computed"
        );

        Ok(statistics::user_statistics(
            UserTaskCounts {
                total,
                completed,
                pending,
                due,
                overdue,
            },
            CategoryDistribution::zero_filled(status_rows),
            CategoryDistribution::zero_filled(priority_rows),
        ))
    }

    pub async fn productivity_trend(
        &self,
        caller: &CallerIdentity,
        days: Option<&str>,
    ) -> Result<ProductivityResponse, AnalyticsError> {
        self.productivity_trend_at(caller, days, Utc::now()).await
    }

    pub async fn productivity_trend_at(
        &self,
        caller: &CallerIdentity,
        days: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<ProductivityResponse, AnalyticsError> {
        let owner = caller.owner_id()?;
        let days = resolve_trend_days(days)?;
        let window = resolve_trend_window(days, now);

        let query = BucketByDayQuery::new(
            TaskFilter::owned_by(owner).and(TaskPredicate::StatusIs(TaskStatus::Completed)),
            window,
        );
        let buckets = self
            .bounded(self.store.bucket_tasks_by_day(&query))
            .await?;

        info!(user_id = %owner, days, buckets = buckets.len(), "Productivity trend computed");

        Ok(statistics::productivity_trend(days, buckets))
    }

    pub async fn public_statistics(&self) -> Result<PublicStatsResponse, AnalyticsError> {
        let all = CountQuery::new(TaskFilter::all());
        let completed = CountQuery::new(
            TaskFilter::all().and(TaskPredicate::StatusIs(TaskStatus::Completed)),
        );

        let store = self.store.as_ref();
        let (users, tasks, completed, active_users) = tokio::try_join!(
            self.bounded(store.count_users()),
            self.bounded(store.count_tasks(&all)),
            self.bounded(store.count_tasks(&completed)),
            self.bounded(store.count_distinct_owners()),
        )?;

        Ok(statistics::public_statistics(PlatformCounts {
            users,
            tasks,
            completed,
            active_users,
        }))
    }
}
