// analytics-backend/src/service/statistics.rs
//
// 生の件数から派生指標を計算し、レスポンスを組み立てる。

use crate::api::dto::analytics_dto::{
    DailyCompletion, ProductivityResponse, PublicStatsResponse, UserStatisticsResponse,
};
use crate::domain::distribution::CategoryDistribution;
use crate::domain::task_priority::TaskPriority;
use crate::domain::task_status::TaskStatus;
use crate::repository::analytics_query::DailyCount;

/// 完了率（%、小数第2位に偶数丸め）。総数0なら0
pub fn completion_rate(completed: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }

    let rate = (completed as f64 / total as f64 * 100.0).clamp(0.0, 100.0);
    (rate * 100.0).round_ties_even() / 100.0
}

/// 個人統計の件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserTaskCounts {
    pub total: u64,
    pub completed: u64,
    pub pending: u64,
    pub due: u64,
    pub overdue: u64,
}

pub fn user_statistics(
    counts: UserTaskCounts,
    status_distribution: CategoryDistribution<TaskStatus>,
    priority_distribution: CategoryDistribution<TaskPriority>,
) -> UserStatisticsResponse {
    UserStatisticsResponse {
        total_tasks: counts.total,
        completed_tasks: counts.completed,
        pending_tasks: counts.pending,
        due_tasks: counts.due,
        overdue_tasks: counts.overdue,
        completion_rate: completion_rate(counts.completed, counts.total),
        task_status_distribution: status_distribution,
        priority_distribution,
    }
}

pub fn productivity_trend(days: u32, buckets: Vec<DailyCount>) -> ProductivityResponse {
    ProductivityResponse {
        days,
        data: buckets.into_iter().map(DailyCompletion::from).collect(),
    }
}

/// プラットフォーム全体の件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlatformCounts {
    pub users: u64,
    pub tasks: u64,
    pub completed: u64,
    pub active_users: u64,
}

pub fn public_statistics(counts: PlatformCounts) -> PublicStatsResponse {
    PublicStatsResponse {
        total_users: counts.users,
        total_tasks: counts.tasks,
        tasks_completed: counts.completed,
        completion_rate: completion_rate(counts.completed, counts.tasks),
        active_users: counts.active_users,
    }
}
