// analytics-backend/src/api/dto/analytics_dto.rs

use crate::domain::distribution::CategoryDistribution;
use crate::domain::task_priority::TaskPriority;
use crate::domain::task_status::TaskStatus;
use crate::repository::analytics_query::DailyCount;
use serde::{Deserialize, Serialize};

/// 呼び出し元ユーザーのタスク統計
#[derive(Debug, Clone, Serialize)]
pub struct UserStatisticsResponse {
    pub total_tasks: u64,
    pub completed_tasks: u64,
    pub pending_tasks: u64,
    pub due_tasks: u64,
    pub overdue_tasks: u64,
    pub completion_rate: f64,
    pub task_status_distribution: CategoryDistribution<TaskStatus>,
    pub priority_distribution: CategoryDistribution<TaskPriority>,
}

/// 日別の完了件数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCompletion {
    #[serde(rename = "_id")]
    pub day: String,
    pub count: u64,
}

impl From<DailyCount> for DailyCompletion {
    fn from(bucket: DailyCount) -> Self {
        Self {
            day: bucket.day,
            count: bucket.count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductivityResponse {
    pub days: u32,
    pub data: Vec<DailyCompletion>,
}

/// 認証不要のプラットフォーム統計
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicStatsResponse {
    pub total_users: u64,
    pub total_tasks: u64,
    pub tasks_completed: u64,
    pub completion_rate: f64,
    /// タスクを一件以上持つユーザー数
    pub active_users: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
