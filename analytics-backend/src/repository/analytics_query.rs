// analytics-backend/src/repository/analytics_query.rs
//
// 集計クエリの型付き表現。SeaORM の条件式とインメモリ評価の両方に変換できる。

use crate::domain::task_model::{self, Column as TaskColumn};
use crate::domain::task_status::TaskStatus;
use crate::domain::time_window::TimeWindow;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, Condition};
use serde::Serialize;
use uuid::Uuid;

/// タスクに対する単一の述語
#[derive(Debug, Clone, PartialEq)]
pub enum TaskPredicate {
    OwnedBy(Uuid),
    StatusIs(TaskStatus),
    StatusIn(Vec<TaskStatus>),
    /// ステータス未設定のタスクも一致する
    StatusIsNot(TaskStatus),
    DueWithin(TimeWindow),
    DueBefore(DateTime<Utc>),
    UpdatedWithin(TimeWindow),
}

impl TaskPredicate {
    pub fn to_condition(&self) -> Condition {
        match self {
            Self::OwnedBy(user_id) => Condition::all().add(TaskColumn::UserId.eq(*user_id)),
            Self::StatusIs(status) => Condition::all().add(TaskColumn::Status.eq(status.as_str())),
            Self::StatusIn(statuses) => Condition::all().add(
                TaskColumn::Status.is_in(statuses.iter().map(|s| s.as_str())),
            ),
            Self::StatusIsNot(status) => Condition::any()
                .add(TaskColumn::Status.is_null())
                .add(TaskColumn::Status.ne(status.as_str())),
            Self::DueWithin(window) => Condition::all()
                .add(TaskColumn::DueDate.gte(window.start))
                .add(TaskColumn::DueDate.lt(window.end)),
            Self::DueBefore(instant) => Condition::all().add(TaskColumn::DueDate.lt(*instant)),
            Self::UpdatedWithin(window) => Condition::all()
                .add(TaskColumn::UpdatedAt.gte(window.start))
                .add(TaskColumn::UpdatedAt.lt(window.end)),
        }
    }

    pub fn matches(&self, task: &task_model::Model) -> bool {
        let status = task.status.as_deref();
        match self {
            Self::OwnedBy(user_id) => task.user_id == *user_id,
            Self::StatusIs(expected) => status == Some(expected.as_str()),
            Self::StatusIn(statuses) => statuses.iter().any(|s| status == Some(s.as_str())),
            Self::StatusIsNot(excluded) => status != Some(excluded.as_str()),
            Self::DueWithin(window) => task.due_date.is_some_and(|due| window.contains(due)),
            Self::DueBefore(instant) => task.due_date.is_some_and(|due| due < *instant),
            Self::UpdatedWithin(window) => window.contains(task.updated_at),
        }
    }
}

/// 述語の論理積
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    predicates: Vec<TaskPredicate>,
}

impl TaskFilter {
    /// 全タスクに一致するフィルタ
    pub fn all() -> Self {
        Self::default()
    }

    pub fn owned_by(user_id: Uuid) -> Self {
        Self::all().and(TaskPredicate::OwnedBy(user_id))
    }

    pub fn and(mut self, predicate: TaskPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn to_condition(&self) -> Condition {
        self.predicates
            .iter()
            .fold(Condition::all(), |cond, predicate| {
                cond.add(predicate.to_condition())
            })
    }

    pub fn matches(&self, task: &task_model::Model) -> bool {
        self.predicates.iter().all(|predicate| predicate.matches(task))
    }
}

/// グループ化できるカテゴリ列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    Status,
    Priority,
}

impl GroupField {
    pub fn column(&self) -> TaskColumn {
        match self {
            Self::Status => TaskColumn::Status,
            Self::Priority => TaskColumn::Priority,
        }
    }

    pub fn value_of<'a>(&self, task: &'a task_model::Model) -> Option<&'a str> {
        match self {
            Self::Status => task.status.as_deref(),
            Self::Priority => task.priority.as_deref(),
        }
    }
}

/// `updated_at` を `YYYY-MM-DD` に切り詰める SQL 式
pub const UPDATED_DAY_EXPRESSION: &str = "to_char(\"tasks\".\"updated_at\", 'YYYY-MM-DD')";

/// インメモリ側で同じ暦日キーを作る
pub fn updated_day_of(task: &task_model::Model) -> String {
    task.updated_at.format("%Y-%m-%d").to_string()
}

/// 述語に一致する件数
#[derive(Debug, Clone, PartialEq)]
pub struct CountQuery {
    pub filter: TaskFilter,
}

/// 単一カテゴリ列でのグループ件数
#[derive(Debug, Clone, PartialEq)]
pub struct GroupByQuery {
    pub filter: TaskFilter,
    pub field: GroupField,
}

/// `updated_at` の暦日ごとの件数（期間内のみ、件数 0 の日は返さない）
#[derive(Debug, Clone, PartialEq)]
pub struct BucketByDayQuery {
    pub filter: TaskFilter,
    pub window: TimeWindow,
}

impl CountQuery {
    pub fn new(filter: TaskFilter) -> Self {
        Self { filter }
    }
}

impl GroupByQuery {
    pub fn new(filter: TaskFilter, field: GroupField) -> Self {
        Self { filter, field }
    }
}

impl BucketByDayQuery {
    pub fn new(filter: TaskFilter, window: TimeWindow) -> Self {
        Self { filter, window }
    }

    /// 期間条件を加えた実際の抽出条件
    pub fn scoped_filter(&self) -> TaskFilter {
        self.filter
            .clone()
            .and(TaskPredicate::UpdatedWithin(self.window))
    }
}

/// グループ化の生結果（ラベルはストアの値そのまま）
pub type GroupCount = (Option<String>, u64);

/// 日別件数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    /// `YYYY-MM-DD`
    pub day: String,
    pub count: u64,
}
