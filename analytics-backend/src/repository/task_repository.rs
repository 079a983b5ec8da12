// analytics-backend/src/repository/task_repository.rs
use super::analytics_query::{GroupField, TaskFilter, UPDATED_DAY_EXPRESSION};
use crate::domain::task_model::{self, Entity as TaskEntity};
use sea_orm::sea_query::Expr;
use sea_orm::{
    DbConn, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

pub struct TaskRepository {
    db: DbConn,
}

impl TaskRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn count_matching(&self, filter: &TaskFilter) -> Result<u64, DbErr> {
        TaskEntity::find()
            .filter(filter.to_condition())
            .count(&self.db)
            .await
    }

    /// カテゴリ列ごとのタスク数を取得（実際に存在するラベルのみ）
    pub async fn count_grouped_by(
        &self,
        filter: &TaskFilter,
        field: GroupField,
    ) -> Result<Vec<(Option<String>, u64)>, DbErr> {
        let column = field.column();

        let result = TaskEntity::find()
            .select_only()
            .column(column)
            .column_as(Expr::col(task_model::Column::Id).count(), "count")
            .filter(filter.to_condition())
            .group_by(column)
            .into_tuple::<(Option<String>, i64)>()
            .all(&self.db)
            .await?;

        Ok(result
            .into_iter()
            .map(|(label, count)| (label, count as u64))
            .collect())
    }

    /// 条件に一致するタスク数を updated_at の暦日ごとに取得（日付の昇順）
    pub async fn count_by_updated_day(
        &self,
        filter: &TaskFilter,
    ) -> Result<Vec<(String, u64)>, DbErr> {
        let day = Expr::cust(UPDATED_DAY_EXPRESSION);

        let result = TaskEntity::find()
            .select_only()
            .column_as(day.clone(), "day")
            .column_as(Expr::col(task_model::Column::Id).count(), "count")
            .filter(filter.to_condition())
            .group_by(day.clone())
            .order_by_asc(day)
            .into_tuple::<(String, i64)>()
            .all(&self.db)
            .await?;

        Ok(result
            .into_iter()
            .map(|(day, count)| (day, count as u64))
            .collect())
    }

    /// タスクを持つユーザーの数（user_id の重複を除いた件数）
    pub async fn count_distinct_owners(&self) -> Result<u64, DbErr> {
        TaskEntity::find()
            .select_only()
            .column(task_model::Column::UserId)
            .distinct()
            .count(&self.db)
            .await
    }
}
