// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// 集計対象ストアのスキーマ
mod m20250801_000001_create_users_table;
mod m20250801_000002_create_tasks_table;
mod m20250801_000003_add_task_analytics_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. 基本テーブル作成（tasks は users に依存）
            Box::new(m20250801_000001_create_users_table::Migration),
            Box::new(m20250801_000002_create_tasks_table::Migration),
            // 2. 集計クエリ用のインデックス
            Box::new(m20250801_000003_add_task_analytics_indexes::Migration),
        ]
    }
}
