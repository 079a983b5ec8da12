use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: [(&str, &[Tasks]); 4] = [
    // ユーザー別のステータス集計用
    ("idx_tasks_user_status", &[Tasks::UserId, Tasks::Status]),
    // ユーザー別の優先度集計用
    ("idx_tasks_user_priority", &[Tasks::UserId, Tasks::Priority]),
    // 期日・期限切れカウント用
    ("idx_tasks_user_due_date", &[Tasks::UserId, Tasks::DueDate]),
    // 日別完了数の集計用
    ("idx_tasks_user_updated_at", &[Tasks::UserId, Tasks::UpdatedAt]),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, columns) in INDEXES {
            let mut index = Index::create();
            index.if_not_exists().table(Tasks::Table).name(name);
            for column in columns {
                index.col(*column);
            }
            manager.create_index(index.to_owned()).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _) in INDEXES {
            manager
                .drop_index(
                    Index::drop()
                        .if_exists()
                        .table(Tasks::Table)
                        .name(name)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum Tasks {
    Table,
    UserId,
    Status,
    Priority,
    DueDate,
    UpdatedAt,
}
