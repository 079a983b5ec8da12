// migration/src/main.rs
use sea_orm_migration::prelude::*;

// DATABASE_URL を読んでマイグレーションを適用する CLI（ローカル開発用）
#[async_std::main]
async fn main() {
    cli::run_cli(migration::Migrator).await;
}
