// analytics-backend/src/db.rs

use crate::config::AppConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;

pub type DbPool = DatabaseConnection;

/// 読み取り専用の集計クエリ向けに接続プールを作成
pub async fn create_db_pool(config: &AppConfig) -> Result<DbPool, DbErr> {
    let mut opt = ConnectOptions::new(config.database.url.clone());

    opt.max_connections(config.database.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(config.database.query_timeout)
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(config.is_development());

    Database::connect(opt).await
}
