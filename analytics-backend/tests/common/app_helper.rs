// tests/common/app_helper.rs

use analytics_backend::{
    api::{create_app_router, AppState},
    config::AppConfig,
    repository::{
        analytics_store::{AnalyticsStore, DbAnalyticsStore},
        memory_store::InMemoryAnalyticsStore,
    },
    service::analytics_service::AnalyticsService,
    utils::jwt::JwtManager,
};
use axum::Router;
use std::sync::Arc;

use crate::common;

/// 任意のストアでアプリを組み立てる
pub fn setup_app_with_store(store: Arc<dyn AnalyticsStore>) -> Router {
    setup_app_with_config(AppConfig::for_testing(), store)
}

/// 設定を差し替えてアプリを組み立てる
pub fn setup_app_with_config(app_config: AppConfig, store: Arc<dyn AnalyticsStore>) -> Router {
    common::init_test_env();

    let app_config = Arc::new(app_config);
    let jwt_manager = Arc::new(JwtManager::new(app_config.jwt_config()).unwrap());
    let analytics_service = Arc::new(AnalyticsService::new(
        store,
        app_config.database.query_timeout,
    ));

    create_app_router(AppState::new(analytics_service, jwt_manager, app_config))
}

/// インメモリストアでアプリを組み立てる（ストアのハンドルも返す）
pub fn setup_memory_app(store: InMemoryAnalyticsStore) -> (Router, Arc<InMemoryAnalyticsStore>) {
    let store = Arc::new(store);
    let app = setup_app_with_store(store.clone());
    (app, store)
}

/// Postgres 上のストアでアプリを組み立てる
pub async fn setup_db_app() -> (Router, common::db::TestDatabase) {
    let db = common::db::TestDatabase::new().await;
    let store = Arc::new(DbAnalyticsStore::new(db.connection.clone()));
    (setup_app_with_store(store), db)
}
