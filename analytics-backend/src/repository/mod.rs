// analytics-backend/src/repository/mod.rs
pub mod analytics_query;
pub mod analytics_store;
#[cfg(any(test, feature = "test-util"))]
pub mod memory_store;
pub mod task_repository;
pub mod user_repository;
