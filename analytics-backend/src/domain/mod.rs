// analytics-backend/src/domain/mod.rs
pub mod distribution;
pub mod task_model;
pub mod task_priority;
pub mod task_status;
pub mod time_window;
pub mod user_model;
