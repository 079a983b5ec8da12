// analytics-backend/src/service/mod.rs
pub mod analytics_service;
pub mod statistics;
pub mod window_resolver;
