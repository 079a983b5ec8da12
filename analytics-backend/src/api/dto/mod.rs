// analytics-backend/src/api/dto/mod.rs
pub mod analytics_dto;
pub mod analytics_query_dto;
