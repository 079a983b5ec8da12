// analytics-backend/src/api/handlers/system_handler.rs

use crate::api::dto::analytics_dto::HealthResponse;
use crate::api::AppState;
use axum::{routing::get, Json, Router};

pub const HEALTH_MESSAGE: &str = "Analytics service alive...";

/// 死活監視
pub async fn health_check_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTH_MESSAGE.to_string(),
    })
}

pub fn system_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check_handler))
        .route("/health/", get(health_check_handler))
        .with_state(app_state)
}
