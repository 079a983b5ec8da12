use crate::common::{
    self,
    app_helper::setup_app_with_config,
    auth_helper::{create_authenticated_request, create_request, issue_token},
};
use analytics_backend::config::AppConfig;
use analytics_backend::repository::memory_store::InMemoryAnalyticsStore;
use axum::http::StatusCode;
use axum::Router;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

/// クエリより先にリクエスト全体のタイムアウトが切れるアプリ
fn slow_app() -> Router {
    let mut config = AppConfig::for_testing();
    config.server.request_timeout = Duration::from_millis(50);
    config.database.query_timeout = Duration::from_secs(5);

    let store = InMemoryAnalyticsStore::default()
        .with_users([Uuid::new_v4()])
        .with_delay(Duration::from_millis(500));
    setup_app_with_config(config, Arc::new(store))
}

#[tokio::test]
async fn test_stats_timeout_returns_bare_error_string() {
    let token = issue_token(&Uuid::new_v4().to_string());

    for uri in ["/stats", "/stats/"] {
        let response = slow_app()
            .oneshot(create_authenticated_request(uri, &token))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            common::body_json(response).await,
            json!("An error occurred: request timed out after 50ms")
        );
    }
}

#[tokio::test]
async fn test_productivity_timeout_returns_bad_request() {
    let token = issue_token(&Uuid::new_v4().to_string());

    let response = slow_app()
        .oneshot(create_authenticated_request("/productivity/", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        common::body_json(response).await,
        json!({"error": "request timed out after 50ms"})
    );
}

#[tokio::test]
async fn test_public_stats_timeout_returns_error_object() {
    let response = slow_app()
        .oneshot(create_request("/public-stats/"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        common::body_json(response).await,
        json!({"error": "request timed out after 50ms"})
    );
}
