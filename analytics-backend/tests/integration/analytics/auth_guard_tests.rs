use crate::common::{
    self,
    app_helper::setup_memory_app,
    auth_helper::{
        create_authenticated_request, create_request, issue_expired_token,
        issue_token_with_foreign_secret,
    },
    test_data::ten_task_portfolio,
};
use analytics_backend::repository::memory_store::InMemoryAnalyticsStore;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

const PROTECTED_ROUTES: [&str; 4] = ["/stats/", "/stats", "/productivity/", "/productivity"];

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let (app, store) = setup_memory_app(InMemoryAnalyticsStore::new(ten_task_portfolio(
        Uuid::new_v4(),
    )));

    for uri in PROTECTED_ROUTES {
        let response = app.clone().oneshot(create_request(uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(
            common::body_json(response).await,
            json!({"message": "Not a valid User, please login/register"})
        );
    }

    assert_eq!(store.queries_served(), 0);
}

#[tokio::test]
async fn test_non_bearer_scheme_is_treated_as_missing() {
    let (app, _store) = setup_memory_app(InMemoryAnalyticsStore::default());

    let request = Request::builder()
        .uri("/stats/")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        common::body_json(response).await,
        json!({"message": "Not a valid User, please login/register"})
    );
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let (app, store) = setup_memory_app(InMemoryAnalyticsStore::default());
    let token = issue_expired_token(&Uuid::new_v4().to_string());

    for uri in PROTECTED_ROUTES {
        let response = app
            .clone()
            .oneshot(create_authenticated_request(uri, &token))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(
            common::body_json(response).await,
            json!({"message": "Token expired"})
        );
    }

    assert_eq!(store.queries_served(), 0);
}

#[tokio::test]
async fn test_invalid_tokens_are_rejected() {
    let (app, store) = setup_memory_app(InMemoryAnalyticsStore::default());
    let foreign = issue_token_with_foreign_secret(&Uuid::new_v4().to_string());

    for token in [foreign.as_str(), "not-a-jwt", "a.b.c"] {
        let response = app
            .clone()
            .oneshot(create_authenticated_request("/stats/", token))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            common::body_json(response).await,
            json!({"message": "Invalid token"})
        );
    }

    assert_eq!(store.queries_served(), 0);
}

#[tokio::test]
async fn test_token_without_id_claim_is_invalid() {
    let (app, _store) = setup_memory_app(InMemoryAnalyticsStore::default());
    let token = common::auth_helper::sign_claims(
        &json!({"sub": Uuid::new_v4().to_string()}),
        &common::auth_helper::test_secret(),
    );

    let response = app
        .oneshot(create_authenticated_request("/productivity/", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        common::body_json(response).await,
        json!({"message": "Invalid token"})
    );
}

#[tokio::test]
async fn test_public_stats_needs_no_token() {
    let (app, _store) = setup_memory_app(InMemoryAnalyticsStore::default());

    let response = app.oneshot(create_request("/public-stats/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
