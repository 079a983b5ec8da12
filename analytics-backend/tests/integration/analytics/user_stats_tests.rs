use crate::common::{
    self,
    app_helper::setup_memory_app,
    auth_helper::{create_authenticated_request, issue_token, issue_token_without_expiry},
    test_data::{ten_task_portfolio, TaskBuilder},
};
use analytics_backend::repository::memory_store::InMemoryAnalyticsStore;
use axum::http::StatusCode;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

#[tokio::test]
async fn test_user_statistics_for_ten_tasks() {
    let owner = Uuid::new_v4();
    let mut tasks = ten_task_portfolio(owner);
    tasks.push(
        TaskBuilder::new(Uuid::new_v4())
            .status("Completed")
            .priority("High")
            .build(),
    );
    let (app, _store) = setup_memory_app(InMemoryAnalyticsStore::new(tasks));
    let token = issue_token(&owner.to_string());

    let response = app
        .oneshot(create_authenticated_request("/stats/", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;

    assert_eq!(body["total_tasks"], 10);
    assert_eq!(body["completed_tasks"], 4);
    assert_eq!(body["pending_tasks"], 6);
    assert_eq!(body["due_tasks"], 0);
    assert_eq!(body["overdue_tasks"], 0);
    assert_eq!(body["completion_rate"], json!(40.0));
    assert_eq!(
        body["task_status_distribution"],
        json!({"Todo": 3, "In Progress": 3, "Completed": 4})
    );
    assert_eq!(
        body["priority_distribution"],
        json!({"Low": 5, "Medium": 5, "High": 0})
    );
}

#[tokio::test]
async fn test_user_statistics_without_tasks_zero_fills() {
    let (app, _store) = setup_memory_app(InMemoryAnalyticsStore::default());
    let token = issue_token_without_expiry(&Uuid::new_v4().to_string());

    let response = app
        .oneshot(create_authenticated_request("/stats", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;

    assert_eq!(body["total_tasks"], 0);
    assert_eq!(body["completion_rate"], json!(0.0));
    assert_eq!(
        body["task_status_distribution"],
        json!({"Todo": 0, "In Progress": 0, "Completed": 0})
    );
    assert_eq!(
        body["priority_distribution"],
        json!({"Low": 0, "Medium": 0, "High": 0})
    );
}

#[tokio::test]
async fn test_due_and_overdue_counts_with_default_window() {
    let owner = Uuid::new_v4();
    let now = Utc::now();
    let tasks = vec![
        TaskBuilder::new(owner).due(now + Duration::hours(6)).build(),
        TaskBuilder::new(owner)
            .status("Completed")
            .due(now + Duration::hours(6))
            .build(),
        TaskBuilder::new(owner)
            .status("In Progress")
            .due(now + Duration::days(3))
            .build(),
        TaskBuilder::new(owner)
            .status("In Progress")
            .due(now - Duration::days(2))
            .build(),
        TaskBuilder::new(owner)
            .without_status()
            .due(now - Duration::days(1))
            .build(),
        TaskBuilder::new(owner)
            .status("Completed")
            .due(now - Duration::days(1))
            .build(),
    ];
    let (app, _store) = setup_memory_app(InMemoryAnalyticsStore::new(tasks));
    let token = issue_token(&owner.to_string());

    let response = app
        .oneshot(create_authenticated_request("/stats/", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;

    assert_eq!(body["total_tasks"], 6);
    assert_eq!(body["due_tasks"], 1);
    assert_eq!(body["overdue_tasks"], 2);
    // ステータス未設定のタスクは分布にも pending にも含まれない
    assert_eq!(body["pending_tasks"], 3);
    assert_eq!(
        body["task_status_distribution"],
        json!({"Todo": 1, "In Progress": 2, "Completed": 2})
    );
}

#[tokio::test]
async fn test_end_date_covers_the_whole_day() {
    let owner = Uuid::new_v4();
    let midnight = |date: NaiveDate| Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap());
    let end_day = NaiveDate::from_ymd_opt(2030, 1, 15).unwrap();
    let day_after = NaiveDate::from_ymd_opt(2030, 1, 16).unwrap();

    let tasks = vec![
        TaskBuilder::new(owner).due(midnight(end_day)).build(),
        TaskBuilder::new(owner)
            .due(midnight(day_after) - Duration::seconds(1))
            .build(),
        TaskBuilder::new(owner).due(midnight(day_after)).build(),
    ];
    let (app, _store) = setup_memory_app(InMemoryAnalyticsStore::new(tasks));
    let token = issue_token(&owner.to_string());

    let response = app
        .oneshot(create_authenticated_request(
            "/stats/?start_date=2030-01-10&end_date=2030-01-15",
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await["due_tasks"], 2);
}

#[tokio::test]
async fn test_invalid_date_returns_bare_error_string() {
    let (app, store) = setup_memory_app(InMemoryAnalyticsStore::default());
    let token = issue_token(&Uuid::new_v4().to_string());

    let response = app
        .oneshot(create_authenticated_request(
            "/stats/?start_date=15-01-2030",
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        common::body_json(response).await,
        json!("An error occurred: time data '15-01-2030' does not match format '%Y-%m-%d'")
    );
    assert_eq!(store.queries_served(), 0);
}

#[tokio::test]
async fn test_whitespace_date_is_rejected_not_defaulted() {
    let (app, store) = setup_memory_app(InMemoryAnalyticsStore::default());
    let token = issue_token(&Uuid::new_v4().to_string());

    let response = app
        .oneshot(create_authenticated_request(
            "/stats/?start_date=%20%20%20",
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        common::body_json(response).await,
        json!("An error occurred: time data '   ' does not match format '%Y-%m-%d'")
    );
    assert_eq!(store.queries_served(), 0);
}

#[tokio::test]
async fn test_store_failure_returns_bare_error_string() {
    let (app, _store) = setup_memory_app(InMemoryAnalyticsStore::failing("connection refused"));
    let token = issue_token(&Uuid::new_v4().to_string());

    let response = app
        .oneshot(create_authenticated_request("/stats/", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = common::body_json(response).await;
    let message = body.as_str().unwrap();
    assert!(message.starts_with("An error occurred: "));
    assert!(message.contains("connection refused"));
}

#[tokio::test]
async fn test_non_uuid_caller_is_processing_failure() {
    let (app, _store) = setup_memory_app(InMemoryAnalyticsStore::default());
    let token = issue_token("65f1c0ffee0000000000abcd");

    let response = app
        .oneshot(create_authenticated_request("/stats/", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = common::body_json(response).await;
    assert!(body.as_str().unwrap().contains("65f1c0ffee0000000000abcd"));
}
