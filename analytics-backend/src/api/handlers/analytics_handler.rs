// analytics-backend/src/api/handlers/analytics_handler.rs

use crate::api::dto::analytics_dto::{
    ProductivityResponse, PublicStatsResponse, UserStatisticsResponse,
};
use crate::api::dto::analytics_query_dto::{ProductivityQuery, StatsQuery};
use crate::api::AppState;
use crate::error::{AnalyticsError, AppError, AppResult};
use crate::middleware::auth::CallerIdentity;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::info;

/// 呼び出し元ユーザーのタスク統計
///
/// 失敗時はエラーメッセージ文字列そのものを 500 のボディとして返す。
pub async fn user_statistics_handler(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Query(query): Query<StatsQuery>,
) -> AppResult<Json<UserStatisticsResponse>> {
    info!(
        caller_id = %caller.id(),
        start_date = ?query.start_date,
        end_date = ?query.end_date,
        "User statistics requested"
    );

    let stats = app_state
        .analytics_service
        .user_statistics(
            &caller,
            query.start_date.as_deref(),
            query.end_date.as_deref(),
        )
        .await
        .map_err(AppError::BareInternalServerError)?;

    Ok(Json(stats))
}

/// 日別の完了件数トレンド
pub async fn productivity_handler(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Query(query): Query<ProductivityQuery>,
) -> AppResult<Json<ProductivityResponse>> {
    info!(caller_id = %caller.id(), days = ?query.days, "Productivity trend requested");

    let trend = app_state
        .analytics_service
        .productivity_trend(&caller, query.days.as_deref())
        .await
        .map_err(AppError::BadRequest)?;

    Ok(Json(trend))
}

/// プラットフォーム全体の統計（認証不要）
pub async fn public_stats_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<PublicStatsResponse>> {
    let stats = app_state
        .analytics_service
        .public_statistics()
        .await
        .map_err(AppError::InternalServerError)?;

    Ok(Json(stats))
}

/// ハンドラ外（ミドルウェア層）の失敗を各エンドポイントの失敗形式に合わせる
pub fn request_failure(path: &str, err: AnalyticsError) -> AppError {
    match path.trim_end_matches('/') {
        "/stats" => AppError::BareInternalServerError(err),
        "/productivity" => AppError::BadRequest(err),
        _ => AppError::InternalServerError(err),
    }
}

// --- ルーター ---

/// アナリティクスルーターを作成（末尾スラッシュの有無どちらでも受け付ける）
pub fn analytics_router(app_state: AppState) -> Router {
    Router::new()
        .route("/stats", get(user_statistics_handler))
        .route("/stats/", get(user_statistics_handler))
        .route("/productivity", get(productivity_handler))
        .route("/productivity/", get(productivity_handler))
        .route("/public-stats", get(public_stats_handler))
        .route("/public-stats/", get(public_stats_handler))
        .with_state(app_state)
}
