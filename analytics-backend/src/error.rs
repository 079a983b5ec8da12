// analytics-backend/src/error.rs

use crate::middleware::auth::AuthError;
use crate::repository::analytics_store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// 集計処理中のエラー
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("time data '{0}' does not match format '%Y-%m-%d'")]
    InvalidDateFormat(String),

    #[error("invalid days value '{0}': expected a non-negative integer")]
    InvalidDays(String),

    #[error("{0}")]
    AggregationFailure(#[from] StoreError),

    #[error("request timed out after {0:?}")]
    RequestTimeout(std::time::Duration),

    #[error("request failed: {0}")]
    RequestFailed(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    /// ボディ全体がエラーメッセージ文字列になる 500（/stats の既存クライアント互換）
    #[error("An error occurred: {0}")]
    BareInternalServerError(AnalyticsError),

    #[error("Bad request: {0}")]
    BadRequest(AnalyticsError),

    #[error("Internal server error: {0}")]
    InternalServerError(AnalyticsError),
}

// axum でエラーをHTTPレスポンスに変換するための実装
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthorized(auth_error) => auth_error.into_response(),
            AppError::BareInternalServerError(err) => {
                error!(error = %err, "Statistics request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(format!("An error occurred: {}", err)),
                )
                    .into_response()
            }
            AppError::BadRequest(err) => {
                error!(error = %err, "Request failed with bad request");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: err.to_string(),
                    }),
                )
                    .into_response()
            }
            AppError::InternalServerError(err) => {
                error!(error = %err, "Request failed with internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: err.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

// Result 型のエイリアス
pub type AppResult<T> = Result<T, AppError>;

/// `{"error": "..."}` 形式のエラーレスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
