// analytics-backend/src/middleware/auth.rs

use crate::api::HasJwtManager;
use crate::repository::analytics_store::StoreError;
use crate::utils::jwt::{JwtError, JwtManager};
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

/// 認証失敗の種別（すべて 401 で返す）
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing bearer credential")]
    MissingCredential,

    #[error("Credential has expired")]
    ExpiredCredential,

    #[error("Credential failed validation")]
    InvalidCredential,
}

impl AuthError {
    /// クライアントに返す固定メッセージ
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingCredential => "Not a valid User, please login/register",
            Self::ExpiredCredential => "Token expired",
            Self::InvalidCredential => "Invalid token",
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenExpired => Self::ExpiredCredential,
            _ => Self::InvalidCredential,
        }
    }
}

/// 認証エラーのレスポンスボディ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthErrorResponse {
    pub message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(AuthErrorResponse {
                message: self.message().to_string(),
            }),
        )
            .into_response()
    }
}

/// 検証済みトークンから得た呼び出し元
///
/// リクエスト一回分だけ存在し、永続化しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    id: String,
}

impl CallerIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// ストアの所有者参照に変換
    pub fn owner_id(&self) -> Result<Uuid, StoreError> {
        Uuid::parse_str(&self.id).map_err(|_| StoreError::InvalidOwner(self.id.clone()))
    }
}

/// Authorization ヘッダーから Bearer トークンを抽出
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// ヘッダーを検証して呼び出し元を特定する
pub fn authenticate(
    headers: &HeaderMap,
    jwt_manager: &JwtManager,
) -> Result<CallerIdentity, AuthError> {
    let token = extract_bearer_token(headers).ok_or(AuthError::MissingCredential)?;
    let claims = jwt_manager.verify_token(token)?;
    Ok(CallerIdentity::new(claims.id))
}

// --- Axum Extractors ---

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: HasJwtManager + Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_string();

        authenticate(&parts.headers, state.jwt_manager()).map_err(|e| {
            warn!(path = %path, reason = %e, "Rejected unauthenticated request");
            e
        })
    }
}
