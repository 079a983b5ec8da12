// analytics-backend/src/api/mod.rs
use crate::config::AppConfig;
use crate::error::AnalyticsError;
use crate::logging::{inject_request_context, logging_middleware};
use crate::service::analytics_service::AnalyticsService;
use crate::utils::jwt::JwtManager;
use axum::error_handling::HandleErrorLayer;
use axum::http::{header, HeaderValue, Method, Uri};
use axum::{middleware as axum_middleware, BoxError, Router};
use std::sync::Arc;
use tower::timeout::{error::Elapsed, TimeoutLayer};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod handlers;

use handlers::analytics_handler::{analytics_router, request_failure};
use handlers::system_handler::system_router;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub analytics_service: Arc<AnalyticsService>,
    pub jwt_manager: Arc<JwtManager>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        analytics_service: Arc<AnalyticsService>,
        jwt_manager: Arc<JwtManager>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            analytics_service,
            jwt_manager,
            config,
        }
    }
}

/// 認証エクストラクタが検証器を取り出すための状態
pub trait HasJwtManager {
    fn jwt_manager(&self) -> &JwtManager;
}

impl HasJwtManager for AppState {
    fn jwt_manager(&self) -> &JwtManager {
        &self.jwt_manager
    }
}

/// 全ルートとミドルウェアを組み立てる
pub fn create_app_router(app_state: AppState) -> Router {
    let config = app_state.config.clone();
    let request_timeout = config.server.request_timeout;

    Router::new()
        .merge(system_router(app_state.clone()))
        .merge(analytics_router(app_state))
        // タイムアウトもエンドポイントごとの失敗形式で返す
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(
                    move |uri: Uri, err: BoxError| async move {
                        let failure = if err.is::<Elapsed>() {
                            AnalyticsError::RequestTimeout(request_timeout)
                        } else {
                            AnalyticsError::RequestFailed(err.to_string())
                        };
                        request_failure(uri.path(), failure)
                    },
                ))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(axum_middleware::from_fn(inject_request_context))
        .layer(cors_layer(&config))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
