// analytics-backend/src/main.rs
use analytics_backend::api::{create_app_router, AppState};
use analytics_backend::config::AppConfig;
use analytics_backend::db::create_db_pool;
use analytics_backend::repository::analytics_store::DbAnalyticsStore;
use analytics_backend::service::analytics_service::AnalyticsService;
use analytics_backend::utils::jwt::JwtManager;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "analytics_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting Analytics Backend server...");

    // 設定を読み込む
    let app_config = Arc::new(AppConfig::from_env()?);
    tracing::info!(
        environment = %app_config.environment,
        addr = %app_config.server_addr(),
        "Configuration loaded"
    );

    let jwt_manager = Arc::new(JwtManager::new(app_config.jwt_config())?);

    // データベース接続を作成
    let db_pool = create_db_pool(&app_config).await?;
    tracing::info!("Database pool created successfully.");

    let store = Arc::new(DbAnalyticsStore::new(db_pool.clone()));
    let analytics_service = Arc::new(AnalyticsService::new(
        store,
        app_config.database.query_timeout,
    ));

    let app_state = AppState::new(analytics_service, jwt_manager, app_config.clone());
    let app_router = create_app_router(app_state);

    let listener = TcpListener::bind(app_config.server_addr()).await?;
    tracing::info!("Server listening on {}", app_config.server_addr());

    axum::serve(listener, app_router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_pool.close().await?;
    tracing::info!("Server stopped.");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
}
