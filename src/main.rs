use std::sync::Arc;

use portfolio_backend::{
    build_router,
    infrastructure::{AppConfig, DatabaseManager, Logger, PgDocumentStore},
    AppState,
};
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志
    Logger::init();

    let config = AppConfig::load()?;
    info!(
        port = config.port,
        database_url_set = config.database_url_set(),
        database_name_set = config.database_name_set(),
        "Configuration loaded"
    );

    let db = init_database(&config).await;
    let app = build_router(AppState::new(db, &config));

    let listener = TcpListener::bind(config.bind_address()).await?;
    info!("🚀 Fullstack Developer Portfolio API running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

/// 数据库不可用时服务仍然启动，存储操作返回 500，诊断接口报告原因
async fn init_database(config: &AppConfig) -> DatabaseManager {
    let Some((url, name)) = config.database_settings() else {
        warn!("DATABASE_URL or DATABASE_NAME not set, running without a database");
        return DatabaseManager::unavailable();
    };

    let store = match PgDocumentStore::connect_lazy(url, name) {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "Invalid database configuration");
            return DatabaseManager::unavailable();
        }
    };

    if let Err(e) = store.ensure_schema().await {
        warn!(error = %e, "Could not prepare document table, retrying on first use");
    }

    DatabaseManager::new(Arc::new(store))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
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

    info!("Shutdown signal received");
}
