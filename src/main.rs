use tracing_subscriber::EnvFilter;

use civic_dashboard_api::{config, database::DatabaseManager, is_production, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(!is_production!())
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Civic Dashboard API in {:?} mode", config.environment);
    if config.security.jwt_secret.is_empty() {
        tracing::warn!("JWT_SECRET is not set; every /api request will be rejected");
    }

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Civic Dashboard API listening on http://{}", bind_addr);

    axum::serve(listener, server::app())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    DatabaseManager::close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
