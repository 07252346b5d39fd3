//! Server: loads configuration, connects the configured store, mounts the API and
//! common routes.

use shop_demo::{app_router, logging, AppConfig, AppState};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(logging::log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    let config = AppConfig::load()?;
    let state = AppState::from_config(&config).await?;
    let app = app_router(state, &config);

    let listener = TcpListener::bind(config.server_address()).await?;
    tracing::info!(backend = ?config.storage.backend, "listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
