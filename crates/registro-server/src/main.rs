//! Binary entrypoint for the registry HTTP server.
//!
//! Reads configuration from environment variables (see [`ServerConfig`]) and
//! logging filters from `RUST_LOG` (default: "info").

use registro_server::config::ServerConfig;
use registro_server::router::build_router;
use registro_server::state::AppState;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::from_env()?;
    let addr = config.socket_addr()?;

    let app = build_router(AppState::in_memory());

    tracing::info!("registro server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl+C handler: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("received Ctrl+C, draining requests");
}
