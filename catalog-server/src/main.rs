//! Catalog server entry point.

use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog_server::{http, Dependencies, ServerError};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let deps = Dependencies::new().await?;
    let bind_addr = deps.settings.bind_addr.clone();

    let app = http::router(deps.service.clone());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!(bind_addr = %bind_addr, "Catalog server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Catalog server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
