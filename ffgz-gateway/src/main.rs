//! Entry point for the `ffgz-gateway` HTTP server.

use std::sync::Arc;

use ffgz_gateway::{config::GatewayConfig, routes::create_router};
use ffgz_store::{SqliteStore, StoreConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = GatewayConfig::from_env();

    let store = match SqliteStore::open(&StoreConfig::file(config.db_path.clone())) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(path = %config.db_path.display(), error = %e, "failed to open store");
            std::process::exit(1);
        }
    };
    let app = create_router(Arc::new(store));

    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %config.listen_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %config.listen_addr, db = %config.db_path.display(), "ffgz-gateway listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
