use std::sync::Arc;

use anyhow::Context;
use habit_server::{build_router, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::from_env().unwrap_or_default();
    let service = Arc::new(config.build_service());
    let addr = config.socket_addr();

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("habits API listening on http://{addr}/api/habits");
    axum::serve(listener, build_router(service))
        .await
        .context("server terminated unexpectedly")?;
    Ok(())
}
