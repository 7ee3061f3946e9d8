use anyhow::Context;

use socks_api::app::{build_app, services::build_services};
use socks_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    socks_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;

    let services = build_services(&config)
        .await
        .context("failed to initialise stock storage")?;
    tracing::info!(backend = services.backend(), "stock storage ready");

    let app = build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
