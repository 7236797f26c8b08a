//! ShareIt Gateway - validating reverse proxy in front of the API

use axum_helpers::{create_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tower_http::trace::TraceLayer;
use tracing::info;

mod config;
mod dtos;
mod proxy;
mod routes;

use config::Config;
use proxy::Proxy;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let proxy = Proxy::new(config.backend_url.clone());
    let app = routes::router(proxy)
        .merge(health_router(config.app))
        .layer(TraceLayer::new_for_http());

    info!(
        "Starting ShareIt gateway on port {}, forwarding to {}",
        config.server.port, config.backend_url
    );
    create_app(app, &config.server).await?;

    info!("ShareIt gateway shutdown complete");
    Ok(())
}
