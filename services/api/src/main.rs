mod config;
mod routes;

use crate::config::Config;
use crate::routes::AppState;
use anyhow::Context;
use mirror_core::catalog::{QuestionCatalog, loader::load_catalog};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load application configuration")?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(ChronoLocal::rfc_3339())
        .init();

    let catalog = match &config.catalog_dir {
        Some(dir) => load_catalog(dir).context("Failed to load question catalog")?,
        None => QuestionCatalog::builtin().context("Built-in question catalog is invalid")?,
    };
    info!("Serving {} interview domains", catalog.domains().len());

    let mut client_config =
        persona_client::Config::builder().with_api_key(config.persona_api_key.expose_secret());
    if let Some(url) = &config.persona_api_url {
        client_config = client_config.with_base_url(url);
    }
    let client = persona_client::Client::new(client_config.build());
    info!("Forwarding persona calls to {}", client.config().base_url());

    // Configure a permissive CORS policy so a separately served front end can call in.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router(AppState {
        catalog: Arc::new(catalog),
        client,
    })
    .layer(cors);

    info!("Starting API server, listening on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received Ctrl-C, shutting down...");
            }
        })
        .await?;

    Ok(())
}
