use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use yubin_client::ReqwestAddressApi;
use yubin_core::{FileTokenStore, ProxyService};
use yubin_server::config::ServerConfig;
use yubin_server::routes;
use yubin_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("yubin=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::parse();
    config.validate()?;

    let api = ReqwestAddressApi::with_base_url(&config.upstream_base_url)?
        .with_timeout(config.upstream_timeout())?;
    let store = FileTokenStore::new(&config.token_file);

    if !config.credentials_file.exists() {
        tracing::warn!(
            path = %config.credentials_file.display(),
            "Credentials file not found; /api will answer 500 until it is provided"
        );
    }

    let state = Arc::new(AppState {
        proxy: ProxyService::new(store, api, &config.credentials_file),
        frontend_dir: config.frontend_dir.clone(),
    });

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http().on_response(DefaultOnResponse::new().level(Level::INFO)));

    let addr = config.listen_addr();
    let access_url = config.access_url();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Listening on http://{addr}");
    tracing::info!("Access from host via {access_url}/");
    tracing::info!("Quick check: {access_url}/api?search_code=1000001");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
