use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use lablens::api::server::start_api_server;
use lablens::config;
use lablens::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    // Reference-table integrity is checked here, at startup, so a broken
    // configuration aborts instead of failing lookups mid-request.
    let state = match AppState::new(config::report_path()) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("startup failed: {e}");
            std::process::exit(1);
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config::listen_port()));
    let mut server = match start_api_server(state, addr).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("startup failed: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(addr = %server.session.server_addr, "{} API ready", config::APP_NAME);

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }

    tracing::info!("shutdown requested");
    server.shutdown();
}
