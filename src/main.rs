use dotenvy::dotenv;
use once_cell::sync::Lazy;
use tokio::{net::TcpListener, signal};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod controllers;
mod db;
mod middleware;
mod models;
mod pagination;
mod routes;
mod state;
mod utils;


#[tokio::main]
async fn main() {
    dotenv().ok();

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    Lazy::force(&controllers::home::START_TIME);

    let config = match config::Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let store = match db::connection::init_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to initialize store: {e}");
            std::process::exit(1);
        }
    };

    let server_addr = config.server_addr.clone();
    let app = routes::app(state::AppState::new(store, config));

    let listener = match TcpListener::bind(&server_addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to address {server_addr}: {e}");
            std::process::exit(1);
        }
    };

    info!("Server running at http://{server_addr}");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {e}");
        std::process::exit(1);
    }

    info!("Server shut down");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
