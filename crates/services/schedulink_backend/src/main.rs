// File: services/schedulink_backend/src/main.rs
mod app;

use schedulink_common::logging;
use schedulink_config::load_config;
use std::process::ExitCode;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            logging::log_error(e, "Failed to load config");
            return ExitCode::FAILURE;
        }
    };

    let app = match app::build_app(&config).await {
        Ok(app) => app,
        Err(e) => {
            logging::log_error(e, "Failed to initialize entity store");
            return ExitCode::FAILURE;
        }
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };
    info!("Starting server at http://{}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Server stopped");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        // keep serving; the process can still be killed
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
