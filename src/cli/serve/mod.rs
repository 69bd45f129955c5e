//! Serve command - runs the HTTP API

use clap::Args;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::api::create_router;
use crate::config::{get_settings, load_warnings, Settings};
use crate::infrastructure::logging;

/// Overrides for the configured listen address
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Host to bind (overrides HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides PORT)
    #[arg(long)]
    pub port: Option<u16>,
}

/// Run the API server
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = get_settings();
    logging::init_logging(&logging::LoggingConfig::from_settings(&settings));

    for warning in load_warnings() {
        warn!("Settings: {}", warning);
    }

    let (host, port) = listen_address(&settings, &args);
    let state = crate::create_app_state(settings.clone());
    let app = create_router(state);

    info!(
        "Starting {} v{} on {}:{}",
        settings.app_title, settings.app_version, host, port
    );

    let listener = TcpListener::bind((host.as_str(), port)).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

/// Host and port to listen on; the host may be an IP address or a hostname
fn listen_address(settings: &Settings, args: &ServeArgs) -> (String, u16) {
    let host = args.host.clone().unwrap_or_else(|| settings.host.clone());
    let port = args.port.unwrap_or(settings.port);

    (host, port)
}
