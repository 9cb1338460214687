//! # canteen-server
//!
//! Starts the store, seeds it, and serves the `/api` router until Ctrl-C or SIGTERM.

use std::error::Error;
use std::sync::Arc;

use canteen::api;
use canteen::auth::Argon2Hasher;
use canteen::clock::SystemClock;
use canteen::config::Config;
use canteen::lifecycle::CanteenSystem;
use resource_store::tracing::setup_tracing;
use tokio::net::TcpListener;
use tokio::signal::{self, ctrl_c};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_tracing();

    let config = Config::load();
    info!(port = config.port, "Starting canteen server");

    let system = CanteenSystem::new(
        &config,
        Arc::new(SystemClock),
        Arc::new(Argon2Hasher::default()),
    );

    if config.seed_data {
        system.seed_defaults().await?;
    }
    if let Some(password) = &config.admin_password {
        system.provision_admin(password).await?;
    }

    let app = api::router(system.api_state());

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    system.shutdown().await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
