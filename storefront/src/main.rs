//! Storefront HTTP server.
//!
//! Serves the event catalogue, search and pagination, login and the demonstration
//! checkout as JSON.

use storefront::{AppState, Config, build_router, listing::Phase};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,storefront=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting storefront HTTP server");

    let config = Config::from_env();
    info!(
        events_url = config.events.url.as_deref().unwrap_or("<sample>"),
        page_size = config.listing.page_size,
        "Configuration loaded"
    );

    let addr = config.bind_address();
    let shutdown_timeout = config.shutdown_timeout();
    let state = AppState::from_config(config).await?;

    // A failed load degrades to an empty listing; the server still starts.
    match state.listing.load(state.listing_timeout()).await {
        Ok(Phase::Failed { message }) => warn!(%message, "Starting with an empty catalogue"),
        Ok(phase) => info!(?phase, "Catalogue ready"),
        Err(e) => warn!(error = %e, "Catalogue load did not settle"),
    }

    let listing = state.listing.clone();
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Err(e) = listing.shutdown(shutdown_timeout).await {
        error!(error = %e, "Listing store did not shut down cleanly");
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            },
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
