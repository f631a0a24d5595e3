//! Health check endpoint for the storefront.

use crate::listing::{ListingStore, Phase};
use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Status of the listing store
    pub listing: String,
    /// Whether the catalogue loaded; a failed load keeps serving an empty listing
    pub catalogue_loaded: bool,
}

/// Health check endpoint.
///
/// Returns 200 while the listing store accepts actions, 503 once it is shutting down.
///
/// # Example
///
/// ```bash
/// curl http://localhost:8080/health
/// # {"status":"ok","version":"0.1.0","listing":"healthy","catalogue_loaded":true}
/// ```
pub async fn health_check(State(listing): State<ListingStore>) -> (StatusCode, Json<HealthResponse>) {
    let check = listing.health();
    let catalogue_loaded = listing
        .state(|state| !matches!(state.phase, Phase::Failed { .. }) && state.loaded_at.is_some())
        .await;

    let (status, label) = if check.status.is_healthy() {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            listing: check.status.to_string(),
            catalogue_loaded,
        }),
    )
}
