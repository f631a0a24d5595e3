//! Interactive listing endpoints.
//!
//! Drive the listing controller the way the home page's widgets do. Commands answer
//! immediately with the (usually pending) view; poll `GET /listing` to see it settle.
//!
//! - GET /listing - current view
//! - POST /listing/search - search the catalogue
//! - POST /listing/page - go to a page
//! - POST /listing/show-all - reset the search
//! - POST /listing/reload - reload the catalogue and wait for it

use crate::catalog::CategoryFilter;
use crate::error::AppError;
use crate::listing::{ListingAction, ListingView};
use crate::server::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;

/// Search request.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Free-text query
    #[serde(default)]
    pub query: String,
    /// Category selector
    #[serde(default)]
    pub category: CategoryFilter,
}

/// Page change request.
#[derive(Debug, Deserialize)]
pub struct PageRequest {
    /// Requested page, 1-indexed
    pub page: usize,
}

async fn dispatch(state: &AppState, action: ListingAction) -> Result<(StatusCode, Json<ListingView>), AppError> {
    state.listing.dispatch(action).await?;
    Ok((StatusCode::ACCEPTED, Json(state.listing.view().await)))
}

/// Get the current listing view.
pub async fn get_listing(State(state): State<AppState>) -> Json<ListingView> {
    Json(state.listing.view().await)
}

/// Start a search.
///
/// # Errors
///
/// Returns 503 while the server shuts down.
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<(StatusCode, Json<ListingView>), AppError> {
    dispatch(
        &state,
        ListingAction::Search {
            query: request.query,
            category: request.category,
        },
    )
    .await
}

/// Change page.
///
/// # Errors
///
/// Returns 400 for page 0, 503 while the server shuts down.
pub async fn change_page(
    State(state): State<AppState>,
    Json(request): Json<PageRequest>,
) -> Result<(StatusCode, Json<ListingView>), AppError> {
    if request.page == 0 {
        return Err(AppError::bad_request("Pages start at 1"));
    }
    dispatch(&state, ListingAction::ChangePage { page: request.page }).await
}

/// Drop the search and show every event.
///
/// # Errors
///
/// Returns 503 while the server shuts down.
pub async fn show_all(State(state): State<AppState>) -> Result<(StatusCode, Json<ListingView>), AppError> {
    dispatch(&state, ListingAction::ShowAll).await
}

/// Reload the catalogue and return the settled view.
///
/// A failed load still answers 200 with an empty, failed listing.
///
/// # Errors
///
/// Returns 408 if the load does not settle in time, 503 while the server shuts down.
pub async fn reload(State(state): State<AppState>) -> Result<Json<ListingView>, AppError> {
    let phase = state.listing.load(state.listing_timeout()).await?;
    tracing::info!(?phase, "Catalogue reloaded");
    Ok(Json(state.listing.view().await))
}
