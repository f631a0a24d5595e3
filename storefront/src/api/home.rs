//! Home page: featured event, search form and paginated results.
//!
//! - GET / - `q`, `category` and `page` query parameters

use crate::catalog::CategoryFilter;
use crate::listing::{ListingStore, ListingView};
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

/// Query parameters of the home page.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    /// Free-text query, used as given
    #[serde(default)]
    pub q: String,
    /// Category selector; `todos` (or absent) means all
    #[serde(default)]
    pub category: CategoryFilter,
    /// 1-indexed page, clamped to the available range
    #[serde(default = "first_page")]
    pub page: usize,
}

const fn first_page() -> usize {
    1
}

/// Render the home page listing for the given search and page.
///
/// Reads the catalogue loaded by the listing store; does not touch its interactive
/// state.
pub async fn home(State(listing): State<ListingStore>, Query(query): Query<HomeQuery>) -> Json<ListingView> {
    let view = listing
        .state(|state| ListingView::from(&state.browse(&query.q, &query.category, query.page)))
        .await;
    tracing::debug!(query = %query.q, category = %query.category, page = view.controls.current, results = view.total_results, "Home page rendered");
    Json(view)
}
