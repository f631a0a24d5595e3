//! Router configuration for the storefront.

use super::health::health_check;
use super::state::AppState;
use crate::api::{auth, events, home, listing, purchase};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// Configures:
/// - Health check
/// - Home page and event details
/// - Login, registration and session
/// - Demonstration checkout
/// - Interactive listing controller
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(home::home))
        .route("/events/:id", get(events::get_event))
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
        .route("/session", get(auth::session))
        .route(
            "/purchase/:id",
            get(purchase::purchase_form).post(purchase::submit_purchase),
        )
        .route("/listing", get(listing::get_listing))
        .route("/listing/search", post(listing::search))
        .route("/listing/page", post(listing::change_page))
        .route("/listing/show-all", post(listing::show_all))
        .route("/listing/reload", post(listing::reload))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
