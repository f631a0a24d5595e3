//! Demonstration checkout pages.
//!
//! - GET /purchase/:id - order form (requires a session)
//! - POST /purchase/:id - submit the order form (requires a session)

use crate::error::AppError;
use crate::purchase::{
    Confirmation, OrderSummary, PaymentMethod, PurchaseForm, QUANTITY_RANGE, checkout,
};
use crate::server::AppState;
use crate::types::{Event, User};
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

/// Order form view.
#[derive(Debug, Serialize)]
pub struct PurchaseView {
    /// Who is buying
    pub user: User,
    /// Summary for one ticket
    pub order: OrderSummary,
    /// Smallest quantity allowed
    pub min_quantity: u32,
    /// Largest quantity allowed
    pub max_quantity: u32,
    /// Selectable payment methods
    pub payment_methods: [PaymentMethod; 2],
}

/// Signed-in user, or 401 pointing at the login page
async fn require_user(state: &AppState, id: &str) -> Result<User, AppError> {
    state.sessions.current().await.ok_or_else(|| {
        AppError::unauthorized("Log in to buy tickets")
            .with_redirect(format!("/login?redirect=/purchase/{id}"))
    })
}

async fn find_event(state: &AppState, id: &str) -> Result<Event, AppError> {
    state
        .listing
        .state(|listing| listing.find(id).cloned())
        .await
        .ok_or_else(|| AppError::not_found("Event", id))
}

/// Show the order form.
///
/// # Errors
///
/// Returns 401 with a login redirect when signed out, 404 for an unknown event.
pub async fn purchase_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PurchaseView>, AppError> {
    let user = require_user(&state, &id).await?;
    let event = find_event(&state, &id).await?;

    Ok(Json(PurchaseView {
        user,
        order: OrderSummary::new(event, *QUANTITY_RANGE.start()),
        min_quantity: *QUANTITY_RANGE.start(),
        max_quantity: *QUANTITY_RANGE.end(),
        payment_methods: [PaymentMethod::CreditCard, PaymentMethod::PayPal],
    }))
}

/// Submit the order form.
///
/// # Errors
///
/// Returns 401 when signed out, 404 for an unknown event, 422 for an invalid form.
pub async fn submit_purchase(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<PurchaseForm>,
) -> Result<Json<Confirmation>, AppError> {
    let user = require_user(&state, &id).await?;
    let event = find_event(&state, &id).await?;
    tracing::debug!(user_id = %user.id, event_id = %id, "Purchase submitted");
    Ok(Json(checkout(event, &form)?))
}
