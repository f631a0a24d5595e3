//! Event detail page.
//!
//! - GET /events/:id - event details with the optional lineup and schedule tabs

use crate::error::AppError;
use crate::listing::ListingStore;
use crate::types::{Category, EventDate, EventId, Price, ScheduleItem};
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

/// Event details response.
#[derive(Debug, Serialize)]
pub struct EventDetail {
    /// Event id
    pub id: EventId,
    /// Event name
    pub name: String,
    /// Category label
    pub category: Category,
    /// Date of the event
    pub date: EventDate,
    /// Start time, if given
    pub time: Option<String>,
    /// Venue name
    pub venue: String,
    /// City or address
    pub location: String,
    /// Ticket price
    pub price: Price,
    /// Image, or the placeholder when none is set
    pub image: String,
    /// "About" tab: long description, falling back to the short one
    pub about: String,
    /// "Lineup" tab; absent when the event has none
    pub lineup: Option<Vec<String>>,
    /// "Schedule" tab; absent when the event has none
    pub schedule: Option<Vec<ScheduleItem>>,
    /// Where the buy button leads
    pub purchase_url: String,
}

/// Get event details.
///
/// # Errors
///
/// Returns 404 if no loaded event has this id.
pub async fn get_event(
    State(listing): State<ListingStore>,
    Path(id): Path<String>,
) -> Result<Json<EventDetail>, AppError> {
    let event = listing
        .state(|state| state.find(&id).cloned())
        .await
        .ok_or_else(|| AppError::not_found("Event", &id))?;

    Ok(Json(EventDetail {
        image: event.image_or_placeholder().to_string(),
        about: event.about().to_string(),
        lineup: event.lineup().map(<[String]>::to_vec),
        schedule: event.schedule().map(<[ScheduleItem]>::to_vec),
        purchase_url: format!("/purchase/{}", event.id),
        id: event.id,
        name: event.name,
        category: event.category,
        date: event.date,
        time: event.time,
        venue: event.venue,
        location: event.location,
        price: event.price,
    }))
}
