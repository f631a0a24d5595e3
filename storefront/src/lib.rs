//! # Storefront
//!
//! An event storefront built on the storefront reducer architecture.
//!
//! ## Features
//!
//! - **Catalogue engine**: case-insensitive text search, category filter, date sort
//! - **Pager**: fixed page size with an ellipsis page-link algorithm
//! - **Listing controller**: a reducer with last-write-wins request tracking, run by
//!   the runtime `Store`
//! - **Collaborators**: pluggable event source, mock or remote auth, persisted session,
//!   demonstration checkout
//! - **HTTP**: JSON pages and listing commands over Axum
//!
//! ## Architecture
//!
//! ```text
//! HTTP (api, server) ──▶ ListingStore ──▶ ListingReducer ──▶ catalog::{search, pager}
//!                                │
//!                                └──effects──▶ EventSource (static | http)
//! ```

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod listing;
pub mod purchase;
pub mod server;
pub mod source;
pub mod types;

pub use config::Config;
pub use error::AppError;
pub use listing::{ListingAction, ListingState, ListingStore, ListingView};
pub use server::{AppState, build_router};
pub use source::{EventSource, HttpEventSource, SourceError, StaticEventSource};
pub use types::{Event, EventId, User};
