//! Listing controller: the home page's event list and its loading states.
//!
//! The listing is a reducer run by the runtime `Store`:
//!
//! ```text
//! LoadEvents ──fetch (listing.fetch)──▶ EventsLoaded / EventsFailed
//! Search     ──delay (listing.delay)──▶ SearchSettled { request }
//! ChangePage ──delay (listing.delay)──▶ PageSettled { request }
//! ShowAll    ──delay (listing.delay)──▶ ShowAllSettled { request }
//! ```
//!
//! A new view change aborts the delay of the previous one and bumps the request id,
//! so only the latest request's result is ever applied.

pub mod actions;
pub mod environment;
pub mod reducer;
pub mod store;
pub mod types;

pub use actions::ListingAction;
pub use environment::{ListingDelays, ListingEnvironment};
pub use reducer::{DELAY, FETCH, ListingReducer};
pub use store::ListingStore;
pub use types::{ListingMode, ListingState, ListingView, PendingView, Phase, RequestId, ViewChange};
