//! HTTP handlers of the storefront.

pub mod auth;
pub mod events;
pub mod home;
pub mod listing;
pub mod purchase;
