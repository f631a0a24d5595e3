//! Configuration management for the storefront.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::catalog::PAGE_SIZE;
use crate::listing::ListingDelays;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Event source configuration
    pub events: EventsConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Session persistence configuration
    pub session: SessionConfig,
    /// Listing controller configuration
    pub listing: ListingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

/// Event source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Remote catalogue endpoint; the built-in sample catalogue is used when unset
    pub url: Option<String>,
    /// Fetch timeout in seconds
    pub timeout_secs: u64,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Remote login endpoint; mock auth is used unless both endpoints are set
    pub login_url: Option<String>,
    /// Remote registration endpoint
    pub register_url: Option<String>,
    /// Simulated latency of the mock client in milliseconds
    pub mock_latency_ms: u64,
}

/// Session persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding the session record
    pub dir: PathBuf,
}

/// Listing controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Events per page
    pub page_size: usize,
    /// Search feedback delay in milliseconds
    pub search_delay_ms: u64,
    /// Page-change feedback delay in milliseconds
    pub page_delay_ms: u64,
    /// "Show all events" feedback delay in milliseconds
    pub show_all_delay_ms: u64,
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key).and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.trim().is_empty())
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Missing or unparseable values fall back to their defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parsed(&lookup, "PORT", 8080),
                log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
                shutdown_timeout: parsed(&lookup, "SHUTDOWN_TIMEOUT", 30),
            },
            events: EventsConfig {
                url: non_empty(&lookup, "EVENTS_URL"),
                timeout_secs: parsed(&lookup, "EVENTS_TIMEOUT_SECS", 10),
            },
            auth: AuthConfig {
                login_url: non_empty(&lookup, "AUTH_LOGIN_URL"),
                register_url: non_empty(&lookup, "AUTH_REGISTER_URL"),
                mock_latency_ms: parsed(&lookup, "AUTH_MOCK_LATENCY_MS", 500),
            },
            session: SessionConfig {
                dir: lookup("SESSION_DIR").map_or_else(|| PathBuf::from(".storefront"), PathBuf::from),
            },
            listing: ListingConfig {
                page_size: parsed(&lookup, "LISTING_PAGE_SIZE", PAGE_SIZE).max(1),
                search_delay_ms: parsed(&lookup, "LISTING_SEARCH_DELAY_MS", 500),
                page_delay_ms: parsed(&lookup, "LISTING_PAGE_DELAY_MS", 300),
                show_all_delay_ms: parsed(&lookup, "LISTING_SHOW_ALL_DELAY_MS", 500),
            },
        }
    }

    /// Get the server bind address.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Graceful shutdown timeout
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_timeout)
    }
}

impl EventsConfig {
    /// Fetch timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AuthConfig {
    /// Mock client latency
    #[must_use]
    pub const fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }
}

impl ListingConfig {
    /// Feedback delays for the listing reducer
    #[must_use]
    pub const fn delays(&self) -> ListingDelays {
        ListingDelays {
            search: Duration::from_millis(self.search_delay_ms),
            page: Duration::from_millis(self.page_delay_ms),
            show_all: Duration::from_millis(self.show_all_delay_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
