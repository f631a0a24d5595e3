//! Application state for the storefront HTTP server.
//!
//! Contains all shared resources needed by handlers:
//! - The listing store (catalogue and listing controller)
//! - The session manager (signed-in user)
//! - The authentication backend

use crate::auth::{AuthClient, FileSessionStorage, HttpAuthClient, MockAuthClient, SessionManager};
use crate::config::Config;
use crate::listing::{ListingEnvironment, ListingStore};
use crate::source::{EventSource, HttpEventSource, StaticEventSource};
use axum::extract::FromRef;
use std::sync::Arc;
use std::time::Duration;
use storefront_core::environment::SystemClock;

/// Application state shared across all handlers.
///
/// Cloned (cheaply via Arc) for each request.
#[derive(Clone)]
pub struct AppState {
    /// Listing controller, also the source of the loaded catalogue
    pub listing: ListingStore,

    /// The signed-in user and its persisted record
    pub sessions: Arc<SessionManager>,

    /// Login and registration backend
    pub auth: Arc<dyn AuthClient>,

    /// Loaded configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(
        listing: ListingStore,
        sessions: Arc<SessionManager>,
        auth: Arc<dyn AuthClient>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            listing,
            sessions,
            auth,
            config,
        }
    }

    /// Wire every collaborator from configuration.
    ///
    /// - `EVENTS_URL` set: remote catalogue, otherwise the built-in sample
    /// - Both auth URLs set: remote auth, otherwise the mock backend
    /// - Session record under `SESSION_DIR`, restored here
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built, the sample catalogue is
    /// malformed, or the session directory cannot be read.
    pub async fn from_config(config: Config) -> anyhow::Result<Self> {
        let source: Arc<dyn EventSource> = match &config.events.url {
            Some(url) => Arc::new(HttpEventSource::new(url.clone(), config.events.timeout())?),
            None => Arc::new(StaticEventSource::sample()?),
        };

        let auth: Arc<dyn AuthClient> = match (&config.auth.login_url, &config.auth.register_url) {
            (Some(login), Some(register)) => Arc::new(HttpAuthClient::new(
                login.clone(),
                register.clone(),
                config.events.timeout(),
            )?),
            _ => Arc::new(MockAuthClient::new(config.auth.mock_latency())),
        };

        let sessions = Arc::new(SessionManager::new(Arc::new(FileSessionStorage::new(
            config.session.dir.clone(),
        ))));
        sessions.restore().await?;

        tracing::info!(
            source = source.name(),
            auth = auth.name(),
            session_dir = %config.session.dir.display(),
            "Collaborators configured"
        );

        let environment = ListingEnvironment::new(source, Arc::new(SystemClock), config.listing.delays());
        let listing = ListingStore::new(environment, config.listing.page_size);

        Ok(Self::new(listing, sessions, auth, Arc::new(config)))
    }

    /// Upper bound for waiting on the listing, e.g. a reload
    #[must_use]
    pub fn listing_timeout(&self) -> Duration {
        let delays = self.config.listing.delays();
        self.config.events.timeout() + delays.search.max(delays.page).max(delays.show_all) + Duration::from_secs(1)
    }
}

impl FromRef<AppState> for ListingStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.listing.clone()
    }
}

impl FromRef<AppState> for Arc<SessionManager> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.sessions)
    }
}
