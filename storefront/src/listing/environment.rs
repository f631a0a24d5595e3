//! Environment for the listing reducer.

use crate::source::EventSource;
use std::sync::Arc;
use std::time::Duration;
use storefront_core::environment::Clock;

/// Feedback delays before a view change settles
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListingDelays {
    /// After a search
    pub search: Duration,
    /// After a page change
    pub page: Duration,
    /// After "show all events"
    pub show_all: Duration,
}

impl Default for ListingDelays {
    fn default() -> Self {
        Self {
            search: Duration::from_millis(500),
            page: Duration::from_millis(300),
            show_all: Duration::from_millis(500),
        }
    }
}

impl ListingDelays {
    /// No delays; for tests and scripted runs
    #[must_use]
    pub const fn none() -> Self {
        Self {
            search: Duration::ZERO,
            page: Duration::ZERO,
            show_all: Duration::ZERO,
        }
    }
}

/// Dependencies of the listing reducer
///
/// Production uses `SystemClock` and the configured source; tests use `FixedClock`
/// and a `StaticEventSource`.
#[derive(Clone)]
pub struct ListingEnvironment {
    source: Arc<dyn EventSource>,
    clock: Arc<dyn Clock>,
    delays: ListingDelays,
}

impl ListingEnvironment {
    /// Create an environment
    #[must_use]
    pub fn new(source: Arc<dyn EventSource>, clock: Arc<dyn Clock>, delays: ListingDelays) -> Self {
        Self {
            source,
            clock,
            delays,
        }
    }

    /// The event source
    #[must_use]
    pub fn source(&self) -> Arc<dyn EventSource> {
        Arc::clone(&self.source)
    }

    /// Clock for load timestamps
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Feedback delays
    #[must_use]
    pub const fn delays(&self) -> ListingDelays {
        self.delays
    }
}
