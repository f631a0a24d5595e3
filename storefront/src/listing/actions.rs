//! Actions for the listing controller.

use crate::catalog::CategoryFilter;
use crate::listing::types::RequestId;
use crate::types::Event;

/// Inputs of the listing reducer: user intents and effect results
#[derive(Clone, Debug, PartialEq)]
pub enum ListingAction {
    /// Load (or reload) the catalogue from the event source
    ///
    /// Also the user-triggered retry after a failed load.
    LoadEvents,

    /// The catalogue arrived
    EventsLoaded {
        /// Fetch this result belongs to
        request: RequestId,
        /// Full, unsorted catalogue
        events: Vec<Event>,
    },

    /// The catalogue could not be loaded
    EventsFailed {
        /// Fetch this result belongs to
        request: RequestId,
        /// Error description
        message: String,
    },

    /// Search the catalogue
    Search {
        /// Free-text query, used as given
        query: String,
        /// Category selector
        category: CategoryFilter,
    },

    /// The search feedback delay elapsed
    SearchSettled {
        /// Search this belongs to
        request: RequestId,
    },

    /// Go to a page of the current results
    ChangePage {
        /// Requested page, clamped to the available range
        page: usize,
    },

    /// The page-change feedback delay elapsed
    PageSettled {
        /// Page change this belongs to
        request: RequestId,
    },

    /// Drop the search and show the whole catalogue again
    ShowAll,

    /// The reset delay elapsed
    ShowAllSettled {
        /// Reset this belongs to
        request: RequestId,
    },
}

impl ListingAction {
    /// Whether this action completes a request (rather than starting one)
    #[must_use]
    pub const fn is_settlement(&self) -> bool {
        matches!(
            self,
            Self::EventsLoaded { .. }
                | Self::EventsFailed { .. }
                | Self::SearchSettled { .. }
                | Self::PageSettled { .. }
                | Self::ShowAllSettled { .. }
        )
    }

    /// Request id carried by a settle action
    #[must_use]
    pub const fn request(&self) -> Option<RequestId> {
        match self {
            Self::EventsLoaded { request, .. }
            | Self::EventsFailed { request, .. }
            | Self::SearchSettled { request }
            | Self::PageSettled { request }
            | Self::ShowAllSettled { request } => Some(*request),
            _ => None,
        }
    }
}
