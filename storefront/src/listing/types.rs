//! State types for the listing controller.

use crate::catalog::{
    self, CategoryFilter, PageControls, filter_events, page, total_pages,
};
use crate::types::Event;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Identity of one asynchronous request; strictly increasing per listing
pub type RequestId = u64;

/// Loading lifecycle of the listing
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Phase {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A fetch or a delayed view change is in flight
    Pending {
        /// The request being waited on
        request: RequestId,
    },
    /// Data is available
    Settled,
    /// The catalogue could not be loaded; the listing is empty
    Failed {
        /// What went wrong, for display
        message: String,
    },
}

/// What the results represent
///
/// Distinguishes "not yet searched" from "searched and found nothing".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingMode {
    /// The full catalogue ("upcoming events")
    #[default]
    Browsing,
    /// The outcome of a search, possibly empty
    SearchResults,
}

/// A view change waiting for its delay to elapse
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewChange {
    /// Apply a search
    Search {
        /// Free-text query
        query: String,
        /// Category selector
        category: CategoryFilter,
    },
    /// Move to a page
    Page(usize),
    /// Reset to the full catalogue
    ShowAll,
}

/// The latest view change and the request that will apply it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingView {
    /// Request identity; only a settle action carrying it applies `change`
    pub request: RequestId,
    /// What to apply
    pub change: ViewChange,
}

/// Listing controller state
#[derive(Clone, Debug, PartialEq)]
pub struct ListingState {
    /// Full catalogue, sorted by date
    pub catalog: Vec<Event>,
    /// Events matching the applied search, sorted by date
    pub results: Vec<Event>,
    /// Whether `results` come from a search
    pub mode: ListingMode,
    /// Applied query
    pub query: String,
    /// Applied category selector
    pub category: CategoryFilter,
    /// Current page, 1-indexed
    pub page: usize,
    /// Events per page
    pub page_size: usize,
    /// Loading lifecycle
    pub phase: Phase,
    /// Message of the last failed catalogue load
    pub load_error: Option<String>,
    /// When the catalogue was last loaded
    pub loaded_at: Option<DateTime<Utc>>,
    /// Last issued request id
    pub last_request: RequestId,
    /// Catalogue fetch in flight
    pub fetch: Option<RequestId>,
    /// View change in flight
    pub pending: Option<PendingView>,
}

impl ListingState {
    /// Empty, idle listing with the given page size
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            catalog: Vec::new(),
            results: Vec::new(),
            mode: ListingMode::Browsing,
            query: String::new(),
            category: CategoryFilter::All,
            page: 1,
            page_size: page_size.max(1),
            phase: Phase::Idle,
            load_error: None,
            loaded_at: None,
            last_request: 0,
            fetch: None,
            pending: None,
        }
    }

    /// Issue the next request id
    pub fn next_request(&mut self) -> RequestId {
        self.last_request += 1;
        self.last_request
    }

    /// Recompute `phase` from what is in flight
    pub fn sync_phase(&mut self) {
        self.phase = if let Some(request) = self.fetch {
            Phase::Pending { request }
        } else if let Some(pending) = &self.pending {
            Phase::Pending {
                request: pending.request,
            }
        } else if let Some(message) = &self.load_error {
            Phase::Failed {
                message: message.clone(),
            }
        } else if self.loaded_at.is_some() {
            Phase::Settled
        } else {
            Phase::Idle
        };
    }

    /// Recompute `results` from the catalogue and the applied search
    pub fn refresh_results(&mut self) {
        self.results = match self.mode {
            ListingMode::Browsing => self.catalog.clone(),
            ListingMode::SearchResults => filter_events(&self.catalog, &self.query, &self.category),
        };
        self.page = self.page.clamp(1, self.total_pages());
    }

    /// Whether the loading indicator should be shown instead of results
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Pending { .. })
    }

    /// Total pages of the current results
    #[must_use]
    pub fn total_pages(&self) -> usize {
        total_pages(self.results.len(), self.page_size)
    }

    /// Events on the current page
    #[must_use]
    pub fn visible_events(&self) -> &[Event] {
        page(&self.results, self.page, self.page_size)
    }

    /// A search ran and matched nothing: offer the "show all events" reset
    #[must_use]
    pub fn is_empty_search(&self) -> bool {
        self.mode == ListingMode::SearchResults && self.results.is_empty()
    }

    /// Look up a catalogue event by id
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Event> {
        self.catalog.iter().find(|event| event.id.as_str() == id)
    }

    /// Settled listing of the loaded catalogue for one search and page
    ///
    /// Used by request/response pages that do not go through the reducer. An empty
    /// query with the `All` category is plain browsing. A catalogue fetch in flight
    /// carries over, so the view reports `Pending` until the reload lands.
    #[must_use]
    pub fn browse(&self, query: &str, category: &CategoryFilter, page: usize) -> Self {
        let searching = !query.is_empty() || *category != CategoryFilter::All;
        let mut view = Self {
            catalog: self.catalog.clone(),
            load_error: self.load_error.clone(),
            loaded_at: self.loaded_at,
            last_request: self.last_request,
            fetch: self.fetch,
            query: query.to_string(),
            category: category.clone(),
            page,
            ..Self::new(self.page_size)
        };

        if searching {
            view.mode = ListingMode::SearchResults;
        }
        view.refresh_results();
        view.sync_phase();
        view
    }
}

impl Default for ListingState {
    fn default() -> Self {
        Self::new(catalog::PAGE_SIZE)
    }
}

/// Serializable snapshot of the listing, as rendered by the home page
#[derive(Clone, Debug, Serialize)]
pub struct ListingView {
    /// Loading lifecycle
    pub phase: Phase,
    /// Browsing or search results
    pub mode: ListingMode,
    /// Applied query
    pub query: String,
    /// Applied category selector
    pub category: CategoryFilter,
    /// Category vocabulary for the selector
    pub categories: Vec<String>,
    /// Headline event
    pub featured: Option<Event>,
    /// Events on the current page; empty while loading
    pub events: Vec<Event>,
    /// Number of matching events
    pub total_results: usize,
    /// Pagination control
    pub controls: PageControls,
    /// Whether to offer the "show all events" reset
    pub show_all_available: bool,
    /// Last load failure, if any
    pub load_error: Option<String>,
}

impl From<&ListingState> for ListingView {
    fn from(state: &ListingState) -> Self {
        let loading = state.is_loading();
        Self {
            phase: state.phase.clone(),
            mode: state.mode,
            query: state.query.clone(),
            category: state.category.clone(),
            categories: catalog::categories(&state.catalog),
            featured: catalog::featured(&state.catalog).cloned(),
            events: if loading { Vec::new() } else { state.visible_events().to_vec() },
            total_results: state.results.len(),
            controls: PageControls::new(state.page, state.total_pages()),
            show_all_available: !loading && state.is_empty_search(),
            load_error: state.load_error.clone(),
        }
    }
}
