//! Reducer for the listing controller.

use crate::catalog::{CategoryFilter, clamp_page, filter_events, sort_by_date};
use crate::listing::{
    ListingAction, ListingEnvironment, ListingMode, ListingState, PendingView, RequestId,
    ViewChange,
};
use std::time::Duration;
use storefront_core::effect::{Effect, EffectId};
use storefront_core::reducer::Reducer;
use storefront_core::{SmallVec, smallvec};

/// Cancellation group of the catalogue fetch.
pub const FETCH: EffectId = EffectId::new("listing.fetch");

/// Cancellation group of search/page/reset feedback delays.
pub const DELAY: EffectId = EffectId::new("listing.delay");

/// Reducer for the event listing.
///
/// Every asynchronous request gets a fresh [`RequestId`]. Its settle action only takes
/// effect if that id is still the one in flight, so a superseded search or page change
/// can never touch `results`. The runtime additionally aborts the superseded delay.
#[derive(Clone, Debug, Default)]
pub struct ListingReducer;

impl ListingReducer {
    /// Create a new listing reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Register a delayed view change, superseding any other one
    fn schedule(
        state: &mut ListingState,
        change: ViewChange,
        delay: Duration,
        settle: fn(RequestId) -> ListingAction,
    ) -> SmallVec<[Effect<ListingAction>; 4]> {
        let request = state.next_request();
        if let Some(previous) = state.pending.replace(PendingView { request, change }) {
            tracing::debug!(superseded = previous.request, request, "Superseding pending view change");
        }
        state.sync_phase();

        smallvec![
            Effect::Delay {
                duration: delay,
                action: Box::new(settle(request)),
            }
            .cancellable(DELAY)
        ]
    }

    /// Take the pending change if `request` is the one in flight
    fn settle(state: &mut ListingState, request: RequestId) -> Option<ViewChange> {
        if state.pending.as_ref().is_some_and(|pending| pending.request == request) {
            state.pending.take().map(|pending| pending.change)
        } else {
            tracing::trace!(request, "Ignoring stale settlement");
            None
        }
    }

    fn apply(state: &mut ListingState, change: ViewChange) {
        match change {
            ViewChange::Search { query, category } => {
                state.results = filter_events(&state.catalog, &query, &category);
                state.query = query;
                state.category = category;
                state.mode = ListingMode::SearchResults;
                state.page = 1;
                tracing::debug!(matches = state.results.len(), query = %state.query, "Search applied");
            },
            ViewChange::Page(page) => {
                state.page = clamp_page(page, state.total_pages());
            },
            ViewChange::ShowAll => {
                state.query.clear();
                state.category = CategoryFilter::All;
                state.mode = ListingMode::Browsing;
                state.results = state.catalog.clone();
                state.page = 1;
            },
        }
    }
}

impl Reducer for ListingReducer {
    type State = ListingState;
    type Action = ListingAction;
    type Environment = ListingEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ListingAction::LoadEvents => {
                let request = state.next_request();
                state.fetch = Some(request);
                state.load_error = None;
                state.sync_phase();

                let source = env.source();
                tracing::debug!(request, source = source.name(), "Loading event catalogue");

                smallvec![
                    Effect::Future(Box::pin(async move {
                        Some(match source.fetch_events().await {
                            Ok(events) => ListingAction::EventsLoaded { request, events },
                            Err(error) => ListingAction::EventsFailed {
                                request,
                                message: error.to_string(),
                            },
                        })
                    }))
                    .cancellable(FETCH)
                ]
            },

            ListingAction::EventsLoaded { request, events } => {
                if state.fetch != Some(request) {
                    tracing::trace!(request, "Ignoring stale catalogue");
                    return smallvec![Effect::None];
                }

                state.fetch = None;
                state.catalog = sort_by_date(events);
                state.loaded_at = Some(env.clock().now());
                state.refresh_results();
                state.sync_phase();
                tracing::info!(count = state.catalog.len(), "Listing ready");
                smallvec![Effect::None]
            },

            ListingAction::EventsFailed { request, message } => {
                if state.fetch != Some(request) {
                    return smallvec![Effect::None];
                }

                tracing::warn!(request, error = %message, "Event catalogue unavailable, showing empty listing");
                state.fetch = None;
                state.catalog.clear();
                state.results.clear();
                state.page = 1;
                state.load_error = Some(message);
                state.sync_phase();
                smallvec![Effect::None]
            },

            ListingAction::Search { query, category } => Self::schedule(
                state,
                ViewChange::Search { query, category },
                env.delays().search,
                |request| ListingAction::SearchSettled { request },
            ),

            ListingAction::ChangePage { page } => {
                let page = clamp_page(page, state.total_pages());
                Self::schedule(
                    state,
                    ViewChange::Page(page),
                    env.delays().page,
                    |request| ListingAction::PageSettled { request },
                )
            },

            ListingAction::ShowAll => Self::schedule(
                state,
                ViewChange::ShowAll,
                env.delays().show_all,
                |request| ListingAction::ShowAllSettled { request },
            ),

            ListingAction::SearchSettled { request }
            | ListingAction::PageSettled { request }
            | ListingAction::ShowAllSettled { request } => {
                if let Some(change) = Self::settle(state, request) {
                    Self::apply(state, change);
                    state.sync_phase();
                }
                smallvec![Effect::None]
            },
        }
    }
}
