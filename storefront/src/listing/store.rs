//! Store for the listing controller.

use crate::listing::{
    ListingAction, ListingEnvironment, ListingReducer, ListingState, ListingView, Phase,
};
use std::time::Duration;
use storefront_runtime::{EffectHandle, HealthCheck, Store, StoreError};

type Inner = Store<ListingState, ListingAction, ListingEnvironment, ListingReducer>;

/// Runtime store driving one listing
///
/// Cheap to clone; clones share state and running effects.
#[derive(Clone)]
pub struct ListingStore {
    inner: Inner,
}

impl ListingStore {
    /// Create an idle listing store
    #[must_use]
    pub fn new(environment: ListingEnvironment, page_size: usize) -> Self {
        Self {
            inner: Store::new(ListingState::new(page_size), ListingReducer::new(), environment),
        }
    }

    /// Dispatch an action
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn dispatch(&self, action: ListingAction) -> Result<EffectHandle, StoreError> {
        self.inner.send(action).await
    }

    /// Dispatch an action and wait for all of its effects, including cancelled ones
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the effects do not finish within `timeout`.
    pub async fn dispatch_and_wait(
        &self,
        action: ListingAction,
        timeout: Duration,
    ) -> Result<(), StoreError> {
        let mut handle = self.inner.send(action).await?;
        handle.wait_with_timeout(timeout).await
    }

    /// Load the catalogue and wait until it settled or failed
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the source does not answer within `timeout`.
    #[tracing::instrument(skip(self), name = "listing_load")]
    pub async fn load(&self, timeout: Duration) -> Result<Phase, StoreError> {
        self.inner
            .send_and_wait_for(
                ListingAction::LoadEvents,
                |action| {
                    matches!(
                        action,
                        ListingAction::EventsLoaded { .. } | ListingAction::EventsFailed { .. }
                    )
                },
                timeout,
            )
            .await?;
        Ok(self.inner.state(|state| state.phase.clone()).await)
    }

    /// Snapshot for rendering
    pub async fn view(&self) -> ListingView {
        self.inner.state(|state| ListingView::from(state)).await
    }

    /// Read state via a closure
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&ListingState) -> T,
    {
        self.inner.state(f).await
    }

    /// Store health
    #[must_use]
    pub fn health(&self) -> HealthCheck {
        self.inner.health()
    }

    /// Stop accepting actions and wait for running effects
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if effects are still running after `timeout`.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        self.inner.shutdown(timeout).await
    }
}
