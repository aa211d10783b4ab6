//! Async title resolution for storefront routes.

use crate::{FetchError, RestCatalog};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};
use storefront_core::catalog::CatalogResource;
use storefront_core::route::{LookupTicket, Navigator, RouteState};
use storefront_core::EntityId;

/// Source of entity titles.
#[async_trait]
pub trait TitleLookup: Send + Sync {
    async fn lookup_title(
        &self,
        resource: CatalogResource,
        id: &EntityId,
    ) -> Result<String, FetchError>;
}

#[async_trait]
impl TitleLookup for RestCatalog {
    async fn lookup_title(
        &self,
        resource: CatalogResource,
        id: &EntityId,
    ) -> Result<String, FetchError> {
        self.entity_title(resource, id.as_str()).await
    }
}

/// Resolves route titles, dropping results from superseded navigations.
///
/// Lookups are issued once per navigation with no retry and no timeout.
pub struct TitleResolver<L> {
    lookup: L,
    navigator: Mutex<Navigator>,
}

impl<L: TitleLookup> TitleResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            navigator: Mutex::new(Navigator::new()),
        }
    }

    fn navigator(&self) -> MutexGuard<'_, Navigator> {
        self.navigator.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Start a navigation. The returned state is already final unless a
    /// ticket is returned, in which case it is in the loading phase.
    pub fn begin(&self, path: &str) -> (RouteState, Option<LookupTicket>) {
        let mut nav = self.navigator();
        let ticket = nav.navigate(path);
        (nav.current().clone(), ticket)
    }

    /// Run the lookup for a ticket and apply its result if still current.
    pub async fn finish(&self, ticket: &LookupTicket) -> RouteState {
        let result = self.lookup.lookup_title(ticket.resource, &ticket.id).await;

        let mut nav = self.navigator();
        nav.complete(ticket, result);
        nav.current().clone()
    }

    /// Navigate and wait for the title.
    ///
    /// Returns the state of whatever route is current when the lookup
    /// finishes, which is a later route if another navigation happened.
    pub async fn navigate(&self, path: &str) -> RouteState {
        match self.begin(path) {
            (_, Some(ticket)) => self.finish(&ticket).await,
            (state, None) => state,
        }
    }

    pub fn current(&self) -> RouteState {
        self.navigator().current().clone()
    }
}
