//! Navigation state with stale-lookup protection.
//!
//! Every call to [`Navigator::navigate`] starts a new epoch. A title lookup
//! issued for one epoch carries that epoch in its [`LookupTicket`]; when the
//! result comes back it is applied only if no newer navigation happened in
//! the meantime.

use super::{RouteContext, TitleSource};
use crate::catalog::CatalogResource;
use crate::ids::EntityId;
use serde::Serialize;
use std::fmt;

/// Progress of title resolution for the current route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TitlePhase {
    /// Nothing to resolve.
    Idle,
    /// Remote lookup in flight.
    Loading,
    /// Title known (static label or remote title).
    Resolved,
    /// Lookup failed, title derived from the path.
    Fallback,
}

/// Derived state of the current route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteState {
    pub context: RouteContext,
    pub title: String,
    pub phase: TitlePhase,
    pub epoch: u64,
}

impl RouteState {
    pub fn loading(&self) -> bool {
        self.phase == TitlePhase::Loading
    }

    /// Whether the title is fallback data rather than the backend's title.
    pub fn used_fallback(&self) -> bool {
        self.phase == TitlePhase::Fallback
    }

    /// Title formatted for the page kind.
    pub fn display_name(&self) -> String {
        self.context.kind.display_name(&self.title)
    }

    pub fn description(&self) -> String {
        self.context.kind.description(&self.title)
    }
}

/// A pending title lookup bound to the navigation that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub epoch: u64,
    pub resource: CatalogResource,
    pub id: EntityId,
}

/// Tracks the current route and applies lookup results to it.
#[derive(Debug)]
pub struct Navigator {
    epoch: u64,
    current: RouteState,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            epoch: 0,
            current: RouteState {
                context: RouteContext::from_path("/"),
                title: String::new(),
                phase: TitlePhase::Idle,
                epoch: 0,
            },
        }
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to a new path.
    ///
    /// Returns a ticket when the title has to be fetched remotely. Static and
    /// empty titles are settled immediately.
    pub fn navigate(&mut self, path: &str) -> Option<LookupTicket> {
        self.epoch += 1;
        let context = RouteContext::from_path(path);

        let (title, phase, ticket) = match context.title_source() {
            TitleSource::Empty => (String::new(), TitlePhase::Idle, None),
            TitleSource::Static(label) => (label.to_string(), TitlePhase::Resolved, None),
            TitleSource::Lookup { resource, id } => (
                String::new(),
                TitlePhase::Loading,
                Some(LookupTicket {
                    epoch: self.epoch,
                    resource,
                    id,
                }),
            ),
        };

        tracing::debug!(
            epoch = self.epoch,
            path = %context.path,
            kind = %context.kind,
            lookup = ticket.is_some(),
            "navigated"
        );

        self.current = RouteState {
            context,
            title,
            phase,
            epoch: self.epoch,
        };

        ticket
    }

    /// Apply the outcome of a lookup.
    ///
    /// Returns `false` when the ticket belongs to an earlier navigation; the
    /// result is dropped and the current state is left untouched.
    pub fn complete<E: fmt::Display>(
        &mut self,
        ticket: &LookupTicket,
        result: Result<String, E>,
    ) -> bool {
        let state = &mut self.current;

        if ticket.epoch != self.epoch || state.phase != TitlePhase::Loading {
            tracing::debug!(
                ticket_epoch = ticket.epoch,
                current_epoch = self.epoch,
                id = %ticket.id,
                "discarding stale title lookup"
            );
            return false;
        }

        match result {
            Ok(title) if !title.trim().is_empty() => {
                state.title = title;
                state.phase = TitlePhase::Resolved;
            }
            Ok(_) => {
                tracing::warn!(id = %ticket.id, "empty title from backend, using fallback");
                state.title = state.context.fallback_title();
                state.phase = TitlePhase::Fallback;
            }
            Err(e) => {
                tracing::warn!(
                    resource = %ticket.resource,
                    id = %ticket.id,
                    error = %e,
                    "title lookup failed, using fallback"
                );
                state.title = state.context.fallback_title();
                state.phase = TitlePhase::Fallback;
            }
        }

        true
    }

    pub fn current(&self) -> &RouteState {
        &self.current
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::PageKind;

    fn state(nav: &Navigator) -> &RouteState {
        nav.current()
    }

    #[test]
    fn test_initial_state_is_idle() {
        let nav = Navigator::new();
        assert_eq!(nav.epoch(), 0);
        assert_eq!(nav.current().phase, TitlePhase::Idle);
        assert_eq!(nav.current().context.kind, PageKind::Shop);
    }

    // === Navigation Tests ===

    #[test]
    fn test_shop_landing_needs_no_lookup() {
        let mut nav = Navigator::new();
        assert!(nav.navigate("/shop").is_none());

        let st = state(&nav);
        assert_eq!(st.context.kind, PageKind::Shop);
        assert_eq!(st.title, "");
        assert_eq!(st.phase, TitlePhase::Idle);
        assert!(!st.loading());
    }

    #[test]
    fn test_static_title_resolves_immediately() {
        let mut nav = Navigator::new();
        assert!(nav.navigate("/shop/latest-sale").is_none());

        let st = state(&nav);
        assert_eq!(st.phase, TitlePhase::Resolved);
        assert!(!st.loading());
        assert_eq!(st.display_name(), "Latest Sale");
    }

    #[test]
    fn test_lookup_kind_starts_loading() {
        let mut nav = Navigator::new();
        let ticket = nav.navigate("/shop/subcategory/thrillers").unwrap();

        assert_eq!(ticket.resource, CatalogResource::Subcategory);
        assert_eq!(ticket.id.as_str(), "thrillers");
        assert_eq!(ticket.epoch, nav.epoch());
        assert!(state(&nav).loading());
        assert_eq!(state(&nav).title, "");
    }

    // === Completion Tests ===

    #[test]
    fn test_successful_lookup() {
        let mut nav = Navigator::new();
        let ticket = nav.navigate("/shop/category/64f1").unwrap();

        assert!(nav.complete::<String>(&ticket, Ok("Fiction".to_string())));
        let st = state(&nav);
        assert_eq!(st.phase, TitlePhase::Resolved);
        assert!(!st.used_fallback());
        assert_eq!(st.display_name(), "Fiction Books");
    }

    #[test]
    fn test_failed_lookup_uses_fallback() {
        let mut nav = Navigator::new();
        let ticket = nav.navigate("/shop/category/abc-123").unwrap();

        assert!(nav.complete(&ticket, Err("connection refused")));
        let st = state(&nav);
        assert_eq!(st.phase, TitlePhase::Fallback);
        assert!(st.used_fallback());
        assert!(!st.loading());
        assert_eq!(st.title, "abc 123");
        assert_eq!(st.display_name(), "abc 123 Books");
    }

    #[test]
    fn test_brand_fallback_formatting() {
        let mut nav = Navigator::new();
        let ticket = nav.navigate("/shop/brand/penguin-random-house").unwrap();

        nav.complete(&ticket, Err("404"));
        assert_eq!(state(&nav).display_name(), "penguin random house Publisher");
    }

    #[test]
    fn test_blank_title_treated_as_failure() {
        let mut nav = Navigator::new();
        let ticket = nav.navigate("/shop/brand/orbit").unwrap();

        nav.complete::<String>(&ticket, Ok("  ".to_string()));
        assert!(state(&nav).used_fallback());
        assert_eq!(state(&nav).title, "orbit");
    }

    // === Stale Result Tests ===

    #[test]
    fn test_stale_result_discarded() {
        let mut nav = Navigator::new();
        let ticket_a = nav.navigate("/shop/category/A").unwrap();
        let ticket_b = nav.navigate("/shop/category/B").unwrap();

        assert!(nav.complete::<String>(&ticket_b, Ok("Bravo".to_string())));
        assert!(!nav.complete::<String>(&ticket_a, Ok("Alpha".to_string())));
        assert_eq!(state(&nav).title, "Bravo");
    }

    #[test]
    fn test_stale_result_arriving_first_is_discarded() {
        let mut nav = Navigator::new();
        let ticket_a = nav.navigate("/shop/category/A").unwrap();
        let ticket_b = nav.navigate("/shop/category/B").unwrap();

        assert!(!nav.complete::<String>(&ticket_a, Ok("Alpha".to_string())));
        assert!(state(&nav).loading());
        assert_eq!(state(&nav).title, "");

        assert!(nav.complete::<String>(&ticket_b, Ok("Bravo".to_string())));
        assert_eq!(state(&nav).title, "Bravo");
    }

    #[test]
    fn test_stale_failure_does_not_apply_fallback() {
        let mut nav = Navigator::new();
        let ticket_a = nav.navigate("/shop/category/A").unwrap();
        nav.navigate("/shop/mega-sale");

        assert!(!nav.complete(&ticket_a, Err("timeout")));
        assert_eq!(state(&nav).display_name(), "Mega Sale");
        assert!(!state(&nav).used_fallback());
    }

    #[test]
    fn test_same_path_reissues_lookup() {
        let mut nav = Navigator::new();
        let first = nav.navigate("/shop/brand/orbit").unwrap();
        let second = nav.navigate("/shop/brand/orbit").unwrap();

        assert_ne!(first.epoch, second.epoch);
        assert!(!nav.complete::<String>(&first, Ok("Orbit".to_string())));
        assert!(nav.complete::<String>(&second, Ok("Orbit".to_string())));
    }

    #[test]
    fn test_result_applied_only_once() {
        let mut nav = Navigator::new();
        let ticket = nav.navigate("/shop/brand/orbit").unwrap();

        assert!(nav.complete::<String>(&ticket, Ok("Orbit".to_string())));
        assert!(!nav.complete(&ticket, Err("late duplicate")));
        assert_eq!(state(&nav).title, "Orbit");
    }
}
