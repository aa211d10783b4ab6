//! Storefront route handling.
//!
//! A URL path is classified into a [`PageKind`], which decides how the page
//! title is obtained: not at all, from a static label, or from a remote lookup
//! keyed by the last path segment. [`Navigator`] tracks the title of the
//! current navigation and discards lookup results from earlier ones.

mod context;
mod kind;
mod navigation;

pub use context::{RouteContext, TitleSource};
pub use kind::PageKind;
pub use navigation::{LookupTicket, Navigator, RouteState, TitlePhase};
