//! Catalog module.
//!
//! Contains the admin-managed catalog entities and slug preview.

mod entity;
mod slug;

pub use entity::{CatalogEntity, CatalogResource};
pub use slug::slugify;
