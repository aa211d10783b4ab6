//! Catalog entities: categories, sub-categories, brands and banners.

use crate::error::CommerceError;
use crate::ids::EntityId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A REST resource collection exposed by the catalog backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogResource {
    Category,
    Subcategory,
    Brand,
    Banner,
    Coupon,
}

impl CatalogResource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogResource::Category => "category",
            CatalogResource::Subcategory => "subcategory",
            CatalogResource::Brand => "brand",
            CatalogResource::Banner => "banner",
            CatalogResource::Coupon => "coupon",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "category" | "categories" => Some(CatalogResource::Category),
            "subcategory" | "subcategories" | "sub-category" => {
                Some(CatalogResource::Subcategory)
            }
            "brand" | "brands" | "publisher" => Some(CatalogResource::Brand),
            "banner" | "banners" => Some(CatalogResource::Banner),
            "coupon" | "coupons" => Some(CatalogResource::Coupon),
            _ => None,
        }
    }

    /// Collection path, e.g. `/category`.
    pub fn collection_path(&self) -> String {
        format!("/{}", self.as_str())
    }

    /// Item path, e.g. `/category/64f1`.
    pub fn item_path(&self, id: &str) -> String {
        format!("/{}/{}", self.as_str(), id)
    }

    /// Human label used in notifications.
    pub fn label(&self) -> &'static str {
        match self {
            CatalogResource::Category => "Category",
            CatalogResource::Subcategory => "Sub-category",
            CatalogResource::Brand => "Brand",
            CatalogResource::Banner => "Banner",
            CatalogResource::Coupon => "Coupon",
        }
    }
}

impl fmt::Display for CatalogResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CatalogResource {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CatalogResource::from_str(s).ok_or_else(|| CommerceError::UnknownResource(s.to_string()))
    }
}

/// A catalog entity as returned by the backend.
///
/// Categories, sub-categories, brands and banners share this shape; fields a
/// resource does not use are absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntity {
    /// Backend identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: EntityId,
    /// Display title.
    pub title: String,
    /// URL-friendly slug.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Parent category, for sub-categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<EntityId>,
}

impl CatalogEntity {
    /// Slug as stored, or a preview derived from the title.
    pub fn slug_or_preview(&self) -> String {
        match &self.slug {
            Some(slug) if !slug.is_empty() => slug.clone(),
            _ => super::slugify(&self.title),
        }
    }

    pub fn is_subcategory_of(&self, parent: &EntityId) -> bool {
        self.category.as_ref() == Some(parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_paths() {
        assert_eq!(CatalogResource::Category.collection_path(), "/category");
        assert_eq!(CatalogResource::Brand.item_path("64f1"), "/brand/64f1");
        assert_eq!(CatalogResource::Coupon.item_path("SAVE10"), "/coupon/SAVE10");
    }

    #[test]
    fn test_resource_from_str_aliases() {
        assert_eq!(CatalogResource::from_str("Brands"), Some(CatalogResource::Brand));
        assert_eq!(CatalogResource::from_str("publisher"), Some(CatalogResource::Brand));
        assert_eq!(
            CatalogResource::from_str("sub-category"),
            Some(CatalogResource::Subcategory)
        );
        assert_eq!(CatalogResource::from_str("widgets"), None);
    }

    #[test]
    fn test_resource_parse_error() {
        let err = "widgets".parse::<CatalogResource>().unwrap_err();
        assert_eq!(err, CommerceError::UnknownResource("widgets".to_string()));
    }

    #[test]
    fn test_entity_deserialize() {
        let json = r#"{
            "_id": "65a1",
            "title": "Science Fiction",
            "slug": "science-fiction",
            "category": "64f1",
            "createdAt": "2024-01-01T00:00:00Z"
        }"#;
        let entity: CatalogEntity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.id.as_str(), "65a1");
        assert_eq!(entity.title, "Science Fiction");
        assert!(entity.is_subcategory_of(&EntityId::new("64f1")));
    }

    #[test]
    fn test_slug_preview_when_missing() {
        let entity: CatalogEntity =
            serde_json::from_str(r#"{"_id": "1", "title": "Young Adult & Teens"}"#).unwrap();
        assert_eq!(entity.slug_or_preview(), "young-adult-teens");
    }
}
