//! Page kinds and their per-kind presentation.

use crate::catalog::CatalogResource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed classification of a storefront route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    /// Books in one category.
    Category,
    /// Books in one sub-category.
    Subcategory,
    /// Books from one publisher.
    Brand,
    /// The mega sale campaign.
    MegaSale,
    /// The latest sale campaign.
    LatestSale,
    /// Special offers.
    Offer,
    /// Search results.
    Search,
    /// Plain shop listing.
    #[default]
    Shop,
}

/// Segment tokens in classification order. First match wins.
const PRECEDENCE: [(&str, PageKind); 7] = [
    ("category", PageKind::Category),
    ("subcategory", PageKind::Subcategory),
    ("brand", PageKind::Brand),
    ("mega-sale", PageKind::MegaSale),
    ("latest-sale", PageKind::LatestSale),
    ("offer-sale", PageKind::Offer),
    ("search", PageKind::Search),
];

impl PageKind {
    /// Classify a set of path segments.
    ///
    /// Segments are treated as a set of tokens: position does not matter, only
    /// which known tokens are present.
    pub fn classify<S: AsRef<str>>(segments: &[S]) -> Self {
        PRECEDENCE
            .iter()
            .find(|(token, _)| segments.iter().any(|s| s.as_ref() == *token))
            .map(|(_, kind)| *kind)
            .unwrap_or(PageKind::Shop)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Category => "category",
            PageKind::Subcategory => "subcategory",
            PageKind::Brand => "brand",
            PageKind::MegaSale => "mega-sale",
            PageKind::LatestSale => "latest-sale",
            PageKind::Offer => "offer",
            PageKind::Search => "search",
            PageKind::Shop => "shop",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "category" => Some(PageKind::Category),
            "subcategory" => Some(PageKind::Subcategory),
            "brand" => Some(PageKind::Brand),
            "mega-sale" => Some(PageKind::MegaSale),
            "latest-sale" => Some(PageKind::LatestSale),
            "offer" | "offer-sale" => Some(PageKind::Offer),
            "search" => Some(PageKind::Search),
            "shop" => Some(PageKind::Shop),
            _ => None,
        }
    }

    /// The catalog resource whose title names this page, if any.
    pub fn lookup_resource(&self) -> Option<CatalogResource> {
        match self {
            PageKind::Category => Some(CatalogResource::Category),
            PageKind::Subcategory => Some(CatalogResource::Subcategory),
            PageKind::Brand => Some(CatalogResource::Brand),
            PageKind::MegaSale
            | PageKind::LatestSale
            | PageKind::Offer
            | PageKind::Search
            | PageKind::Shop => None,
        }
    }

    /// Fixed title for kinds that never need a lookup.
    pub fn static_title(&self) -> Option<&'static str> {
        match self {
            PageKind::MegaSale => Some("Mega Sale"),
            PageKind::LatestSale => Some("Latest Sale"),
            PageKind::Offer => Some("Special Offers"),
            PageKind::Search => Some("Search Results"),
            PageKind::Category | PageKind::Subcategory | PageKind::Brand | PageKind::Shop => None,
        }
    }

    /// Format a resolved title for display.
    pub fn display_name(&self, title: &str) -> String {
        match self {
            PageKind::Category => format!("{} Books", title),
            PageKind::Brand => format!("{} Publisher", title),
            PageKind::Subcategory | PageKind::Shop => title.to_string(),
            PageKind::MegaSale | PageKind::LatestSale | PageKind::Offer | PageKind::Search => {
                self.static_title().unwrap_or_default().to_string()
            }
        }
    }

    /// Icon name shown next to the breadcrumb.
    pub fn icon(&self) -> &'static str {
        match self {
            PageKind::Category => "book-open",
            PageKind::Subcategory => "bookmark",
            PageKind::Brand => "building",
            PageKind::MegaSale => "flame",
            PageKind::LatestSale => "sparkles",
            PageKind::Offer => "gift",
            PageKind::Search => "search",
            PageKind::Shop => "store",
        }
    }

    /// Short contextual description for the page header.
    pub fn description(&self, title: &str) -> String {
        match self {
            PageKind::Category => format!("Browse our collection of {} books", title),
            PageKind::Subcategory => format!("Explore titles in {}", title),
            PageKind::Brand => format!("Books published by {}", title),
            PageKind::MegaSale => "Our biggest discounts of the season".to_string(),
            PageKind::LatestSale => "Fresh deals on recent arrivals".to_string(),
            PageKind::Offer => "Limited-time offers on selected books".to_string(),
            PageKind::Search => "Books matching your search".to_string(),
            PageKind::Shop => "Discover books across every category".to_string(),
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Classification Tests ===

    #[test]
    fn test_classify_each_token() {
        assert_eq!(PageKind::classify(&["shop", "category", "x"]), PageKind::Category);
        assert_eq!(PageKind::classify(&["shop", "subcategory", "x"]), PageKind::Subcategory);
        assert_eq!(PageKind::classify(&["shop", "brand", "x"]), PageKind::Brand);
        assert_eq!(PageKind::classify(&["shop", "mega-sale"]), PageKind::MegaSale);
        assert_eq!(PageKind::classify(&["shop", "latest-sale"]), PageKind::LatestSale);
        assert_eq!(PageKind::classify(&["shop", "offer-sale"]), PageKind::Offer);
        assert_eq!(PageKind::classify(&["shop", "search"]), PageKind::Search);
    }

    #[test]
    fn test_classify_category_wins() {
        assert_eq!(PageKind::classify(&["shop", "category", "search"]), PageKind::Category);
        assert_eq!(PageKind::classify(&["search", "brand", "category"]), PageKind::Category);
        assert_eq!(
            PageKind::classify(&["mega-sale", "subcategory", "category", "brand"]),
            PageKind::Category
        );
    }

    #[test]
    fn test_classify_position_insensitive() {
        assert_eq!(PageKind::classify(&["brand", "shop"]), PageKind::Brand);
        assert_eq!(PageKind::classify(&["search", "latest-sale"]), PageKind::LatestSale);
    }

    #[test]
    fn test_classify_default_shop() {
        assert_eq!(PageKind::classify(&["shop"]), PageKind::Shop);
        assert_eq!(PageKind::classify::<&str>(&[]), PageKind::Shop);
        assert_eq!(PageKind::classify(&["shop", "offer"]), PageKind::Shop);
        assert_eq!(PageKind::classify(&["shop", "categories"]), PageKind::Shop);
    }

    // === Presentation Tests ===

    #[test]
    fn test_display_name() {
        assert_eq!(PageKind::Category.display_name("Fiction"), "Fiction Books");
        assert_eq!(PageKind::Brand.display_name("Penguin"), "Penguin Publisher");
        assert_eq!(PageKind::Subcategory.display_name("Thrillers"), "Thrillers");
        assert_eq!(PageKind::Shop.display_name("anything"), "anything");
        assert_eq!(PageKind::MegaSale.display_name(""), "Mega Sale");
        assert_eq!(PageKind::LatestSale.display_name(""), "Latest Sale");
        assert_eq!(PageKind::Offer.display_name(""), "Special Offers");
        assert_eq!(PageKind::Search.display_name(""), "Search Results");
    }

    #[test]
    fn test_lookup_resource_only_for_entities() {
        assert_eq!(PageKind::Category.lookup_resource(), Some(CatalogResource::Category));
        assert_eq!(
            PageKind::Subcategory.lookup_resource(),
            Some(CatalogResource::Subcategory)
        );
        assert_eq!(PageKind::Brand.lookup_resource(), Some(CatalogResource::Brand));
        assert!(PageKind::Search.lookup_resource().is_none());
        assert!(PageKind::Shop.lookup_resource().is_none());
    }

    #[test]
    fn test_from_str_roundtrips_as_str() {
        for (_, kind) in PRECEDENCE {
            assert_eq!(PageKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(PageKind::from_str("offer-sale"), Some(PageKind::Offer));
        assert_eq!(PageKind::from_str("nope"), None);
    }
}
