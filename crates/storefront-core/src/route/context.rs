//! Route context derived from a URL path.

use super::PageKind;
use crate::catalog::CatalogResource;
use crate::ids::EntityId;
use serde::Serialize;

/// Where the title of a route comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleSource {
    /// No title: the shop landing page and plain shop listings.
    Empty,
    /// A fixed label, available immediately.
    Static(&'static str),
    /// A remote lookup of the entity named by the last segment.
    Lookup {
        resource: CatalogResource,
        id: EntityId,
    },
}

/// Classification of the current URL path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteContext {
    /// The path as given, without query string or fragment.
    pub path: String,
    /// Non-empty path components in order.
    pub segments: Vec<String>,
    /// Classified page kind.
    pub kind: PageKind,
}

impl RouteContext {
    /// Classify a URL path.
    pub fn from_path(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string();
        let segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(decode_segment)
            .collect();
        let kind = PageKind::classify(&segments);

        Self {
            path,
            segments,
            kind,
        }
    }

    /// The final path segment, used as the lookup key.
    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(|s| s.as_str())
    }

    /// Whether this is exactly the `/shop` landing page.
    pub fn is_landing(&self) -> bool {
        self.segments.len() == 1 && self.segments[0] == "shop"
    }

    /// Title derived locally from the last segment, hyphens replaced by spaces.
    pub fn fallback_title(&self) -> String {
        self.last_segment()
            .map(|s| s.replace('-', " "))
            .unwrap_or_default()
    }

    /// Decide how this route's title is obtained.
    pub fn title_source(&self) -> TitleSource {
        if self.is_landing() {
            return TitleSource::Empty;
        }

        if let Some(title) = self.kind.static_title() {
            return TitleSource::Static(title);
        }

        // `/shop/category` names the kind but no entity. A token right after
        // another entity token is an id (`/shop/subcategory/category`).
        let id = match self.segments.as_slice() {
            [.., prev, last] if is_entity_token(prev) => Some(last.as_str()),
            [.., last] if !is_entity_token(last) => Some(last.as_str()),
            _ => None,
        };

        match (self.kind.lookup_resource(), id) {
            (Some(resource), Some(id)) => TitleSource::Lookup {
                resource,
                id: EntityId::new(id),
            },
            _ => TitleSource::Empty,
        }
    }
}

/// Percent-decode one path segment, keeping it raw if it is not valid UTF-8.
fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

/// Whether a segment is the token of a kind whose title is looked up.
fn is_entity_token(segment: &str) -> bool {
    PageKind::classify(&[segment]).lookup_resource().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_discard_empty() {
        let ctx = RouteContext::from_path("//shop///category/fiction/");
        assert_eq!(ctx.segments, vec!["shop", "category", "fiction"]);
        assert_eq!(ctx.last_segment(), Some("fiction"));
    }

    #[test]
    fn test_query_and_fragment_ignored() {
        let ctx = RouteContext::from_path("/shop/search?q=dune#top");
        assert_eq!(ctx.segments, vec!["shop", "search"]);
        assert_eq!(ctx.kind, PageKind::Search);
    }

    #[test]
    fn test_shop_landing_has_no_title_source() {
        let ctx = RouteContext::from_path("/shop");
        assert!(ctx.is_landing());
        assert_eq!(ctx.kind, PageKind::Shop);
        assert_eq!(ctx.title_source(), TitleSource::Empty);

        let ctx = RouteContext::from_path("/shop/");
        assert!(ctx.is_landing());
        assert_eq!(ctx.title_source(), TitleSource::Empty);
    }

    #[test]
    fn test_plain_shop_path_has_no_lookup() {
        let ctx = RouteContext::from_path("/shop/bestsellers");
        assert_eq!(ctx.kind, PageKind::Shop);
        assert_eq!(ctx.title_source(), TitleSource::Empty);
    }

    #[test]
    fn test_static_kinds() {
        let ctx = RouteContext::from_path("/shop/offer-sale");
        assert_eq!(ctx.title_source(), TitleSource::Static("Special Offers"));

        let ctx = RouteContext::from_path("/shop/mega-sale/page-2");
        assert_eq!(ctx.title_source(), TitleSource::Static("Mega Sale"));
    }

    #[test]
    fn test_lookup_kinds_keyed_by_last_segment() {
        let ctx = RouteContext::from_path("/shop/category/abc-123");
        assert_eq!(
            ctx.title_source(),
            TitleSource::Lookup {
                resource: CatalogResource::Category,
                id: EntityId::new("abc-123"),
            }
        );

        let ctx = RouteContext::from_path("/shop/brand/64f1");
        assert_eq!(
            ctx.title_source(),
            TitleSource::Lookup {
                resource: CatalogResource::Brand,
                id: EntityId::new("64f1"),
            }
        );
    }

    #[test]
    fn test_lookup_kind_without_id() {
        let ctx = RouteContext::from_path("/shop/category");
        assert_eq!(ctx.kind, PageKind::Category);
        assert_eq!(ctx.title_source(), TitleSource::Empty);
    }

    #[test]
    fn test_entity_token_as_id() {
        let ctx = RouteContext::from_path("/shop/subcategory/category");
        assert_eq!(ctx.kind, PageKind::Category);
        assert_eq!(
            ctx.title_source(),
            TitleSource::Lookup {
                resource: CatalogResource::Category,
                id: EntityId::new("category"),
            }
        );

        let ctx = RouteContext::from_path("/shop/category/brand");
        assert_eq!(
            ctx.title_source(),
            TitleSource::Lookup {
                resource: CatalogResource::Category,
                id: EntityId::new("brand"),
            }
        );
    }

    // === Percent-Decoding Tests ===

    #[test]
    fn test_encoded_segment_decoded() {
        let ctx = RouteContext::from_path("/shop/category/sci%20fi");
        assert_eq!(ctx.last_segment(), Some("sci fi"));
        assert_eq!(ctx.fallback_title(), "sci fi");
        assert_eq!(
            ctx.title_source(),
            TitleSource::Lookup {
                resource: CatalogResource::Category,
                id: EntityId::new("sci fi"),
            }
        );
    }

    #[test]
    fn test_encoded_token_classified() {
        let ctx = RouteContext::from_path("/shop/mega%2Dsale");
        assert_eq!(ctx.kind, PageKind::MegaSale);
    }

    #[test]
    fn test_invalid_utf8_segment_kept_raw() {
        let ctx = RouteContext::from_path("/shop/brand/%FF%FE");
        assert_eq!(ctx.last_segment(), Some("%FF%FE"));
    }

    #[test]
    fn test_fallback_title() {
        let ctx = RouteContext::from_path("/shop/category/abc-123");
        assert_eq!(ctx.fallback_title(), "abc 123");

        let ctx = RouteContext::from_path("/");
        assert_eq!(ctx.fallback_title(), "");
    }
}
