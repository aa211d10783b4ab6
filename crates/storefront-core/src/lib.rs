//! Storefront domain types and logic.
//!
//! This crate holds the pieces of the bookstore storefront and admin dashboard
//! that are independent of any transport or UI:
//!
//! - **Route**: path classification into a [`PageKind`], title resolution
//!   states, display names, and the navigation epoch guard
//! - **Coupon**: coupon records, lifecycle status, form validation, and the
//!   admin coupon list
//! - **Catalog**: categories, sub-categories, brands, banners, slug preview
//! - **State**: shop-wide state (price range, session) with a pure reducer
//!
//! # Example
//!
//! ```rust
//! use storefront_core::prelude::*;
//!
//! let ctx = RouteContext::from_path("/shop/mega-sale");
//! assert_eq!(ctx.kind, PageKind::MegaSale);
//! assert_eq!(ctx.kind.display_name(""), "Mega Sale");
//! ```

pub mod error;
pub mod ids;
pub mod notice;
pub mod state;

pub mod catalog;
pub mod coupon;
pub mod route;

pub use error::CommerceError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::notice::{CatalogAction, CouponAction, Notice, NoticeLevel};
    pub use crate::state::{reduce, PriceRange, ShopAction, ShopState, UserSession};

    // Catalog
    pub use crate::catalog::{slugify, CatalogEntity, CatalogResource};

    // Coupon
    pub use crate::coupon::{
        Coupon, CouponDraft, CouponEvent, CouponList, CouponStatus, CouponUpdate, DiscountType,
        DiscountValue, NewCoupon,
    };

    // Route
    pub use crate::route::{
        LookupTicket, Navigator, PageKind, RouteContext, RouteState, TitlePhase, TitleSource,
    };
}
