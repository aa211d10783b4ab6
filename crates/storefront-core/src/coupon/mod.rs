//! Coupon module.
//!
//! Coupon records and their derived lifecycle status, the admin form with
//! its submission rules, and the admin coupon list.

mod coupon;
mod form;
mod list;

pub use coupon::{Coupon, CouponStatus, DiscountType, DiscountValue};
pub use form::{CouponDraft, CouponUpdate, NewCoupon};
pub use list::{CouponEvent, CouponList};
