//! Admin coupon list.

use super::{Coupon, CouponStatus};
use crate::error::CommerceError;
use crate::ids::CouponCode;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// A confirmed change reported by the backend.
///
/// Events are only built from successful responses, so a failed request
/// never touches the list.
#[derive(Debug, Clone, PartialEq)]
pub enum CouponEvent {
    /// Full list fetched.
    Loaded(Vec<Coupon>),
    Created(Coupon),
    Updated(Coupon),
    Deleted(CouponCode),
    StatusToggled { code: CouponCode, is_active: bool },
}

/// Coupons shown in the admin dashboard plus the record in edit mode.
#[derive(Debug, Clone, Default)]
pub struct CouponList {
    coupons: Vec<Coupon>,
    editing: Option<CouponCode>,
}

impl CouponList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a confirmed change.
    pub fn apply(&mut self, event: CouponEvent) {
        match event {
            CouponEvent::Loaded(coupons) => {
                self.coupons = coupons;
                if let Some(code) = &self.editing {
                    if !self.coupons.iter().any(|c| &c.code == code) {
                        self.editing = None;
                    }
                }
            }
            CouponEvent::Created(coupon) => {
                self.coupons.retain(|c| c.code != coupon.code);
                self.coupons.insert(0, coupon);
            }
            CouponEvent::Updated(coupon) => {
                if self.editing.as_ref() == Some(&coupon.code) {
                    self.editing = None;
                }
                match self.coupons.iter_mut().find(|c| c.code == coupon.code) {
                    Some(existing) => *existing = coupon,
                    None => self.coupons.insert(0, coupon),
                }
            }
            CouponEvent::Deleted(code) => {
                self.coupons.retain(|c| c.code != code);
                if self.editing.as_ref() == Some(&code) {
                    self.editing = None;
                }
            }
            CouponEvent::StatusToggled { code, is_active } => {
                if let Some(existing) = self.coupons.iter_mut().find(|c| c.code == code) {
                    existing.is_active = is_active;
                }
            }
        }
    }

    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    pub fn get(&self, code: &CouponCode) -> Option<&Coupon> {
        self.coupons.iter().find(|c| &c.code == code)
    }

    pub fn len(&self) -> usize {
        self.coupons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }

    // --- Edit mode ---

    /// Put one record into edit mode. Only one record is edited at a time.
    pub fn begin_edit(&mut self, code: &CouponCode) -> Result<(), CommerceError> {
        if self.get(code).is_none() {
            return Err(CommerceError::CouponNotFound(code.to_string()));
        }
        match &self.editing {
            Some(current) if current != code => Err(CommerceError::ValidationError(format!(
                "coupon {} is already being edited",
                current
            ))),
            _ => {
                self.editing = Some(code.clone());
                Ok(())
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn editing(&self) -> Option<&CouponCode> {
        self.editing.as_ref()
    }

    /// Edit is allowed when nothing else is in edit mode.
    pub fn can_edit(&self, code: &CouponCode) -> bool {
        self.editing.as_ref().map_or(true, |c| c == code)
    }

    /// Status toggle is disabled only for the record being edited; other
    /// records stay toggleable.
    pub fn can_toggle(&self, code: &CouponCode) -> bool {
        self.editing.as_ref() != Some(code)
    }

    pub fn can_delete(&self, code: &CouponCode) -> bool {
        self.editing.as_ref() != Some(code)
    }

    // --- Status views, computed fresh from `now` ---

    pub fn with_status(&self, status: CouponStatus, now: DateTime<Utc>) -> Vec<&Coupon> {
        self.coupons
            .iter()
            .filter(|c| c.status_at(now) == status)
            .collect()
    }

    pub fn status_counts(&self, now: DateTime<Utc>) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for coupon in &self.coupons {
            *counts.entry(coupon.status_at(now).as_str()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coupon::DiscountType;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn coupon(code: &str, is_active: bool, from_days: i64, until_days: i64) -> Coupon {
        Coupon {
            id: None,
            code: CouponCode::new(code),
            discount_type: DiscountType::Percentage,
            discount_percent: Some(5.0),
            discount_amount: None,
            valid_from: now() + Duration::days(from_days),
            valid_until: now() + Duration::days(until_days),
            is_active,
        }
    }

    fn loaded() -> CouponList {
        let mut list = CouponList::new();
        list.apply(CouponEvent::Loaded(vec![
            coupon("ACTIVE", true, -1, 1),
            coupon("OLD", true, -5, -1),
            coupon("SOON", true, 2, 5),
            coupon("OFF", false, -1, 1),
        ]));
        list
    }

    // === Event Tests ===

    #[test]
    fn test_created_goes_first() {
        let mut list = loaded();
        list.apply(CouponEvent::Created(coupon("NEW", true, -1, 3)));
        assert_eq!(list.coupons()[0].code.as_str(), "NEW");
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn test_updated_replaces_in_place() {
        let mut list = loaded();
        let mut changed = coupon("OLD", true, -5, -1);
        changed.discount_percent = Some(50.0);
        list.apply(CouponEvent::Updated(changed));

        assert_eq!(list.len(), 4);
        assert_eq!(list.coupons()[1].discount_percent, Some(50.0));
    }

    #[test]
    fn test_deleted_removed() {
        let mut list = loaded();
        list.apply(CouponEvent::Deleted(CouponCode::new("soon")));
        assert_eq!(list.len(), 3);
        assert!(list.get(&CouponCode::new("SOON")).is_none());
    }

    #[test]
    fn test_status_toggled() {
        let mut list = loaded();
        list.apply(CouponEvent::StatusToggled {
            code: CouponCode::new("OFF"),
            is_active: true,
        });
        let off = list.get(&CouponCode::new("OFF")).unwrap();
        assert_eq!(off.status_at(now()), CouponStatus::Active);
    }

    // === Edit Gating Tests ===

    #[test]
    fn test_edit_disables_own_toggle_only() {
        let mut list = loaded();
        let active = CouponCode::new("ACTIVE");
        let other = CouponCode::new("SOON");

        list.begin_edit(&active).unwrap();
        assert!(!list.can_toggle(&active));
        assert!(list.can_toggle(&other));
        assert!(!list.can_delete(&active));
        assert!(!list.can_edit(&other));
        assert!(list.begin_edit(&other).is_err());
    }

    #[test]
    fn test_update_ends_edit_mode() {
        let mut list = loaded();
        let active = CouponCode::new("ACTIVE");
        list.begin_edit(&active).unwrap();

        list.apply(CouponEvent::Updated(coupon("ACTIVE", true, -1, 10)));
        assert!(list.editing().is_none());
        assert!(list.can_toggle(&active));
    }

    #[test]
    fn test_begin_edit_unknown_code() {
        let mut list = loaded();
        assert_eq!(
            list.begin_edit(&CouponCode::new("MISSING")),
            Err(CommerceError::CouponNotFound("MISSING".to_string()))
        );
    }

    // === Status View Tests ===

    #[test]
    fn test_status_views() {
        let list = loaded();
        let expired = list.with_status(CouponStatus::Expired, now());
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].code.as_str(), "OLD");

        let counts = list.status_counts(now());
        assert_eq!(counts.get("active"), Some(&1));
        assert_eq!(counts.get("expired"), Some(&1));
        assert_eq!(counts.get("pending"), Some(&1));
        assert_eq!(counts.get("inactive"), Some(&1));
    }

    #[test]
    fn test_status_views_follow_clock() {
        let list = loaded();
        let later = now() + Duration::days(3);
        assert_eq!(list.with_status(CouponStatus::Active, later).len(), 1);
        assert_eq!(list.with_status(CouponStatus::Expired, later).len(), 2);
    }
}
