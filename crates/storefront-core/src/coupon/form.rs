//! Coupon create/edit form and its submission rules.

use super::{Coupon, DiscountType, DiscountValue};
use crate::error::CommerceError;
use crate::ids::CouponCode;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Payload for `POST /coupon`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewCoupon {
    pub code: CouponCode,
    pub discount_type: DiscountType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<f64>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub is_active: bool,
}

/// Payload for `PATCH /coupon/{code}`. Absent fields are left unchanged.
///
/// The discount fields are doubly optional: `None` leaves the field out of
/// the body, `Some(None)` sends an explicit `null` so the backend clears it.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CouponUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<DiscountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl CouponUpdate {
    /// Update that only flips the activation flag.
    pub fn status(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Editable coupon form state.
///
/// The discount fields are private so that changing the discount type always
/// goes through [`CouponDraft::set_discount_type`], which clears the field of
/// the previous type.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponDraft {
    pub code: String,
    discount_type: DiscountType,
    discount_percent: Option<f64>,
    discount_amount: Option<f64>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl Default for CouponDraft {
    fn default() -> Self {
        Self {
            code: String::new(),
            discount_type: DiscountType::default(),
            discount_percent: None,
            discount_amount: None,
            valid_from: None,
            valid_until: None,
            is_active: true,
        }
    }
}

impl CouponDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill the form from an existing coupon for editing.
    pub fn from_coupon(coupon: &Coupon) -> Self {
        let mut draft = Self {
            code: coupon.code.to_string(),
            discount_type: coupon.discount_type,
            discount_percent: None,
            discount_amount: None,
            valid_from: Some(coupon.valid_from),
            valid_until: Some(coupon.valid_until),
            is_active: coupon.is_active,
        };
        match coupon.discount() {
            Some(DiscountValue::Percentage(p)) => draft.discount_percent = Some(p),
            Some(DiscountValue::Amount(a)) => draft.discount_amount = Some(a),
            None => {}
        }
        draft
    }

    pub fn discount_type(&self) -> DiscountType {
        self.discount_type
    }

    pub fn discount_percent(&self) -> Option<f64> {
        self.discount_percent
    }

    pub fn discount_amount(&self) -> Option<f64> {
        self.discount_amount
    }

    /// Switch the discount type. The other type's value is cleared.
    pub fn set_discount_type(&mut self, discount_type: DiscountType) {
        match discount_type {
            DiscountType::Percentage => self.discount_amount = None,
            DiscountType::Amount => self.discount_percent = None,
        }
        self.discount_type = discount_type;
    }

    /// Set the discount value for the current type.
    pub fn set_discount(&mut self, value: f64) {
        match self.discount_type {
            DiscountType::Percentage => self.discount_percent = Some(value),
            DiscountType::Amount => self.discount_amount = Some(value),
        }
    }

    /// Check the discount fields and return the single value to submit.
    fn checked_discount(&self) -> Result<DiscountValue, CommerceError> {
        match (self.discount_type, self.discount_percent, self.discount_amount) {
            (DiscountType::Percentage, Some(p), None) => {
                if !(0.0..=100.0).contains(&p) {
                    return Err(CommerceError::ValidationError(format!(
                        "discount percent must be between 0 and 100, got {}",
                        p
                    )));
                }
                Ok(DiscountValue::Percentage(p))
            }
            (DiscountType::Amount, None, Some(a)) => {
                if !(a >= 0.0 && a.is_finite()) {
                    return Err(CommerceError::ValidationError(format!(
                        "discount amount must be zero or more, got {}",
                        a
                    )));
                }
                Ok(DiscountValue::Amount(a))
            }
            (DiscountType::Percentage, None, _) => Err(CommerceError::ValidationError(
                "discount percent is required for percentage coupons".to_string(),
            )),
            (DiscountType::Amount, _, None) => Err(CommerceError::ValidationError(
                "discount amount is required for amount coupons".to_string(),
            )),
            (discount_type, _, _) => Err(CommerceError::ValidationError(format!(
                "only one discount field may be set for {} coupons",
                discount_type
            ))),
        }
    }

    /// Validate the form for creation.
    pub fn validate(&self) -> Result<NewCoupon, CommerceError> {
        let code = CouponCode::new(&self.code);
        if code.is_empty() {
            return Err(CommerceError::ValidationError(
                "coupon code is required".to_string(),
            ));
        }

        let (valid_from, valid_until) = match (self.valid_from, self.valid_until) {
            (Some(from), Some(until)) => (from, until),
            _ => {
                return Err(CommerceError::ValidationError(
                    "valid from and valid until are required".to_string(),
                ))
            }
        };
        if valid_until <= valid_from {
            return Err(CommerceError::InvalidValidityWindow {
                from: valid_from.to_rfc3339(),
                until: valid_until.to_rfc3339(),
            });
        }

        let (discount_percent, discount_amount) = split_discount(self.checked_discount()?);

        Ok(NewCoupon {
            code,
            discount_type: self.discount_type,
            discount_percent,
            discount_amount,
            valid_from,
            valid_until,
            is_active: self.is_active,
        })
    }

    /// Validate the form for an edit. The validity window is not editable.
    ///
    /// Both discount fields are always sent: the one for the current type
    /// with its value, the other as `null` so a previous type's value is
    /// cleared on the backend.
    pub fn validate_update(&self) -> Result<CouponUpdate, CommerceError> {
        let (discount_percent, discount_amount) = split_discount(self.checked_discount()?);

        Ok(CouponUpdate {
            discount_type: Some(self.discount_type),
            discount_percent: Some(discount_percent),
            discount_amount: Some(discount_amount),
            is_active: Some(self.is_active),
        })
    }
}

fn split_discount(value: DiscountValue) -> (Option<f64>, Option<f64>) {
    match value {
        DiscountValue::Percentage(p) => (Some(p), None),
        DiscountValue::Amount(a) => (None, Some(a)),
    }
}
