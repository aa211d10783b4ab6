//! Coupon records and lifecycle status.

use crate::error::CommerceError;
use crate::ids::{CouponCode, CouponId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a coupon's discount is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Percentage off (0 - 100).
    #[default]
    Percentage,
    /// Fixed amount off.
    Amount,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Amount => "amount",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "percentage" | "percent" => Some(DiscountType::Percentage),
            "amount" | "fixed" => Some(DiscountType::Amount),
            _ => None,
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DiscountType {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiscountType::from_str(s).ok_or_else(|| CommerceError::UnknownDiscountType(s.to_string()))
    }
}

/// The meaningful discount of a coupon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiscountValue {
    Percentage(f64),
    Amount(f64),
}

impl fmt::Display for DiscountValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountValue::Percentage(p) => write!(f, "{}% off", p),
            DiscountValue::Amount(a) => write!(f, "{:.2} off", a),
        }
    }
}

/// Derived lifecycle status of a coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponStatus {
    /// Switched off by an admin, regardless of dates.
    Inactive,
    /// Validity window has ended.
    Expired,
    /// Validity window has not started yet.
    Pending,
    /// Usable now.
    Active,
}

impl CouponStatus {
    /// Resolve the status at `now`.
    ///
    /// The activation flag takes precedence over the validity window.
    pub fn resolve(
        is_active: bool,
        valid_from: DateTime<Utc>,
        valid_until: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        if !is_active {
            CouponStatus::Inactive
        } else if now > valid_until {
            CouponStatus::Expired
        } else if now < valid_from {
            CouponStatus::Pending
        } else {
            CouponStatus::Active
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CouponStatus::Inactive => "inactive",
            CouponStatus::Expired => "expired",
            CouponStatus::Pending => "pending",
            CouponStatus::Active => "active",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "inactive" => Some(CouponStatus::Inactive),
            "expired" => Some(CouponStatus::Expired),
            "pending" => Some(CouponStatus::Pending),
            "active" => Some(CouponStatus::Active),
            _ => None,
        }
    }
}

impl fmt::Display for CouponStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CouponStatus {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CouponStatus::from_str(s).ok_or_else(|| CommerceError::UnknownStatus(s.to_string()))
    }
}

/// A coupon as stored by the catalog backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Backend identifier.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CouponId>,
    /// Unique upper-case code.
    pub code: CouponCode,
    pub discount_type: DiscountType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<f64>,
    /// Fixed amount off, a bare JSON number. The backend keeps no currency
    /// or minor units, so there is nothing for a money type to carry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<f64>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Coupon {
    /// Status at a given instant.
    pub fn status_at(&self, now: DateTime<Utc>) -> CouponStatus {
        CouponStatus::resolve(self.is_active, self.valid_from, self.valid_until, now)
    }

    /// Status right now. Never cache the result: time moves on.
    pub fn status(&self) -> CouponStatus {
        self.status_at(Utc::now())
    }

    /// The discount that applies for this coupon's type, if present.
    pub fn discount(&self) -> Option<DiscountValue> {
        match self.discount_type {
            DiscountType::Percentage => self.discount_percent.map(DiscountValue::Percentage),
            DiscountType::Amount => self.discount_amount.map(DiscountValue::Amount),
        }
    }
}
