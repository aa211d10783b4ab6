//! Storefront error types.

use thiserror::Error;

/// Errors that can occur in storefront domain operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Coupon not found in the local list.
    #[error("Coupon not found: {0}")]
    CouponNotFound(String),

    /// Unknown catalog resource name.
    #[error("Unknown catalog resource: {0}")]
    UnknownResource(String),

    /// Unknown discount type.
    #[error("Unknown discount type: {0}")]
    UnknownDiscountType(String),

    /// Unknown coupon status.
    #[error("Unknown coupon status: {0}")]
    UnknownStatus(String),

    /// Invalid coupon validity window.
    #[error("Invalid validity window: valid until ({until}) must be after valid from ({from})")]
    InvalidValidityWindow { from: String, until: String },

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CommerceError::CouponNotFound("SAVE10".to_string()).to_string(),
            "Coupon not found: SAVE10"
        );
        assert_eq!(
            CommerceError::InvalidValidityWindow {
                from: "2024-07-01".to_string(),
                until: "2024-06-01".to_string(),
            }
            .to_string(),
            "Invalid validity window: valid until (2024-06-01) must be after valid from (2024-07-01)"
        );
    }
}
