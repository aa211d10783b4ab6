//! Newtype IDs for backend identifiers.
//!
//! The backend owns all identifiers; these wrappers keep a category id from
//! being passed where a coupon code is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Backend id of a category, sub-category, brand or banner.
    EntityId
);
define_id!(
    /// Backend id of a coupon record (`_id`).
    CouponId
);
define_id!(
    /// Signed-in user id.
    UserId
);

/// Coupon code, always stored upper-cased and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CouponCode(String);

impl CouponCode {
    /// Normalize a human-entered code.
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CouponCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for CouponCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<CouponCode> for String {
    fn from(code: CouponCode) -> Self {
        code.0
    }
}

impl AsRef<str> for CouponCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = EntityId::new("64f1c2");
        assert_eq!(id.as_str(), "64f1c2");
    }

    #[test]
    fn test_id_from_string() {
        let id: EntityId = "abc-123".into();
        assert_eq!(id.as_str(), "abc-123");
        assert_eq!(format!("{}", id), "abc-123");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = CouponId::new("65aa01");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""65aa01""#);
    }

    #[test]
    fn test_coupon_code_normalized() {
        let code = CouponCode::new("  summer10 ");
        assert_eq!(code.as_str(), "SUMMER10");
    }

    #[test]
    fn test_coupon_code_normalized_on_deserialize() {
        let code: CouponCode = serde_json::from_str(r#""welcome""#).unwrap();
        assert_eq!(code, CouponCode::new("WELCOME"));
    }
}
