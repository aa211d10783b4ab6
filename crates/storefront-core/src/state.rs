//! Shop-wide state and its reducer.
//!
//! State is an explicit value handed to whatever needs it; the only way to
//! change it is [`reduce`].

use crate::ids::UserId;
use serde::{Deserialize, Serialize};

/// Lowest price the filter accepts.
pub const PRICE_FLOOR: u32 = 0;
/// Highest price the filter accepts.
pub const PRICE_CEILING: u32 = 1000;

/// Price filter range in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: PRICE_FLOOR,
            max: PRICE_CEILING,
        }
    }
}

impl PriceRange {
    /// Build a range clamped to the filter bounds.
    ///
    /// Each end is clamped to `[PRICE_FLOOR, PRICE_CEILING]`, then a minimum
    /// above the maximum is pulled down to it.
    pub fn clamped(min: u32, max: u32) -> Self {
        let max = max.clamp(PRICE_FLOOR, PRICE_CEILING);
        let min = min.clamp(PRICE_FLOOR, PRICE_CEILING).min(max);
        Self { min, max }
    }

    pub fn contains(&self, price: u32) -> bool {
        (self.min..=self.max).contains(&price)
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub user_id: UserId,
    pub name: String,
    pub token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopState {
    pub price_range: PriceRange,
    pub session: Option<UserSession>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopAction {
    SetPriceRange { min: u32, max: u32 },
    ResetPriceRange,
    SignIn(UserSession),
    SignOut,
}

/// Apply an action to the shop state.
pub fn reduce(state: ShopState, action: ShopAction) -> ShopState {
    match action {
        ShopAction::SetPriceRange { min, max } => ShopState {
            price_range: PriceRange::clamped(min, max),
            ..state
        },
        ShopAction::ResetPriceRange => ShopState {
            price_range: PriceRange::default(),
            ..state
        },
        ShopAction::SignIn(session) => ShopState {
            session: Some(session),
            ..state
        },
        ShopAction::SignOut => ShopState {
            session: None,
            ..state
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> UserSession {
        UserSession {
            user_id: UserId::new("u1"),
            name: "Ada".to_string(),
            token: "t0k".to_string(),
        }
    }

    #[test]
    fn test_price_range_clamped_to_bounds() {
        assert_eq!(PriceRange::clamped(50, 5000), PriceRange { min: 50, max: 1000 });
    }

    #[test]
    fn test_price_range_min_never_exceeds_max() {
        assert_eq!(PriceRange::clamped(700, 300), PriceRange { min: 300, max: 300 });
        assert_eq!(PriceRange::clamped(2000, 1500), PriceRange { min: 1000, max: 1000 });
    }

    #[test]
    fn test_reduce_price_range() {
        let state = reduce(ShopState::default(), ShopAction::SetPriceRange { min: 20, max: 80 });
        assert_eq!(state.price_range, PriceRange { min: 20, max: 80 });
        assert!(state.price_range.contains(80));
        assert!(!state.price_range.contains(81));

        let state = reduce(state, ShopAction::ResetPriceRange);
        assert!(state.price_range.is_default());
    }

    #[test]
    fn test_reduce_session_keeps_filters() {
        let state = reduce(ShopState::default(), ShopAction::SetPriceRange { min: 10, max: 20 });
        let state = reduce(state, ShopAction::SignIn(session()));
        assert_eq!(state.session, Some(session()));
        assert_eq!(state.price_range.min, 10);

        let state = reduce(state, ShopAction::SignOut);
        assert!(state.session.is_none());
        assert_eq!(state.price_range.max, 20);
    }
}
