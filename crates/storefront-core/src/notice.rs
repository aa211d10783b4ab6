//! User-visible notifications for admin actions.

use crate::catalog::CatalogResource;
use serde::Serialize;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A message shown to the admin after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Failure notice: the server's message when it sent one, otherwise the
    /// generic message for the action.
    pub fn failure(server_message: Option<&str>, generic: impl Into<String>) -> Self {
        let message = match server_message.map(str::trim) {
            Some(msg) if !msg.is_empty() => msg.to_string(),
            _ => generic.into(),
        };
        Self {
            level: NoticeLevel::Error,
            message,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Coupon admin actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponAction {
    Load,
    Create,
    Update,
    Delete,
    ToggleStatus,
}

impl CouponAction {
    pub fn success_message(&self) -> &'static str {
        match self {
            CouponAction::Load => "Coupons loaded",
            CouponAction::Create => "Coupon created successfully",
            CouponAction::Update => "Coupon updated successfully",
            CouponAction::Delete => "Coupon deleted successfully",
            CouponAction::ToggleStatus => "Coupon status updated",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            CouponAction::Load => "Failed to fetch coupons",
            CouponAction::Create => "Failed to create coupon",
            CouponAction::Update => "Failed to update coupon",
            CouponAction::Delete => "Failed to delete coupon",
            CouponAction::ToggleStatus => "Failed to update coupon status",
        }
    }

    pub fn succeeded(&self) -> Notice {
        Notice::success(self.success_message())
    }

    pub fn failed(&self, server_message: Option<&str>) -> Notice {
        Notice::failure(server_message, self.failure_message())
    }
}

/// Catalog admin actions on categories, sub-categories, brands and banners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogAction {
    Load(CatalogResource),
    Delete(CatalogResource),
}

impl CatalogAction {
    pub fn success_message(&self) -> String {
        match self {
            CatalogAction::Load(r) => format!("{} list loaded", r.label()),
            CatalogAction::Delete(r) => format!("{} deleted successfully", r.label()),
        }
    }

    pub fn failure_message(&self) -> String {
        match self {
            CatalogAction::Load(r) => format!("Failed to fetch {}", r.label().to_lowercase()),
            CatalogAction::Delete(r) => format!("Failed to delete {}", r.label().to_lowercase()),
        }
    }

    pub fn succeeded(&self) -> Notice {
        Notice::success(self.success_message())
    }

    pub fn failed(&self, server_message: Option<&str>) -> Notice {
        Notice::failure(server_message, self.failure_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_prefers_server_message() {
        let notice = CouponAction::Create.failed(Some("Coupon code already exists"));
        assert!(notice.is_error());
        assert_eq!(notice.message, "Coupon code already exists");
    }

    #[test]
    fn test_failure_generic_fallback() {
        assert_eq!(CouponAction::Delete.failed(None).message, "Failed to delete coupon");
        assert_eq!(CouponAction::Update.failed(Some("  ")).message, "Failed to update coupon");
    }

    #[test]
    fn test_catalog_messages() {
        let action = CatalogAction::Delete(CatalogResource::Subcategory);
        assert_eq!(action.succeeded().message, "Sub-category deleted successfully");
        assert_eq!(action.failed(None).message, "Failed to delete sub-category");
    }
}
