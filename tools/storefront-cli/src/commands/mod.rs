//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod coupons;
pub mod route;

use clap::{Args, Subcommand};
use storefront_core::catalog::CatalogResource;
use storefront_core::coupon::{CouponStatus, DiscountType};

/// Arguments for the route command.
#[derive(Args)]
pub struct RouteArgs {
    #[command(subcommand)]
    pub command: RouteCommand,
}

#[derive(Subcommand)]
pub enum RouteCommand {
    /// Classify a storefront path without contacting the backend.
    Classify {
        /// Path, e.g. /shop/category/64f1
        path: String,
    },

    /// Resolve titles for one or more paths, navigating to each in turn.
    Resolve {
        /// Paths to visit in order.
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

/// Arguments for the coupons command.
#[derive(Args)]
pub struct CouponsArgs {
    #[command(subcommand)]
    pub command: CouponsCommand,
}

#[derive(Subcommand)]
pub enum CouponsCommand {
    /// List coupons with their current status.
    List {
        /// Only show coupons with this status.
        #[arg(short, long, value_parser = parse_status)]
        status: Option<CouponStatus>,
    },

    /// Create a coupon.
    Create {
        /// Coupon code (stored upper-case).
        #[arg(long)]
        code: String,

        /// Discount type: percentage or amount.
        #[arg(short = 't', long = "type", value_parser = parse_discount_type, default_value = "percentage")]
        discount_type: DiscountType,

        /// Percentage off (0-100).
        #[arg(long, conflicts_with = "amount")]
        percent: Option<f64>,

        /// Fixed amount off.
        #[arg(long)]
        amount: Option<f64>,

        /// Start of the validity window (RFC 3339 or YYYY-MM-DD).
        #[arg(long)]
        from: String,

        /// End of the validity window (RFC 3339 or YYYY-MM-DD).
        #[arg(long)]
        until: String,

        /// Create the coupon deactivated.
        #[arg(long)]
        inactive: bool,
    },

    /// Edit a coupon's discount or activation.
    Update {
        /// Coupon code.
        code: String,

        /// New discount type. Clears the previous type's value.
        #[arg(short = 't', long = "type", value_parser = parse_discount_type)]
        discount_type: Option<DiscountType>,

        /// New percentage off.
        #[arg(long, conflicts_with = "amount")]
        percent: Option<f64>,

        /// New fixed amount off.
        #[arg(long)]
        amount: Option<f64>,

        /// Set activation.
        #[arg(long)]
        active: Option<bool>,
    },

    /// Flip a coupon between active and inactive.
    Toggle {
        /// Coupon code.
        code: String,
    },

    /// Delete a coupon.
    Delete {
        /// Coupon code.
        code: String,

        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List entities of a resource.
    List {
        /// category, subcategory, brand or banner.
        #[arg(value_parser = parse_resource)]
        resource: CatalogResource,

        /// Only sub-categories of this category id.
        #[arg(long)]
        parent: Option<String>,
    },

    /// Show one entity.
    Show {
        #[arg(value_parser = parse_resource)]
        resource: CatalogResource,
        id: String,
    },

    /// Delete one entity.
    Delete {
        #[arg(value_parser = parse_resource)]
        resource: CatalogResource,
        id: String,

        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Preview the slug generated for a title.
    Slug {
        /// Title words.
        #[arg(required = true)]
        title: Vec<String>,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,

    /// Get a config value by dotted key, e.g. api.base_url.
    Get {
        key: String,
    },

    /// Write a default shopctl.toml in the current directory.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },

    /// Check the configuration for problems.
    Validate,
}

fn parse_status(s: &str) -> Result<CouponStatus, String> {
    CouponStatus::from_str(s)
        .ok_or_else(|| format!("expected active, pending, expired or inactive, got '{}'", s))
}

fn parse_discount_type(s: &str) -> Result<DiscountType, String> {
    DiscountType::from_str(s).ok_or_else(|| format!("expected percentage or amount, got '{}'", s))
}

fn parse_resource(s: &str) -> Result<CatalogResource, String> {
    CatalogResource::from_str(s).ok_or_else(|| format!("unknown resource '{}'", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_parsers() {
        assert_eq!(parse_status("expired"), Ok(CouponStatus::Expired));
        assert!(parse_status("gone").is_err());
        assert_eq!(parse_discount_type("amount"), Ok(DiscountType::Amount));
        assert!(parse_resource("widgets").is_err());
    }
}
