//! Coupon administration.

use anyhow::{anyhow, bail, Context as _, Result};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use dialoguer::Confirm;
use serde::Serialize;
use storefront_client::{FetchError, RestCatalog};
use storefront_core::coupon::{
    Coupon, CouponDraft, CouponEvent, CouponList, CouponStatus, DiscountType,
};
use storefront_core::notice::CouponAction;
use storefront_core::{CommerceError, CouponCode};

use super::{CouponsArgs, CouponsCommand};
use crate::context::Context;
use crate::output::status_badge;

/// Run the coupons command.
pub async fn run(args: CouponsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog();

    match args.command {
        CouponsCommand::List { status } => list(status, &catalog, ctx).await,
        CouponsCommand::Create {
            code,
            discount_type,
            percent,
            amount,
            from,
            until,
            inactive,
        } => {
            let mut draft = CouponDraft::new();
            draft.code = code;
            draft.set_discount_type(discount_type);
            if let Some(value) = discount_value(discount_type, percent, amount)? {
                draft.set_discount(value);
            }
            draft.valid_from = Some(parse_date(&from)?);
            draft.valid_until = Some(parse_date(&until)?);
            draft.is_active = !inactive;
            create(draft, &catalog, ctx).await
        }
        CouponsCommand::Update {
            code,
            discount_type,
            percent,
            amount,
            active,
        } => {
            let edit = CouponEdit {
                discount_type,
                percent,
                amount,
                active,
            };
            update(&CouponCode::new(code), edit, &catalog, ctx).await
        }
        CouponsCommand::Toggle { code } => toggle(&CouponCode::new(code), &catalog, ctx).await,
        CouponsCommand::Delete { code, yes } => {
            delete(&CouponCode::new(code), yes, &catalog, ctx).await
        }
    }
}

/// Turn a failed request into the message shown to the admin.
fn failure(action: CouponAction, err: FetchError) -> anyhow::Error {
    tracing::debug!(error = %err, "coupon request failed");
    anyhow!(action.failed(err.server_message()).message)
}

/// Pick the discount flag that matches the coupon type.
fn discount_value(
    discount_type: DiscountType,
    percent: Option<f64>,
    amount: Option<f64>,
) -> Result<Option<f64>> {
    match (discount_type, percent, amount) {
        (DiscountType::Percentage, percent, None) => Ok(percent),
        (DiscountType::Amount, None, amount) => Ok(amount),
        (DiscountType::Percentage, _, Some(_)) => {
            bail!("--amount only applies to amount coupons (use --type amount)")
        }
        (DiscountType::Amount, Some(_), _) => {
            bail!("--percent only applies to percentage coupons (use --type percentage)")
        }
    }
}

/// Parse an RFC 3339 timestamp or a plain date (midnight UTC).
fn parse_date(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}': expected YYYY-MM-DD or RFC 3339", value))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .with_context(|| format!("Invalid date '{}'", value))?;
    Ok(Utc.from_utc_datetime(&midnight))
}

async fn load(catalog: &RestCatalog, ctx: &Context) -> Result<CouponList> {
    let spinner = ctx.output.spinner("Fetching coupons");
    let result = catalog.coupons().await;
    spinner.finish_and_clear();

    let coupons = result.map_err(|e| failure(CouponAction::Load, e))?;
    tracing::debug!(count = coupons.len(), "coupons loaded");

    let mut list = CouponList::new();
    list.apply(CouponEvent::Loaded(coupons));
    Ok(list)
}

#[derive(Serialize)]
struct CouponRow<'a> {
    #[serde(flatten)]
    coupon: &'a Coupon,
    status: CouponStatus,
}

async fn list(status: Option<CouponStatus>, catalog: &RestCatalog, ctx: &Context) -> Result<()> {
    let list = load(catalog, ctx).await?;
    let now = Utc::now();

    let shown: Vec<&Coupon> = match status {
        Some(status) => list.with_status(status, now),
        None => list.coupons().iter().collect(),
    };

    if ctx.output.is_json() {
        let rows: Vec<CouponRow<'_>> = shown
            .iter()
            .map(|coupon| CouponRow {
                coupon,
                status: coupon.status_at(now),
            })
            .collect();
        ctx.output.json(&rows);
        return Ok(());
    }

    ctx.output.header("Coupons");

    if shown.is_empty() {
        ctx.output.info("No coupons found");
        return Ok(());
    }

    let widths = [14, 12, 17, 17, 8];
    ctx.output.table_row(
        &["CODE", "DISCOUNT", "VALID FROM", "VALID UNTIL", "STATUS"],
        &widths,
    );
    for coupon in &shown {
        let discount = coupon
            .discount()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let badge = status_badge(coupon.status_at(now), widths[4]);
        ctx.output.table_row(
            &[
                coupon.code.as_str(),
                &discount,
                &ctx.format_date(&coupon.valid_from),
                &ctx.format_date(&coupon.valid_until),
                &badge,
            ],
            &widths,
        );
    }

    let counts = list.status_counts(now);
    let summary: Vec<String> = counts
        .iter()
        .map(|(status, count)| format!("{} {}", count, status))
        .collect();
    ctx.output.info("");
    ctx.output.info(&format!("{} coupons ({})", list.len(), summary.join(", ")));

    Ok(())
}

fn print_coupon(coupon: &Coupon, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(coupon);
        return;
    }

    let status = coupon.status();
    ctx.output.kv("Code", coupon.code.as_str());
    if let Some(discount) = coupon.discount() {
        ctx.output.kv("Discount", &discount.to_string());
    }
    ctx.output.kv("Valid from", &ctx.format_date(&coupon.valid_from));
    ctx.output.kv("Valid until", &ctx.format_date(&coupon.valid_until));
    ctx.output.kv("Status", &status_badge(status, 0));
}

async fn create(draft: CouponDraft, catalog: &RestCatalog, ctx: &Context) -> Result<()> {
    let new_coupon = draft.validate()?;

    let spinner = ctx.output.spinner(&format!("Creating {}", new_coupon.code));
    let result = catalog.create_coupon(&new_coupon).await;
    spinner.finish_and_clear();

    let coupon = result.map_err(|e| failure(CouponAction::Create, e))?;
    ctx.output.notice(&CouponAction::Create.succeeded());
    print_coupon(&coupon, ctx);

    Ok(())
}

/// Changes requested by `coupons update`.
struct CouponEdit {
    discount_type: Option<DiscountType>,
    percent: Option<f64>,
    amount: Option<f64>,
    active: Option<bool>,
}

impl CouponEdit {
    fn is_empty(&self) -> bool {
        self.discount_type.is_none()
            && self.percent.is_none()
            && self.amount.is_none()
            && self.active.is_none()
    }

    fn apply_to(&self, draft: &mut CouponDraft) -> Result<()> {
        if let Some(discount_type) = self.discount_type {
            draft.set_discount_type(discount_type);
        }
        if let Some(value) = discount_value(draft.discount_type(), self.percent, self.amount)? {
            draft.set_discount(value);
        }
        if let Some(active) = self.active {
            draft.is_active = active;
        }
        Ok(())
    }
}

async fn update(
    code: &CouponCode,
    edit: CouponEdit,
    catalog: &RestCatalog,
    ctx: &Context,
) -> Result<()> {
    if edit.is_empty() {
        bail!("Nothing to update: pass --type, --percent, --amount or --active");
    }

    let mut list = load(catalog, ctx).await?;
    list.begin_edit(code)?;

    let mut draft = match list.get(code) {
        Some(coupon) => CouponDraft::from_coupon(coupon),
        None => return Err(CommerceError::CouponNotFound(code.to_string()).into()),
    };
    edit.apply_to(&mut draft)?;
    let changes = draft.validate_update()?;

    let spinner = ctx.output.spinner(&format!("Updating {}", code));
    let result = catalog.update_coupon(code, &changes).await;
    spinner.finish_and_clear();

    let coupon = result.map_err(|e| failure(CouponAction::Update, e))?;
    list.apply(CouponEvent::Updated(coupon.clone()));
    ctx.output.notice(&CouponAction::Update.succeeded());
    print_coupon(&coupon, ctx);

    Ok(())
}

async fn toggle(code: &CouponCode, catalog: &RestCatalog, ctx: &Context) -> Result<()> {
    let mut list = load(catalog, ctx).await?;

    let is_active = match list.get(code) {
        Some(coupon) => coupon.is_active,
        None => return Err(CommerceError::CouponNotFound(code.to_string()).into()),
    };
    if !list.can_toggle(code) {
        bail!("Coupon {} is being edited", code);
    }

    let spinner = ctx.output.spinner(&format!("Updating status of {}", code));
    let result = catalog.set_coupon_active(code, !is_active).await;
    spinner.finish_and_clear();

    let coupon = result.map_err(|e| failure(CouponAction::ToggleStatus, e))?;
    list.apply(CouponEvent::StatusToggled {
        code: code.clone(),
        is_active: coupon.is_active,
    });
    ctx.output.notice(&CouponAction::ToggleStatus.succeeded());

    if let Some(coupon) = list.get(code) {
        print_coupon(coupon, ctx);
    }

    Ok(())
}

async fn delete(code: &CouponCode, yes: bool, catalog: &RestCatalog, ctx: &Context) -> Result<()> {
    let mut list = load(catalog, ctx).await?;

    if list.get(code).is_none() {
        return Err(CommerceError::CouponNotFound(code.to_string()).into());
    }
    if !list.can_delete(code) {
        bail!("Coupon {} is being edited", code);
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete coupon {}?", code))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Delete cancelled");
            return Ok(());
        }
    }

    let result = catalog.delete_coupon(code).await;
    let message = result.map_err(|e| failure(CouponAction::Delete, e))?;
    list.apply(CouponEvent::Deleted(code.clone()));

    ctx.output.notice(&CouponAction::Delete.succeeded());
    if let Some(message) = message {
        ctx.output.debug(&format!("server: {}", message));
    }
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "deleted": code, "remaining": list.len() }));
    }

    Ok(())
}
