//! Catalog entity administration.

use anyhow::{anyhow, bail, Result};
use dialoguer::Confirm;
use serde::Serialize;
use storefront_client::FetchError;
use storefront_core::catalog::{slugify, CatalogEntity, CatalogResource};
use storefront_core::notice::CatalogAction;
use storefront_core::EntityId;

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CatalogCommand::List { resource, parent } => {
            list(entity_resource(resource)?, parent.map(EntityId::new), ctx).await
        }
        CatalogCommand::Show { resource, id } => show(entity_resource(resource)?, &id, ctx).await,
        CatalogCommand::Delete { resource, id, yes } => {
            delete(entity_resource(resource)?, &id, yes, ctx).await
        }
        CatalogCommand::Slug { title } => {
            slug(&title.join(" "), ctx);
            Ok(())
        }
    }
}

/// Coupons have their own command and shape.
fn entity_resource(resource: CatalogResource) -> Result<CatalogResource> {
    if resource == CatalogResource::Coupon {
        bail!("Coupons are managed with `shopctl coupons`");
    }
    Ok(resource)
}

fn failure(action: CatalogAction, err: FetchError) -> anyhow::Error {
    tracing::debug!(error = %err, "catalog request failed");
    anyhow!(action.failed(err.server_message()).message)
}

async fn list(resource: CatalogResource, parent: Option<EntityId>, ctx: &Context) -> Result<()> {
    let action = CatalogAction::Load(resource);

    let spinner = ctx
        .output
        .spinner(&format!("Fetching {}", resource.label().to_lowercase()));
    let result = ctx.catalog().list(resource).await;
    spinner.finish_and_clear();

    let mut entities = result.map_err(|e| failure(action, e))?;
    if let Some(parent) = &parent {
        entities.retain(|e| e.is_subcategory_of(parent));
    }

    if ctx.output.is_json() {
        ctx.output.json(&entities);
        return Ok(());
    }

    ctx.output.header(resource.label());

    if entities.is_empty() {
        ctx.output.info(&format!("No {} found", resource.label().to_lowercase()));
        return Ok(());
    }

    let widths = [26, 32, 32];
    ctx.output.table_row(&["ID", "TITLE", "SLUG"], &widths);
    for entity in &entities {
        ctx.output.table_row(
            &[
                entity.id.as_str(),
                &truncate(&entity.title, widths[1]),
                &truncate(&entity.slug_or_preview(), widths[2]),
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.info(&format!("{} total", entities.len()));

    Ok(())
}

fn print_entity(resource: CatalogResource, entity: &CatalogEntity, ctx: &Context) {
    ctx.output.header(&format!("{} {}", resource, entity.id));
    ctx.output.kv("Title", &entity.title);
    ctx.output.kv("Slug", &entity.slug_or_preview());
    if let Some(description) = &entity.description {
        ctx.output.kv("Description", description);
    }
    if let Some(image) = &entity.image {
        ctx.output.kv("Image", image);
    }
    if let Some(category) = &entity.category {
        ctx.output.kv("Category", category.as_str());
    }
}

async fn show(resource: CatalogResource, id: &str, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner(&format!("Fetching {} {}", resource, id));
    let result = ctx.catalog().entity(resource, id).await;
    spinner.finish_and_clear();

    let entity = result.map_err(|e| failure(CatalogAction::Load(resource), e))?;

    if ctx.output.is_json() {
        ctx.output.json(&entity);
    } else {
        print_entity(resource, &entity, ctx);
    }

    Ok(())
}

async fn delete(resource: CatalogResource, id: &str, yes: bool, ctx: &Context) -> Result<()> {
    let action = CatalogAction::Delete(resource);

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {} {}?", resource, id))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Delete cancelled");
            return Ok(());
        }
    }

    let message = ctx
        .catalog()
        .delete(resource, id)
        .await
        .map_err(|e| failure(action, e))?;

    ctx.output.notice(&action.succeeded());
    if let Some(message) = message {
        ctx.output.debug(&format!("server: {}", message));
    }
    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "resource": resource, "deleted": id }));
    }

    Ok(())
}

#[derive(Serialize)]
struct SlugPreview<'a> {
    title: &'a str,
    slug: String,
}

fn slug(title: &str, ctx: &Context) {
    let preview = SlugPreview {
        title,
        slug: slugify(title),
    };

    if ctx.output.is_json() {
        ctx.output.json(&preview);
    } else {
        ctx.output.kv("Slug", &preview.slug);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coupon_resource_rejected() {
        assert!(entity_resource(CatalogResource::Coupon).is_err());
        assert_eq!(
            entity_resource(CatalogResource::Banner).unwrap(),
            CatalogResource::Banner
        );
    }
}
