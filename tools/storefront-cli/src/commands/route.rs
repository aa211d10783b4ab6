//! Storefront route classification and title resolution.

use anyhow::Result;
use serde::Serialize;
use storefront_client::TitleResolver;
use storefront_core::route::{RouteContext, RouteState, TitlePhase, TitleSource};

use super::{RouteArgs, RouteCommand};
use crate::context::Context;

/// Run the route command.
pub async fn run(args: RouteArgs, ctx: &Context) -> Result<()> {
    match args.command {
        RouteCommand::Classify { path } => classify(&path, ctx),
        RouteCommand::Resolve { paths } => resolve(&paths, ctx).await,
    }
}

#[derive(Serialize)]
struct Classification<'a> {
    path: &'a str,
    kind: &'static str,
    segments: &'a [String],
    last_segment: Option<&'a str>,
    icon: &'static str,
    title: String,
    lookup: Option<String>,
}

fn describe(context: &RouteContext) -> Classification<'_> {
    let (title, lookup) = match context.title_source() {
        TitleSource::Empty => (String::new(), None),
        TitleSource::Static(label) => (label.to_string(), None),
        TitleSource::Lookup { resource, id } => (
            context.fallback_title(),
            Some(resource.item_path(id.as_str())),
        ),
    };

    Classification {
        path: &context.path,
        kind: context.kind.as_str(),
        segments: &context.segments,
        last_segment: context.last_segment(),
        icon: context.kind.icon(),
        title,
        lookup,
    }
}

fn classify(path: &str, ctx: &Context) -> Result<()> {
    let context = RouteContext::from_path(path);
    let info = describe(&context);

    if ctx.output.is_json() {
        ctx.output.json(&info);
        return Ok(());
    }

    ctx.output.header(&format!("Route {}", info.path));
    ctx.output.kv("Kind", info.kind);
    ctx.output.kv("Segments", &info.segments.join(" / "));
    ctx.output.kv("Last segment", info.last_segment.unwrap_or("-"));
    ctx.output.kv("Icon", info.icon);
    ctx.output.kv("Description", &context.kind.description(&info.title));
    match &info.lookup {
        Some(lookup) => ctx.output.kv("Title lookup", &format!("GET {}", lookup)),
        None => ctx.output.kv("Title lookup", "none"),
    }

    Ok(())
}

fn phase_label(state: &RouteState) -> &'static str {
    match state.phase {
        TitlePhase::Idle => "no title",
        TitlePhase::Loading => "loading",
        TitlePhase::Resolved => "resolved",
        TitlePhase::Fallback => "fallback",
    }
}

async fn resolve(paths: &[String], ctx: &Context) -> Result<()> {
    let resolver = TitleResolver::new(ctx.catalog());
    let mut states = Vec::with_capacity(paths.len());

    for path in paths {
        let (state, ticket) = resolver.begin(path);
        let state = match ticket {
            Some(ticket) => {
                let spinner = ctx
                    .output
                    .spinner(&format!("Looking up {} {}", ticket.resource, ticket.id));
                let state = resolver.finish(&ticket).await;
                spinner.finish_and_clear();
                state
            }
            None => state,
        };

        if state.used_fallback() {
            ctx.output
                .warn(&format!("{}: lookup failed, showing fallback title", state.context.path));
        }

        if !ctx.output.is_json() {
            ctx.output.header(&state.context.path);
            ctx.output.kv("Kind", state.context.kind.as_str());
            ctx.output.kv("Display name", &state.display_name());
            ctx.output.kv("Description", &state.description());
            ctx.output.kv("Title", phase_label(&state));
        }

        states.push(state);
    }

    if ctx.output.is_json() {
        ctx.output.json(&states);
    }

    Ok(())
}
