//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

/// Hide all but the last four characters of a token.
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

/// The config with its token masked, for display.
fn redacted(config: &CliConfig) -> CliConfig {
    let mut config = config.clone();
    config.api.token = config.api.token.as_deref().map(mask_token);
    for env in config.environments.values_mut() {
        if let Some(api) = env.api.as_mut() {
            api.token = api.token.as_deref().map(mask_token);
        }
    }
    config
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = redacted(&ctx.config);

    if ctx.output.is_json() {
        ctx.output.json(&config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &config.api.base_url);
    ctx.output
        .kv("token", config.api.token.as_deref().unwrap_or("(none)"));

    ctx.output.info("");
    ctx.output.info("[display]");
    ctx.output.kv("date_format", &config.display.date_format);

    if !config.environments.is_empty() {
        ctx.output.info("");
        ctx.output.info("Environments:");
        let mut names: Vec<&String> = config.environments.keys().collect();
        names.sort();
        for name in names {
            ctx.output.list_item(name);
        }
    }

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = if key == "api.token" {
        ctx.config.api.token.as_deref().map(mask_token).unwrap_or_default()
    } else {
        ctx.config.get(key)?
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let problems = ctx.config.validate();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "valid": problems.is_empty(),
            "errors": problems,
        }));
    } else {
        for problem in &problems {
            ctx.output.error(problem);
        }
    }

    if !problems.is_empty() {
        bail!("Configuration has {} error(s)", problems.len());
    }

    ctx.output.success("Configuration is valid");
    Ok(())
}
