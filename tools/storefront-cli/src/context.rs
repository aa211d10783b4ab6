//! CLI execution context.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_client::{FetchClient, RestCatalog};

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["shopctl.toml", ".shopctl.toml", "shopctl.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration (environment and variable overrides applied).
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// File the configuration was read from, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, env: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => (CliConfig::load(path)?, Some(PathBuf::from(path))),
            None => match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        let config = match env {
            Some(env) => config.for_environment(env)?,
            None => config,
        };
        let config = config.with_overrides(|key| std::env::var(key).ok());

        if let Some(path) = &config_path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some((config, config_path)),
                        Err(e) => tracing::warn!(
                            path = %config_path.display(),
                            error = %e,
                            "skipping unreadable config"
                        ),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// HTTP client for the configured backend.
    pub fn client(&self) -> FetchClient {
        let client = FetchClient::new().with_base_url(self.config.api.base_url.clone());
        match &self.config.api.token {
            Some(token) => client.with_bearer_token(token),
            None => client,
        }
    }

    /// Typed catalog operations against the configured backend.
    pub fn catalog(&self) -> RestCatalog {
        RestCatalog::new(self.client())
    }

    /// Format a timestamp with the configured date format.
    pub fn format_date(&self, date: &chrono::DateTime<chrono::Utc>) -> String {
        let mut out = String::new();
        match write!(out, "{}", date.format(&self.config.display.date_format)) {
            Ok(()) => out,
            Err(_) => date.to_rfc3339(),
        }
    }
}
