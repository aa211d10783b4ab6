//! CLI configuration.

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

/// Environment variable overriding `api.base_url`.
pub const ENV_API_URL: &str = "SHOPCTL_API_URL";
/// Environment variable overriding `api.token`.
pub const ENV_TOKEN: &str = "SHOPCTL_TOKEN";

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Backend connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Output formatting.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Environment-specific overrides.
    #[serde(default)]
    pub environments: HashMap<String, EnvironmentConfig>,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content).with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Get environment-specific config.
    pub fn for_environment(&self, env: &str) -> Result<CliConfig> {
        let mut config = self.clone();

        match self.environments.get(env) {
            Some(env_config) => {
                if let Some(ref api) = env_config.api {
                    config.api = api.clone();
                }
            }
            None => bail!("Unknown environment '{}'", env),
        }

        Ok(config)
    }

    /// Apply `SHOPCTL_*` overrides from a variable lookup.
    pub fn with_overrides<F>(mut self, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.api.base_url = url;
        }
        if let Some(token) = var(ENV_TOKEN).filter(|v| !v.is_empty()) {
            self.api.token = Some(token);
        }
        self
    }

    /// Check the config for problems.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let check_url = |label: &str, url: &str, problems: &mut Vec<String>| {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                problems.push(format!("{}: base_url must start with http:// or https://", label));
            }
        };

        check_url("api", &self.api.base_url, &mut problems);
        for (name, env) in &self.environments {
            if let Some(api) = &env.api {
                check_url(&format!("environments.{}.api", name), &api.base_url, &mut problems);
            }
        }

        if self.display.date_format.trim().is_empty() {
            problems.push("display: date_format must not be empty".to_string());
        } else if StrftimeItems::new(&self.display.date_format).any(|i| i == Item::Error) {
            problems.push(format!(
                "display: invalid date_format '{}'",
                self.display.date_format
            ));
        }

        problems
    }

    /// Read a value by dot-separated key, e.g. `api.base_url`.
    pub fn get(&self, key: &str) -> Result<String> {
        let value = serde_json::to_value(self)?;
        let mut current = &value;
        for part in key.split('.') {
            current = match current.get(part) {
                Some(v) => v,
                None => bail!("Unknown config key: {}", key),
            };
        }

        Ok(match current {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        })
    }
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL including the API prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token for admin endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8000/api/v1".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
        }
    }
}

/// Output formatting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// chrono format string for coupon dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}

/// Environment-specific configuration overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub api: Option<ApiConfig>,
}

/// Generate a default shopctl.toml config file.
pub fn generate_default_config() -> String {
    r#"# shopctl configuration

[api]
base_url = "http://localhost:8000/api/v1"
# token = "..."

[display]
date_format = "%Y-%m-%d %H:%M"

[environments.staging.api]
base_url = "https://staging.example.com/api/v1"

[environments.production.api]
base_url = "https://shop.example.com/api/v1"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = CliConfig::parse("shopctl.toml", &generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/api/v1");
        assert!(config.validate().is_empty());
        assert_eq!(config.environments.len(), 2);
    }

    #[test]
    fn test_for_environment() {
        let config = CliConfig::parse("shopctl.toml", &generate_default_config()).unwrap();
        let staging = config.for_environment("staging").unwrap();
        assert_eq!(staging.api.base_url, "https://staging.example.com/api/v1");
        assert!(config.for_environment("qa").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let config = CliConfig::default().with_overrides(|key| match key {
            ENV_API_URL => Some("https://api.test/v1".to_string()),
            ENV_TOKEN => Some("tok".to_string()),
            _ => None,
        });
        assert_eq!(config.api.base_url, "https://api.test/v1");
        assert_eq!(config.api.token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_empty_override_ignored() {
        let config = CliConfig::default().with_overrides(|_| Some(String::new()));
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_validate_bad_url() {
        let mut config = CliConfig::default();
        config.api.base_url = "localhost:8000".to_string();
        assert_eq!(config.validate().len(), 1);
    }

    #[test]
    fn test_validate_bad_date_format() {
        let mut config = CliConfig::default();
        config.display.date_format = "%Y-%Q".to_string();
        assert_eq!(config.validate().len(), 1);
    }

    #[test]
    fn test_get_dotted_key() {
        let config = CliConfig::default();
        assert_eq!(config.get("api.base_url").unwrap(), "http://localhost:8000/api/v1");
        assert_eq!(config.get("display.date_format").unwrap(), "%Y-%m-%d %H:%M");
        assert!(config.get("api.nope").is_err());
    }

    #[test]
    fn test_json_config() {
        let config =
            CliConfig::parse("shopctl.json", r#"{"api": {"base_url": "https://x.test"}}"#).unwrap();
        assert_eq!(config.api.base_url, "https://x.test");
        assert!(config.api.token.is_none());
    }
}
