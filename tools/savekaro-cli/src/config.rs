//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use savekaro_browse::{CatalogConfig, SearchConfig};
use savekaro_data::ApiConfig;
use serde::{Deserialize, Serialize};

/// File names searched for, in order, from the working directory upward.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["savekaro.toml", ".savekaro.toml", "savekaro.json"];

/// Overrides `api.base_url`.
pub const API_URL_ENV: &str = "SAVEKARO_API_URL";

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// Where signed-in state and guest favorites are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory, relative to the working directory unless absolute.
    pub dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: ".savekaro".to_string(),
        }
    }
}

impl CliConfig {
    /// Load config from a file. `.json` files are JSON, anything else TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content, is_json(path))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str, json: bool) -> Result<Self> {
        if json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }

    /// Save config to a file, in the format its extension implies.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Apply environment overrides.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
    }

    /// Errors that make the config unusable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let url = &self.api.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            errors.push(format!("api.base_url '{}' must start with http:// or https://", url));
        }
        if self.api.timeout_secs == 0 {
            errors.push("api.timeout_secs must be at least 1".to_string());
        }
        errors.extend(self.catalog.validate());
        if self.storage.dir.trim().is_empty() {
            errors.push("storage.dir must not be empty".to_string());
        }
        errors
    }

    /// Read a value by dotted key, rendered as JSON.
    pub fn get(&self, key: &str) -> Result<String> {
        let parts: Vec<&str> = key.split('.').collect();
        let value = match parts.as_slice() {
            ["api", "base_url"] => serde_json::to_string(&self.api.base_url)?,
            ["api", "timeout_secs"] => self.api.timeout_secs.to_string(),
            ["catalog", "page_size"] => self.catalog.page_size.to_string(),
            ["catalog", "batch_size"] => self.catalog.batch_size.to_string(),
            ["search", "debounce_ms"] => self.search.debounce_ms.to_string(),
            ["storage", "dir"] => serde_json::to_string(&self.storage.dir)?,
            _ => anyhow::bail!("Unknown config key: {}", key),
        };
        Ok(value)
    }

    /// Set a value by dotted key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();
        match parts.as_slice() {
            ["api", "base_url"] => self.api.base_url = value.to_string(),
            ["api", "timeout_secs"] => self.api.timeout_secs = value.parse()?,
            ["catalog", "page_size"] => self.catalog.page_size = value.parse()?,
            ["catalog", "batch_size"] => self.catalog.batch_size = value.parse()?,
            ["search", "debounce_ms"] => self.search.debounce_ms = value.parse()?,
            ["storage", "dir"] => self.storage.dir = value.to_string(),
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Contents written by `savekaro config init`.
pub fn generate_default_config() -> String {
    let defaults = CliConfig::default();
    format!(
        r#"# SaveKaro CLI configuration

[api]
base_url = "{base_url}"
timeout_secs = {timeout}

[catalog]
# Products revealed per page
page_size = {page_size}
# Products requested per backend call (max 100)
batch_size = {batch_size}

[search]
debounce_ms = {debounce}

[storage]
dir = "{dir}"
"#,
        base_url = defaults.api.base_url,
        timeout = defaults.api.timeout_secs,
        page_size = defaults.catalog.page_size,
        batch_size = defaults.catalog.batch_size,
        debounce = defaults.search.debounce_ms,
        dir = defaults.storage.dir,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config = CliConfig::parse(&generate_default_config(), false).unwrap();
        assert_eq!(config, CliConfig::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = CliConfig::parse("[catalog]\npage_size = 40\n", false).unwrap();
        assert_eq!(config.catalog.page_size, 40);
        assert_eq!(config.catalog.batch_size, 100);
        assert_eq!(config.api.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_json_config() {
        let config = CliConfig::parse(r#"{"api": {"base_url": "https://api.savekaro.pk"}}"#, true).unwrap();
        assert_eq!(config.api.base_url, "https://api.savekaro.pk");
    }

    #[test]
    fn test_env_override() {
        let mut config = CliConfig::default();
        config.apply_env(|key| (key == API_URL_ENV).then(|| "https://staging.savekaro.pk".to_string()));
        assert_eq!(config.api.base_url, "https://staging.savekaro.pk");

        config.apply_env(|_| Some("  ".to_string()));
        assert_eq!(config.api.base_url, "https://staging.savekaro.pk");
    }

    #[test]
    fn test_get_and_set() {
        let mut config = CliConfig::default();
        config.set("catalog.page_size", "10").unwrap();
        assert_eq!(config.get("catalog.page_size").unwrap(), "10");
        assert_eq!(config.get("api.base_url").unwrap(), "\"http://localhost:8000\"");
        assert!(config.set("catalog.page_size", "ten").is_err());
        assert!(config.get("nope").is_err());
    }

    #[test]
    fn test_validate_catches_bad_values() {
        let mut config = CliConfig::default();
        config.api.base_url = "localhost".to_string();
        config.catalog.batch_size = 0;
        assert_eq!(config.validate().len(), 2);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("savekaro.toml");
        let mut config = CliConfig::default();
        config.search.debounce_ms = 150;
        config.save(&path).unwrap();
        assert_eq!(CliConfig::load(&path).unwrap(), config);
    }
}
