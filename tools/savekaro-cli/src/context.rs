//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use savekaro_auth::AuthSession;
use savekaro_data::{ApiClient, AuthApi, ProductsApi};
use savekaro_store::ClientStorage;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    pub config: CliConfig,
    /// File the config came from, if any.
    pub config_path: Option<PathBuf>,
    pub output: Output,
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from an explicit config file or the nearest one found
    /// walking up from the working directory.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match Self::find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            },
        };
        config.apply_env(|key| std::env::var(key).ok());

        if let Some(path) = &config_path {
            tracing::debug!(path = %path.display(), "Loaded config");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find a config file in the directory tree.
    pub fn find_config(start: &Path) -> Option<(PathBuf, CliConfig)> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_FILE_NAMES {
                let path = current.join(name);
                if path.exists() {
                    match CliConfig::load(&path) {
                        Ok(config) => return Some((path, config)),
                        Err(e) => tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable config"),
                    }
                }
            }

            if !current.pop() {
                return None;
            }
        }
    }

    pub fn api_client(&self) -> Result<ApiClient> {
        ApiClient::from_config(&self.config.api)
            .with_context(|| format!("Failed to create API client for {}", self.config.api.base_url))
    }

    pub fn products_api(&self) -> Result<Arc<ProductsApi>> {
        Ok(Arc::new(ProductsApi::new(self.api_client()?)))
    }

    pub fn auth_api(&self) -> Result<AuthApi> {
        Ok(AuthApi::new(self.api_client()?))
    }

    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.dir)
    }

    pub fn storage(&self) -> Result<ClientStorage> {
        let dir = self.storage_dir();
        ClientStorage::open_dir(&dir).with_context(|| format!("Failed to open storage in {}", dir.display()))
    }

    /// The persisted shopper session.
    pub fn session(&self) -> Result<AuthSession> {
        Ok(AuthSession::restore(self.storage()?)?)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = PathBuf::from(path);
        if path.is_absolute() {
            path
        } else {
            self.cwd.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_upward() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join("savekaro.toml"), "[catalog]\npage_size = 8\n").unwrap();

        let (path, config) = Context::find_config(&nested).unwrap();
        assert_eq!(path, root.path().join("savekaro.toml"));
        assert_eq!(config.catalog.page_size, 8);
    }

    #[test]
    fn test_nearest_config_wins() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("shop");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join("savekaro.toml"), "[catalog]\npage_size = 8\n").unwrap();
        std::fs::write(nested.join("savekaro.json"), r#"{"catalog": {"page_size": 12}}"#).unwrap();

        let (_, config) = Context::find_config(&nested).unwrap();
        assert_eq!(config.catalog.page_size, 12);
    }
}
