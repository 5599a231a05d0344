//! Tunables for listings and search.

use savekaro_catalog::search::DEFAULT_PAGE_SIZE;
use savekaro_data::MAX_BATCH_SIZE;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delay between the last keystroke and the search request.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// `[catalog]` settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Products revealed per page.
    pub page_size: usize,
    /// Products requested per backend call.
    pub batch_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            batch_size: MAX_BATCH_SIZE,
        }
    }
}

impl CatalogConfig {
    /// Problems with the values, if any.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.page_size == 0 {
            problems.push("catalog.page_size must be at least 1".to_string());
        }
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            problems.push(format!("catalog.batch_size must be between 1 and {}", MAX_BATCH_SIZE));
        }
        problems
    }
}

/// `[search]` settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let catalog = CatalogConfig::default();
        assert_eq!(catalog.page_size, 20);
        assert_eq!(catalog.batch_size, 100);
        assert!(catalog.validate().is_empty());
        assert_eq!(SearchConfig::default().debounce(), Duration::from_millis(300));
    }

    #[test]
    fn test_validate_rejects_oversized_batches() {
        let catalog = CatalogConfig {
            page_size: 0,
            batch_size: 500,
        };
        assert_eq!(catalog.validate().len(), 2);
    }
}
