//! Catalog source configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Where the menu comes from
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSourceKind {
    /// Embedded sample menu
    #[default]
    Static,
    /// JSON or YAML file at `catalog.path`
    File,
}

/// Catalog configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    #[serde(default)]
    pub source: CatalogSourceKind,

    /// Menu file, required for the `file` source
    pub path: Option<PathBuf>,

    /// Cache lifetime in seconds; 0 disables caching
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl CatalogConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Validate catalog configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.source == CatalogSourceKind::File && self.path.is_none() {
            return Err(ValidationError::MissingRequired("catalog.path"));
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: CatalogSourceKind::default(),
            path: None,
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

fn default_cache_ttl_secs() -> u64 {
    300
}
