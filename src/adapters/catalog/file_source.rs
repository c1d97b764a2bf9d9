//! File-based Catalog Source Adapter
//!
//! Reads catalog rows from a JSON or YAML file holding a list of rows in the
//! spreadsheet layout. The format is chosen by file extension.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::domain::catalog::CatalogRow;
use crate::ports::{CatalogSource, CatalogSourceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    fn from_path(path: &Path) -> Result<Self, CatalogSourceError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(CatalogSourceError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Catalog rows stored in a file
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    /// Create a source reading `path`
    ///
    /// # Example
    /// ```ignore
    /// let source = FileCatalogSource::new("./data/menu.yaml");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch_rows(&self) -> Result<Vec<CatalogRow>, CatalogSourceError> {
        let format = FileFormat::from_path(&self.path)?;

        if !self.path.exists() {
            return Err(CatalogSourceError::NotFound(self.path.display().to_string()));
        }

        let raw = fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogSourceError::Io(e.to_string()))?;

        let rows: Vec<CatalogRow> = match format {
            FileFormat::Json => {
                serde_json::from_str(&raw).map_err(|e| CatalogSourceError::Parse(e.to_string()))?
            }
            FileFormat::Yaml => {
                serde_yaml::from_str(&raw).map_err(|e| CatalogSourceError::Parse(e.to_string()))?
            }
        };

        debug!(path = %self.path.display(), rows = rows.len(), "Read catalog file");
        Ok(rows)
    }
}
