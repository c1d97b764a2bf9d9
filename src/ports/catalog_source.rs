//! Catalog Source Port - Interface for loading raw menu rows.
//!
//! Sources return spreadsheet-shaped rows; normalisation into menu items
//! happens in [`CatalogIndex::from_rows`](crate::domain::catalog::CatalogIndex::from_rows).

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::catalog::CatalogRow;

/// Errors that can occur while fetching catalog rows
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogSourceError {
    #[error("Catalog not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),
}

/// Port for fetching the menu.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every row of the menu.
    ///
    /// # Errors
    /// Returns `CatalogSourceError` when the upstream cannot be read at all.
    /// Individual malformed rows are not an error here.
    async fn fetch_rows(&self) -> Result<Vec<CatalogRow>, CatalogSourceError>;
}

#[async_trait]
impl<T: CatalogSource + ?Sized> CatalogSource for Arc<T> {
    async fn fetch_rows(&self) -> Result<Vec<CatalogRow>, CatalogSourceError> {
        (**self).fetch_rows().await
    }
}
