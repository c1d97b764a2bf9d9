//! Catalog loading - Builds the index the flow handler is given.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::catalog::CatalogIndex;
use crate::ports::CatalogSource;

/// Fetches rows from `source` and indexes them.
///
/// Returns `None` when the source fails or yields no usable item; the chat
/// then runs in its "coming soon" mode instead of failing.
pub async fn load_catalog(source: &dyn CatalogSource) -> Option<Arc<CatalogIndex>> {
    let rows = match source.fetch_rows().await {
        Ok(rows) => rows,
        Err(e) => {
            warn!(error = %e, "Catalog unavailable");
            return None;
        }
    };

    let fetched = rows.len();
    let index = CatalogIndex::from_rows(rows);
    if index.is_empty() {
        warn!(rows = fetched, "Catalog has no usable items");
        return None;
    }

    info!(items = index.len(), dropped = fetched - index.len(), "Catalog loaded");
    Some(Arc::new(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FileCatalogSource, StaticCatalogSource};
    use crate::domain::catalog::CatalogRow;

    #[tokio::test]
    async fn loads_the_sample_menu() {
        let index = load_catalog(&StaticCatalogSource::new()).await.unwrap();
        assert!(index.len() > 20);
    }

    #[tokio::test]
    async fn malformed_rows_are_dropped() {
        let good = CatalogRow {
            id: Some("margherita".into()),
            name: Some("Margherita".into()),
            price: Some("€ 6,00".into()),
            category: Some("classica".into()),
            ..CatalogRow::default()
        };
        let missing_price = CatalogRow {
            price: None,
            id: Some("marinara".into()),
            ..good.clone()
        };
        let source = StaticCatalogSource::with_rows(vec![good, missing_price]);

        let index = load_catalog(&source).await.unwrap();

        assert_eq!(index.len(), 1);
        assert!(index.get_by_id("marinara").is_none());
    }

    #[tokio::test]
    async fn failing_source_yields_none() {
        let source = FileCatalogSource::new("/definitely/not/here/menu.json");
        assert!(load_catalog(&source).await.is_none());
    }

    #[tokio::test]
    async fn empty_source_yields_none() {
        let source = StaticCatalogSource::with_rows(Vec::new());
        assert!(load_catalog(&source).await.is_none());
    }
}
