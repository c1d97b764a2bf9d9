//! Time-to-live cache over any catalog source.

use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::catalog::CatalogRow;
use crate::ports::{CatalogSource, CatalogSourceError};

#[derive(Debug, Clone)]
struct CacheEntry {
    rows: Vec<CatalogRow>,
    fetched_at: Instant,
}

/// Caches the rows of an upstream source for `ttl`.
///
/// After expiry the upstream is asked again. If it fails, the last good rows
/// are served with a warning; the error only surfaces when nothing was ever
/// cached. A zero TTL disables caching.
#[derive(Debug)]
pub struct CachedCatalogSource<S> {
    inner: S,
    ttl: Duration,
    cache: RwLock<Option<CacheEntry>>,
}

impl<S: CatalogSource> CachedCatalogSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cache: RwLock::new(None),
        }
    }

    /// Drop the cached rows so the next fetch goes upstream.
    pub async fn invalidate(&self) {
        *self.cache.write().await = None;
    }

    async fn fresh_rows(&self) -> Option<Vec<CatalogRow>> {
        let cache = self.cache.read().await;
        cache
            .as_ref()
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.rows.clone())
    }
}

#[async_trait]
impl<S: CatalogSource> CatalogSource for CachedCatalogSource<S> {
    async fn fetch_rows(&self) -> Result<Vec<CatalogRow>, CatalogSourceError> {
        if self.ttl.is_zero() {
            return self.inner.fetch_rows().await;
        }

        if let Some(rows) = self.fresh_rows().await {
            debug!(rows = rows.len(), "Serving catalog from cache");
            return Ok(rows);
        }

        match self.inner.fetch_rows().await {
            Ok(rows) => {
                *self.cache.write().await = Some(CacheEntry {
                    rows: rows.clone(),
                    fetched_at: Instant::now(),
                });
                Ok(rows)
            }
            Err(err) => match self.cache.read().await.as_ref() {
                Some(stale) => {
                    warn!(error = %err, "Catalog refresh failed, serving stale rows");
                    Ok(stale.rows.clone())
                }
                None => Err(err),
            },
        }
    }
}
