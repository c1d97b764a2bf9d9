//! Catalog Adapters
//!
//! Implementations of the CatalogSource port.
//!
//! ## Available Adapters
//!
//! - **StaticCatalogSource** - Embedded sample menu
//! - **FileCatalogSource** - Rows from a JSON or YAML file
//! - **CachedCatalogSource** - TTL cache decorating any other source
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::catalog::{CachedCatalogSource, FileCatalogSource};
//!
//! let source = CachedCatalogSource::new(
//!     FileCatalogSource::new("./data/menu.yaml"),
//!     Duration::from_secs(300),
//! );
//! let index = CatalogIndex::from_rows(source.fetch_rows().await?);
//! ```

mod cached_source;
mod file_source;
mod static_source;

pub use cached_source::CachedCatalogSource;
pub use file_source::FileCatalogSource;
pub use static_source::StaticCatalogSource;
