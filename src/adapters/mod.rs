//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `catalog` - Menu sources (embedded, file, cached)
//! - `presentation` - Chat surfaces (recording, console)

pub mod catalog;
pub mod presentation;

pub use catalog::{CachedCatalogSource, FileCatalogSource, StaticCatalogSource};
pub use presentation::{ConsolePresenter, PresenterEvent, RecordingMenuFilter, RecordingPresenter};
