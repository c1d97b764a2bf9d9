//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PresentationAdapter` - The chat surface the conversation is rendered on
//! - `MenuFilter` - The main menu page, filtered on the guest's behalf
//! - `CatalogSource` - Where raw menu rows come from

mod catalog_source;
mod presentation;

pub use catalog_source::{CatalogSource, CatalogSourceError};
pub use presentation::{CardHandle, MenuFilter, PresentationAdapter, PresentationError};
