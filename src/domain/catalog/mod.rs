//! Catalog domain module.
//!
//! Menu items, the closed category sets and the read-only index the
//! conversation and the recommendation rules query.

mod category;
mod index;
mod menu_item;
mod row;

pub use category::{Category, CompanionKind, GLUTEN_FREE_SLUG};
pub use index::{CatalogIndex, REFINEMENT_TAG_LIMIT, SIGNAL_TAGS};
pub use menu_item::{format_price_cents, parse_price_cents, MenuItem, MenuItemBuilder};
pub use row::CatalogRow;
