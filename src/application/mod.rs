//! Application layer - Orchestration of the domain over the ports.
//!
//! - `ChatWidget` - Runs one conversation against a presentation surface
//! - `load_catalog` - Fetches and indexes the menu once at startup

mod catalog_loader;
mod chat_widget;

pub use catalog_loader::load_catalog;
pub use chat_widget::ChatWidget;
