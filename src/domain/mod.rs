//! Domain layer containing the menu chat's business logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, state machine, timestamps)
//! - `catalog` - Menu items, categories and the indexed catalog
//! - `recommendation` - Pure ranking, pairing and similarity services
//! - `conversation` - Conversation state, steps and the flow handler

pub mod catalog;
pub mod conversation;
pub mod foundation;
pub mod recommendation;
