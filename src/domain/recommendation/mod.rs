//! Recommendation rules.
//!
//! Pure functions over the catalog: relevance ranking for the pizza list,
//! companion pairing, and item similarity. Nothing here holds state.

mod companions;
mod ranking;
mod similarity;

pub use companions::{companions_for, preferred_tags, COMPANION_LIMIT};
pub use ranking::{rank_by_relevance, relevance_score, DISPLAY_LIMIT};
pub use similarity::{similar_items, similarity_of};
