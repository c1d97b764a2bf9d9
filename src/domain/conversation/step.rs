//! Conversation step machine.
//!
//! Defines the named states of the menu chat and the legal moves between them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// A named state in the menu conversation.
///
/// The chat normally moves through:
/// - `Greeting` → `TagRefinement` (large categories) → `PizzaSelection`
///   → `CompanionSelection` → `OrderSummary`
///
/// The gluten-free category takes a detour through `GlutenFreeEcosystem`.
/// `OrderSummary` is terminal; only a restart (a full state reset) leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversationStep {
    /// Welcome message with the category buttons.
    #[default]
    Greeting,

    /// Category buttons shown again on request.
    CategorySelection,

    /// Optional tag pick to sharpen the pizza list.
    TagRefinement,

    /// Ranked pizza cards, waiting for an item id.
    PizzaSelection,

    /// Companion kinds and lists for the chosen pizza.
    CompanionSelection,

    /// Combined gluten-free flow over pizzas and companion subsets.
    GlutenFreeEcosystem,

    /// Recap of the choices.
    OrderSummary,
}

impl StateMachine for ConversationStep {
    fn valid_transitions(&self) -> Vec<Self> {
        use ConversationStep::*;
        match self {
            Greeting => vec![CategorySelection, TagRefinement, PizzaSelection, GlutenFreeEcosystem],
            CategorySelection => vec![TagRefinement, PizzaSelection, GlutenFreeEcosystem],
            TagRefinement => vec![PizzaSelection, CategorySelection],
            PizzaSelection => vec![CompanionSelection, CategorySelection],
            CompanionSelection => vec![OrderSummary, CategorySelection, PizzaSelection],
            GlutenFreeEcosystem => vec![PizzaSelection, CompanionSelection, CategorySelection],
            OrderSummary => vec![],
        }
    }
}
