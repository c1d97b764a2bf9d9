//! Conversation state.
//!
//! Everything the chat remembers between two clicks: the current step, the
//! guest's selections and a bounded message history. Only the flow handler
//! mutates it; every mutator validates its input and reports a recoverable
//! `ValidationError` instead of silently ignoring bad data.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::message::Message;
use super::option::ChatOption;
use super::step::ConversationStep;
use crate::domain::catalog::{Category, MenuItem};
use crate::domain::foundation::{ConversationId, StateMachine, ValidationError};

/// Default number of messages kept in the history.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Mutable state of one conversation.
///
/// # Invariants
///
/// - `selected_companions` never holds two items with the same id
/// - `selected_tags` never holds the same tag twice
/// - `history.len() <= history_limit`, oldest messages evicted first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    id: ConversationId,
    current_step: ConversationStep,
    selected_category: Option<Category>,
    selected_tags: Vec<String>,
    selected_item: Option<MenuItem>,
    selected_companions: Vec<MenuItem>,
    history: VecDeque<Message>,
    history_limit: usize,
    /// Options currently on screen; used to echo the label of a click.
    #[serde(skip)]
    offered_options: Vec<ChatOption>,
}

impl ConversationState {
    /// Creates a fresh conversation at the greeting step.
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Creates a fresh conversation keeping at most `limit` messages.
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            id: ConversationId::new(),
            current_step: ConversationStep::default(),
            selected_category: None,
            selected_tags: Vec::new(),
            selected_item: None,
            selected_companions: Vec::new(),
            history: VecDeque::new(),
            history_limit: limit.max(1),
            offered_options: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    pub fn current_step(&self) -> ConversationStep {
        self.current_step
    }

    pub fn selected_category(&self) -> Option<Category> {
        self.selected_category
    }

    pub fn selected_tags(&self) -> &[String] {
        &self.selected_tags
    }

    pub fn selected_item(&self) -> Option<&MenuItem> {
        self.selected_item.as_ref()
    }

    pub fn selected_companions(&self) -> &[MenuItem] {
        &self.selected_companions
    }

    pub fn history(&self) -> impl ExactSizeIterator<Item = &Message> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    pub fn offered_options(&self) -> &[ChatOption] {
        &self.offered_options
    }

    /// Label of the on-screen option carrying `value`, if any.
    pub fn option_label(&self, value: &str) -> Option<&str> {
        self.offered_options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.text.as_str())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutators
    // ─────────────────────────────────────────────────────────────────────────

    /// Moves to `step`, staying put is always allowed.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` when the step machine forbids the move
    pub fn set_current_step(&mut self, step: ConversationStep) -> Result<(), ValidationError> {
        if step != self.current_step {
            self.current_step = self.current_step.transition_to(step)?;
        }
        Ok(())
    }

    /// Selects a category by slug.
    ///
    /// # Errors
    ///
    /// - `UnknownValue` for slugs outside the closed category set
    pub fn set_selected_category(&mut self, slug: &str) -> Result<Category, ValidationError> {
        let category: Category = slug.parse()?;
        self.selected_category = Some(category);
        Ok(category)
    }

    /// Adds a refinement tag. Returns false if it was already selected.
    ///
    /// # Errors
    ///
    /// - `EmptyField` for a blank tag
    pub fn add_selected_tag(&mut self, tag: &str) -> Result<bool, ValidationError> {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() {
            return Err(ValidationError::empty_field("tag"));
        }
        if self.selected_tags.contains(&tag) {
            return Ok(false);
        }
        self.selected_tags.push(tag);
        Ok(true)
    }

    /// Selects the pizza.
    ///
    /// # Errors
    ///
    /// - any `ValidationError` reported by [`MenuItem::validate`]
    pub fn set_selected_item(&mut self, item: MenuItem) -> Result<(), ValidationError> {
        item.validate()?;
        self.selected_item = Some(item);
        Ok(())
    }

    /// Adds a companion. Returns false if an item with that id is already in.
    ///
    /// # Errors
    ///
    /// - any `ValidationError` reported by [`MenuItem::validate`]
    pub fn add_selected_companion(&mut self, item: MenuItem) -> Result<bool, ValidationError> {
        item.validate()?;
        if self.selected_companions.iter().any(|c| c.id() == item.id()) {
            return Ok(false);
        }
        self.selected_companions.push(item);
        Ok(true)
    }

    /// Appends a message, evicting the oldest once the limit is reached.
    pub fn push_message(&mut self, message: Message) {
        while self.history.len() >= self.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(message);
    }

    pub fn set_offered_options(&mut self, options: Vec<ChatOption>) {
        self.offered_options = options;
    }

    /// Drops the category and everything picked under it; keeps step and history.
    pub fn clear_selections(&mut self) {
        self.selected_category = None;
        self.selected_tags.clear();
        self.selected_item = None;
        self.selected_companions.clear();
    }

    /// Restores every field to its initial value, keeping identity and limit.
    pub fn reset_state(&mut self) {
        self.current_step = ConversationStep::default();
        self.selected_category = None;
        self.selected_tags.clear();
        self.selected_item = None;
        self.selected_companions.clear();
        self.history.clear();
        self.offered_options.clear();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derived
    // ─────────────────────────────────────────────────────────────────────────

    /// The step that should follow, derived from the current selections.
    ///
    /// First matching rule wins:
    /// 1. no category → `CategorySelection`
    /// 2. gluten-free category while at `CategorySelection` → `GlutenFreeEcosystem`
    /// 3. no item → `TagRefinement` for large categories, else `PizzaSelection`
    /// 4. no companion and not at `OrderSummary` → `CompanionSelection`
    /// 5. otherwise → `OrderSummary`
    pub fn next_logical_step(&self) -> ConversationStep {
        let Some(category) = self.selected_category else {
            return ConversationStep::CategorySelection;
        };

        if category.is_gluten_free() && self.current_step == ConversationStep::CategorySelection {
            return ConversationStep::GlutenFreeEcosystem;
        }

        if self.selected_item.is_none() {
            return if category.is_large() {
                ConversationStep::TagRefinement
            } else {
                ConversationStep::PizzaSelection
            };
        }

        if self.selected_companions.is_empty()
            && self.current_step != ConversationStep::OrderSummary
        {
            return ConversationStep::CompanionSelection;
        }

        ConversationStep::OrderSummary
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}
