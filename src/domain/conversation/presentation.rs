//! Presentation script emitted by the flow handler.
//!
//! A transition is computed in full before anything is rendered; what the
//! guest sees is described as an ordered list of steps the presentation
//! layer plays one after the other.

use serde::{Deserialize, Serialize};

use super::option::ChatOption;
use super::step::ConversationStep;
use crate::domain::catalog::{Category, MenuItem};

/// One rendering instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PresentationStep {
    /// Wipe the message pane.
    ClearMessages,
    /// Remove the option buttons.
    ClearOptions,
    /// Bot bubble, shown after a simulated typing delay.
    BotMessage { text: String, delay_ms: u64 },
    /// Echo of the guest's click.
    UserMessage { text: String },
    /// Clickable item card; clicking submits the item id.
    ItemCard { item: MenuItem },
    /// Replace the option buttons.
    Options { options: Vec<ChatOption> },
    /// Ask the main menu page to filter by category.
    ApplyMenuFilter { category: Category },
}

/// Outcome of one flow transition.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowResponse {
    /// What to render, in order.
    pub steps: Vec<PresentationStep>,
    /// The step the conversation is in after the transition.
    pub step: ConversationStep,
    /// True when the transition reset the conversation.
    pub resets: bool,
}

impl FlowResponse {
    /// Bot message texts, in order.
    pub fn bot_messages(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter_map(|s| match s {
                PresentationStep::BotMessage { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The last option set in the script, if any.
    pub fn options(&self) -> Option<&[ChatOption]> {
        self.steps.iter().rev().find_map(|s| match s {
            PresentationStep::Options { options } => Some(options.as_slice()),
            _ => None,
        })
    }

    /// Values of the last option set, empty when none was emitted.
    pub fn option_values(&self) -> Vec<&str> {
        self.options()
            .map(|opts| opts.iter().map(|o| o.value.as_str()).collect())
            .unwrap_or_default()
    }

    /// Items shown as cards, in order.
    pub fn cards(&self) -> Vec<&MenuItem> {
        self.steps
            .iter()
            .filter_map(|s| match s {
                PresentationStep::ItemCard { item } => Some(item),
                _ => None,
            })
            .collect()
    }
}

/// Builder for presentation scripts.
#[derive(Debug, Clone)]
pub(crate) struct Script {
    steps: Vec<PresentationStep>,
    delay_ms: u64,
}

impl Script {
    pub(crate) fn new(delay_ms: u64) -> Self {
        Self {
            steps: vec![PresentationStep::ClearOptions],
            delay_ms,
        }
    }

    pub(crate) fn clear_messages(&mut self) -> &mut Self {
        self.steps.push(PresentationStep::ClearMessages);
        self
    }

    pub(crate) fn user(&mut self, text: impl Into<String>) -> &mut Self {
        self.steps.push(PresentationStep::UserMessage { text: text.into() });
        self
    }

    pub(crate) fn bot(&mut self, text: impl Into<String>) -> &mut Self {
        self.steps.push(PresentationStep::BotMessage {
            text: text.into(),
            delay_ms: self.delay_ms,
        });
        self
    }

    pub(crate) fn card(&mut self, item: &MenuItem) -> &mut Self {
        self.steps.push(PresentationStep::ItemCard { item: item.clone() });
        self
    }

    pub(crate) fn options(&mut self, options: Vec<ChatOption>) -> &mut Self {
        self.steps.push(PresentationStep::Options { options });
        self
    }

    pub(crate) fn menu_filter(&mut self, category: Category) -> &mut Self {
        self.steps.push(PresentationStep::ApplyMenuFilter { category });
        self
    }

    pub(crate) fn finish(self, step: ConversationStep, resets: bool) -> FlowResponse {
        FlowResponse {
            steps: self.steps,
            step,
            resets,
        }
    }
}
