//! Presentation ports - Interfaces to the chat UI and the main menu page.
//!
//! The flow handler never talks to these directly; the chat widget plays a
//! presentation script against them.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::catalog::{Category, MenuItem};
use crate::domain::conversation::ChatOption;

/// Errors raised by a presentation surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresentationError {
    #[error("Presentation surface is closed")]
    Closed,

    #[error("Failed to render: {0}")]
    RenderFailed(String),
}

/// Clickable handle returned for a rendered item card.
///
/// Clicking the card submits `value` exactly like an option button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardHandle {
    pub value: String,
}

impl CardHandle {
    pub fn for_item(item: &MenuItem) -> Self {
        Self {
            value: item.id().as_str().to_string(),
        }
    }
}

/// Port for the chat surface.
///
/// Implementations must render calls in the order they are made. The
/// `delay` passed with a bot message is the simulated typing time to wait
/// before the bubble appears.
#[async_trait]
pub trait PresentationAdapter: Send + Sync {
    async fn show_bot_message(&self, text: &str, delay: Duration) -> Result<(), PresentationError>;

    async fn show_user_message(&self, text: &str) -> Result<(), PresentationError>;

    async fn show_options(&self, options: &[ChatOption]) -> Result<(), PresentationError>;

    async fn show_item_card(&self, item: &MenuItem) -> Result<CardHandle, PresentationError>;

    async fn clear_options(&self) -> Result<(), PresentationError>;

    async fn clear_messages(&self) -> Result<(), PresentationError>;
}

/// Port for the main menu page the widget can filter on the guest's behalf.
#[async_trait]
pub trait MenuFilter: Send + Sync {
    async fn apply_filter(&self, category: Category) -> Result<(), PresentationError>;
}
