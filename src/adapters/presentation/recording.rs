//! In-memory presentation adapters.
//!
//! Record every call in order. Used by tests and by headless embeddings
//! that render the conversation themselves.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::catalog::{Category, MenuItem};
use crate::domain::conversation::ChatOption;
use crate::ports::{CardHandle, MenuFilter, PresentationAdapter, PresentationError};

/// One call made against the presenter.
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterEvent {
    BotMessage { text: String, delay: Duration },
    UserMessage(String),
    Options(Vec<ChatOption>),
    ItemCard(String),
    ClearOptions,
    ClearMessages,
}

/// Presenter that records calls instead of drawing them.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    events: Arc<RwLock<Vec<PresenterEvent>>>,
    honor_delays: bool,
    failing: Arc<AtomicBool>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Actually waits the typing delay before recording a bot message.
    pub fn with_delays(mut self) -> Self {
        self.honor_delays = true;
        self
    }

    /// Makes every call fail after it has been recorded.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn events(&self) -> Vec<PresenterEvent> {
        self.events.read().await.clone()
    }

    pub async fn bot_messages(&self) -> Vec<String> {
        self.events
            .read()
            .await
            .iter()
            .filter_map(|e| match e {
                PresenterEvent::BotMessage { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Options currently on screen: the last set shown, unless cleared since.
    pub async fn visible_options(&self) -> Vec<ChatOption> {
        let events = self.events.read().await;
        for event in events.iter().rev() {
            match event {
                PresenterEvent::Options(options) => return options.clone(),
                PresenterEvent::ClearOptions => return Vec::new(),
                _ => {}
            }
        }
        Vec::new()
    }

    /// Clear all recorded events (useful for tests)
    pub async fn clear(&self) {
        self.events.write().await.clear();
    }

    async fn record(&self, event: PresenterEvent) -> Result<(), PresentationError> {
        self.events.write().await.push(event);
        if self.failing.load(Ordering::SeqCst) {
            return Err(PresentationError::RenderFailed("recording presenter set to fail".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl PresentationAdapter for RecordingPresenter {
    async fn show_bot_message(&self, text: &str, delay: Duration) -> Result<(), PresentationError> {
        if self.honor_delays {
            tokio::time::sleep(delay).await;
        }
        self.record(PresenterEvent::BotMessage {
            text: text.to_string(),
            delay,
        })
        .await
    }

    async fn show_user_message(&self, text: &str) -> Result<(), PresentationError> {
        self.record(PresenterEvent::UserMessage(text.to_string())).await
    }

    async fn show_options(&self, options: &[ChatOption]) -> Result<(), PresentationError> {
        self.record(PresenterEvent::Options(options.to_vec())).await
    }

    async fn show_item_card(&self, item: &MenuItem) -> Result<CardHandle, PresentationError> {
        let handle = CardHandle::for_item(item);
        self.record(PresenterEvent::ItemCard(handle.value.clone())).await?;
        Ok(handle)
    }

    async fn clear_options(&self) -> Result<(), PresentationError> {
        self.record(PresenterEvent::ClearOptions).await
    }

    async fn clear_messages(&self) -> Result<(), PresentationError> {
        self.record(PresenterEvent::ClearMessages).await
    }
}

/// Menu filter that remembers which categories it was asked to show.
#[derive(Debug, Clone, Default)]
pub struct RecordingMenuFilter {
    applied: Arc<RwLock<Vec<Category>>>,
}

impl RecordingMenuFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn applied(&self) -> Vec<Category> {
        self.applied.read().await.clone()
    }
}

#[async_trait]
impl MenuFilter for RecordingMenuFilter {
    async fn apply_filter(&self, category: Category) -> Result<(), PresentationError> {
        self.applied.write().await.push(category);
        Ok(())
    }
}
