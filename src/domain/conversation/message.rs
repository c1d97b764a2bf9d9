//! Message entity for the menu chat.
//!
//! Messages are immutable records of what the bot said and what the guest
//! picked. Each message has a sender, content, and timestamp.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, MessageId, Timestamp};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Bot,
    User,
}

/// An immutable chat message.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `content` is non-empty (validated at construction)
/// - `timestamp` is set at construction and never changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    content: String,
    sender: Sender,
    timestamp: Timestamp,
}

impl Message {
    /// Creates a new message.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is blank
    pub fn new(sender: Sender, content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::validation(
                "content",
                "Message content cannot be empty",
            ));
        }

        Ok(Self {
            id: MessageId::new(),
            content,
            sender,
            timestamp: Timestamp::now(),
        })
    }

    /// Creates a bot message.
    pub fn bot(content: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Sender::Bot, content)
    }

    /// Creates a guest message.
    pub fn user(content: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Sender::User, content)
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    pub fn is_from_bot(&self) -> bool {
        self.sender == Sender::Bot
    }
}
