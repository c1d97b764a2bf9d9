//! Conversation domain module.
//!
//! Guides a guest from a greeting to an order recap through a fixed step
//! machine, producing a presentation script for every click.

mod copy;
mod flow;
mod message;
mod option;
mod presentation;
mod state;
mod step;

pub use flow::{FlowHandler, SpecialAction, DEFAULT_TYPING_DELAY_MS};
pub use message::{Message, Sender};
pub use option::{values, ChatOption};
pub use presentation::{FlowResponse, PresentationStep};
pub use state::{ConversationState, DEFAULT_HISTORY_LIMIT};
pub use step::ConversationStep;
