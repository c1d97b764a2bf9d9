//! Presentation Adapters
//!
//! - **RecordingPresenter** / **RecordingMenuFilter** - In-memory, for tests and headless use
//! - **ConsolePresenter** - Plain-text terminal rendering

mod console;
mod recording;

pub use console::ConsolePresenter;
pub use recording::{PresenterEvent, RecordingMenuFilter, RecordingPresenter};
