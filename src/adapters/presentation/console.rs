//! Console presenter.
//!
//! Renders the conversation as plain text. Item cards and option buttons
//! are numbered together so a terminal user can answer with a number.

use async_trait::async_trait;
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::catalog::MenuItem;
use crate::domain::conversation::ChatOption;
use crate::ports::{CardHandle, PresentationAdapter, PresentationError};

type Writer = Box<dyn Write + Send>;

pub struct ConsolePresenter {
    writer: Mutex<Writer>,
    choices: Mutex<Vec<String>>,
    honor_delays: bool,
}

impl ConsolePresenter {
    /// Presenter writing to stdout and waiting the typing delays.
    pub fn stdout() -> Self {
        Self::with_writer(Box::new(std::io::stdout()), true)
    }

    pub fn with_writer(writer: Writer, honor_delays: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            choices: Mutex::new(Vec::new()),
            honor_delays,
        }
    }

    /// Value behind the `n`th (1-based) card or option currently on screen.
    pub fn choice(&self, n: usize) -> Option<String> {
        let choices = self.choices.lock().ok()?;
        n.checked_sub(1).and_then(|i| choices.get(i).cloned())
    }

    fn write_line(&self, line: &str) -> Result<(), PresentationError> {
        let mut writer = self.writer.lock().map_err(|_| PresentationError::Closed)?;
        writeln!(writer, "{line}")
            .and_then(|_| writer.flush())
            .map_err(|e| PresentationError::RenderFailed(e.to_string()))
    }

    fn push_choice(&self, value: &str) -> Result<usize, PresentationError> {
        let mut choices = self.choices.lock().map_err(|_| PresentationError::Closed)?;
        choices.push(value.to_string());
        Ok(choices.len())
    }
}

impl std::fmt::Debug for ConsolePresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsolePresenter")
            .field("honor_delays", &self.honor_delays)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PresentationAdapter for ConsolePresenter {
    async fn show_bot_message(&self, text: &str, delay: Duration) -> Result<(), PresentationError> {
        if self.honor_delays {
            tokio::time::sleep(delay).await;
        }
        self.write_line(&format!("🍕 {}", text.replace('\n', "\n   ")))
    }

    async fn show_user_message(&self, text: &str) -> Result<(), PresentationError> {
        self.write_line(&format!("   > {text}"))
    }

    async fn show_options(&self, options: &[ChatOption]) -> Result<(), PresentationError> {
        for option in options {
            let n = self.push_choice(&option.value)?;
            let line = match &option.description {
                Some(description) => format!("  {n}) {} ({description})", option.text),
                None => format!("  {n}) {}", option.text),
            };
            self.write_line(&line)?;
        }
        Ok(())
    }

    async fn show_item_card(&self, item: &MenuItem) -> Result<CardHandle, PresentationError> {
        let handle = CardHandle::for_item(item);
        let n = self.push_choice(&handle.value)?;
        self.write_line(&format!("  [{n}] {} - {}", item.name(), item.price()))?;
        if !item.description().is_empty() {
            self.write_line(&format!("      {}", item.description()))?;
        }
        Ok(handle)
    }

    async fn clear_options(&self) -> Result<(), PresentationError> {
        self.choices
            .lock()
            .map_err(|_| PresentationError::Closed)?
            .clear();
        Ok(())
    }

    async fn clear_messages(&self) -> Result<(), PresentationError> {
        self.write_line("")
    }
}
