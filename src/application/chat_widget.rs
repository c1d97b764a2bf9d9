//! ChatWidget - Drives one conversation against a presentation surface.
//!
//! Transitions are computed synchronously under the state lock. Their
//! presentation scripts are queued to a single player task that renders
//! them strictly in submission order. A restart replaces the player, which
//! drops any script still being rendered or waiting in the queue, and waits
//! for the old player to stop before the reset script is queued.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::ChatConfig;
use crate::domain::conversation::{
    values, ConversationState, FlowHandler, FlowResponse, PresentationStep,
};
use crate::ports::{MenuFilter, PresentationAdapter};

enum Job {
    Play(Vec<PresentationStep>),
    Flush(oneshot::Sender<()>),
}

struct Player {
    jobs: mpsc::UnboundedSender<Job>,
    task: JoinHandle<()>,
}

impl Player {
    fn spawn(presenter: Arc<dyn PresentationAdapter>, menu_filter: Option<Arc<dyn MenuFilter>>) -> Self {
        let (jobs, mut queue) = mpsc::unbounded_channel::<Job>();
        let task = tokio::spawn(async move {
            while let Some(job) = queue.recv().await {
                match job {
                    Job::Play(steps) => {
                        play(presenter.as_ref(), menu_filter.as_deref(), &steps).await
                    }
                    Job::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
        });
        Self { jobs, task }
    }

    fn enqueue(&self, job: Job) {
        if self.jobs.send(job).is_err() {
            warn!("Presentation player stopped, dropping script");
        }
    }
}

/// One guest's chat session.
pub struct ChatWidget {
    flow: FlowHandler,
    presenter: Arc<dyn PresentationAdapter>,
    menu_filter: Option<Arc<dyn MenuFilter>>,
    state: Mutex<ConversationState>,
    player: Mutex<Option<Player>>,
}

impl ChatWidget {
    /// Wires a widget; the handler is configured from `config` and from
    /// whether a menu filter is present.
    pub fn new(
        flow: FlowHandler,
        presenter: Arc<dyn PresentationAdapter>,
        menu_filter: Option<Arc<dyn MenuFilter>>,
        config: &ChatConfig,
    ) -> Self {
        let flow = flow
            .with_typing_delay(config.typing_delay_ms)
            .with_menu_filter(menu_filter.is_some());
        Self {
            flow,
            presenter,
            menu_filter,
            state: Mutex::new(ConversationState::with_history_limit(config.history_limit)),
            player: Mutex::new(None),
        }
    }

    /// Shows the greeting.
    pub async fn open(&self) -> FlowResponse {
        let mut player = self.player.lock().await;
        let response = {
            let mut state = self.state.lock().await;
            info!(conversation = %state.id(), catalog = self.flow.catalog_available(), "Chat opened");
            self.flow.start(&mut state)
        };
        self.ensure_player(&mut player)
            .enqueue(Job::Play(response.steps.clone()));
        response
    }

    /// Submits the value of a clicked option or card.
    ///
    /// Returns as soon as the transition is computed; rendering continues in
    /// the background.
    pub async fn submit(&self, value: &str) -> FlowResponse {
        let mut player = self.player.lock().await;
        let response = {
            let mut state = self.state.lock().await;
            self.flow.handle(&mut state, value)
        };

        if response.resets {
            if let Some(previous) = player.take() {
                previous.task.abort();
                // Abort only lands at the next yield; a step already rendering
                // must finish before the reset script is queued.
                let _ = previous.task.await;
                debug!("Cancelled in-flight presentation");
            }
        }

        // Buttons disappear on click, before any delayed render.
        if let Err(e) = self.presenter.clear_options().await {
            warn!(error = %e, "Failed to clear options");
        }

        self.ensure_player(&mut player)
            .enqueue(Job::Play(response.steps.clone()));
        response
    }

    pub async fn restart(&self) -> FlowResponse {
        self.submit(values::RESTART).await
    }

    /// Waits until every queued script has been rendered.
    pub async fn wait_idle(&self) {
        let done = {
            let player = self.player.lock().await;
            let Some(player) = player.as_ref() else {
                return;
            };
            let (tx, rx) = oneshot::channel();
            player.enqueue(Job::Flush(tx));
            rx
        };
        let _ = done.await;
    }

    /// Copy of the current conversation state.
    pub async fn snapshot(&self) -> ConversationState {
        self.state.lock().await.clone()
    }

    fn ensure_player<'a>(&self, slot: &'a mut Option<Player>) -> &'a Player {
        slot.get_or_insert_with(|| Player::spawn(self.presenter.clone(), self.menu_filter.clone()))
    }
}

impl std::fmt::Debug for ChatWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatWidget")
            .field("flow", &self.flow)
            .field("menu_filter", &self.menu_filter.is_some())
            .finish_non_exhaustive()
    }
}

/// Renders a script in order; failures are logged and skipped.
async fn play(
    presenter: &dyn PresentationAdapter,
    menu_filter: Option<&dyn MenuFilter>,
    steps: &[PresentationStep],
) {
    for step in steps {
        let result = match step {
            PresentationStep::ClearMessages => presenter.clear_messages().await,
            PresentationStep::ClearOptions => presenter.clear_options().await,
            PresentationStep::BotMessage { text, delay_ms } => {
                presenter
                    .show_bot_message(text, Duration::from_millis(*delay_ms))
                    .await
            }
            PresentationStep::UserMessage { text } => presenter.show_user_message(text).await,
            PresentationStep::ItemCard { item } => presenter.show_item_card(item).await.map(|_| ()),
            PresentationStep::Options { options } => presenter.show_options(options).await,
            PresentationStep::ApplyMenuFilter { category } => match menu_filter {
                Some(filter) => filter.apply_filter(*category).await,
                None => Ok(()),
            },
        };
        if let Err(e) = result {
            warn!(error = %e, "Presentation step failed");
        }
    }
}
