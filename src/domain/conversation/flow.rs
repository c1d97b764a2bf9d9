//! Flow handler.
//!
//! Step-indexed dispatcher of the menu chat. Given the state and the value
//! of the option the guest clicked, it computes the next state and the
//! presentation script in one synchronous pass.
//!
//! Transitions are computed on a draft copy of the state and committed only
//! when they succeed, so a rejected input never leaves half-applied
//! selections behind. Nothing escapes as an error: unknown input and failed
//! transitions become an apology with a single restart option.

use std::sync::Arc;

use tracing::{debug, warn};

use super::copy;
use super::message::Message;
use super::option::{values, ChatOption};
use super::presentation::{FlowResponse, PresentationStep, Script};
use super::state::ConversationState;
use super::step::ConversationStep;
use crate::domain::catalog::{CatalogIndex, Category, CompanionKind, MenuItem};
use crate::domain::foundation::{DomainError, ErrorCode, StateMachine};
use crate::domain::recommendation::{companions_for, rank_by_relevance, similar_items};

/// Default simulated typing delay before each bot message.
pub const DEFAULT_TYPING_DELAY_MS: u64 = 600;

const SIMILAR_LIMIT: usize = 2;

/// Inputs understood at (almost) every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialAction {
    ShowCategories,
    ShowAll,
    ViewFullMenu,
}

impl SpecialAction {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            values::SHOW_CATEGORIES => Some(Self::ShowCategories),
            values::SHOW_ALL => Some(Self::ShowAll),
            values::VIEW_FULL_MENU => Some(Self::ViewFullMenu),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Handled,
    Unrecognized,
}

type StepResult = Result<Outcome, DomainError>;

/// Computes conversation transitions.
#[derive(Debug, Clone)]
pub struct FlowHandler {
    catalog: Option<Arc<CatalogIndex>>,
    typing_delay_ms: u64,
    menu_filter: bool,
}

impl FlowHandler {
    /// Creates a handler over an optional catalog.
    ///
    /// A missing or empty catalog is not an error: selection steps answer
    /// with "coming soon" until a handler with data is built.
    pub fn new(catalog: Option<Arc<CatalogIndex>>) -> Self {
        Self {
            catalog,
            typing_delay_ms: DEFAULT_TYPING_DELAY_MS,
            menu_filter: false,
        }
    }

    pub fn with_typing_delay(mut self, delay_ms: u64) -> Self {
        self.typing_delay_ms = delay_ms;
        self
    }

    /// Declares whether a main-menu filter collaborator is wired in.
    pub fn with_menu_filter(mut self, available: bool) -> Self {
        self.menu_filter = available;
        self
    }

    /// True when a non-empty catalog was provided.
    pub fn catalog_available(&self) -> bool {
        self.catalog().is_some()
    }

    fn catalog(&self) -> Option<&CatalogIndex> {
        self.catalog.as_deref().filter(|c| !c.is_empty())
    }

    /// Opening script: greeting and category buttons.
    pub fn start(&self, state: &mut ConversationState) -> FlowResponse {
        let mut script = Script::new(self.typing_delay_ms);
        self.greet(&mut script);
        let response = script.finish(state.current_step(), false);
        remember_options(state, &response);
        response
    }

    /// Applies the guest's choice.
    pub fn handle(&self, state: &mut ConversationState, value: &str) -> FlowResponse {
        let value = value.trim();
        let from = state.current_step();

        if value == values::RESTART {
            debug!(conversation = %state.id(), ?from, "Restarting conversation");
            return self.restart(state);
        }

        let label = self.label_for(state, value);
        let mut draft = state.clone();
        let mut script = Script::new(self.typing_delay_ms);
        script.user(label.clone());

        match self.dispatch(&mut draft, value, &mut script) {
            Ok(Outcome::Handled) => {
                let response = script.finish(draft.current_step(), false);
                *state = draft;
                record(state, &response);
                debug!(
                    conversation = %state.id(),
                    ?from,
                    to = ?response.step,
                    value,
                    "Conversation transition"
                );
                response
            }
            Ok(Outcome::Unrecognized) => {
                warn!(conversation = %state.id(), step = ?from, value, "Unrecognized option");
                self.apologize(state, label)
            }
            Err(e) => {
                warn!(conversation = %state.id(), step = ?from, value, error = %e, "Transition rejected");
                self.apologize(state, label)
            }
        }
    }

    fn dispatch(&self, draft: &mut ConversationState, value: &str, script: &mut Script) -> StepResult {
        use ConversationStep::*;
        let outcome = match draft.current_step() {
            Greeting | CategorySelection => self.on_category(draft, value, script)?,
            TagRefinement => self.on_tag(draft, value, script)?,
            PizzaSelection => self.on_pizza(draft, value, script)?,
            CompanionSelection => self.on_companion(draft, value, script)?,
            GlutenFreeEcosystem => self.on_gluten_free(draft, value, script)?,
            OrderSummary => Outcome::Unrecognized,
        };
        if outcome == Outcome::Handled {
            return Ok(outcome);
        }

        match SpecialAction::parse(value) {
            Some(action) => self.on_special(draft, action, script),
            None => Ok(Outcome::Unrecognized),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Step handlers
    // ─────────────────────────────────────────────────────────────────────────

    fn on_category(&self, draft: &mut ConversationState, value: &str, script: &mut Script) -> StepResult {
        if value.parse::<Category>().is_err() {
            return Ok(Outcome::Unrecognized);
        }

        draft.clear_selections();
        let category = draft.set_selected_category(value)?;
        draft.set_current_step(ConversationStep::CategorySelection)?;

        match draft.next_logical_step() {
            ConversationStep::GlutenFreeEcosystem => self.enter_gluten_free(draft, script),
            ConversationStep::TagRefinement => {
                let tags = self
                    .catalog()
                    .map(|c| c.refinement_tags(category))
                    .unwrap_or_default();
                if tags.is_empty() {
                    self.show_pizzas(draft, category, script)
                } else {
                    self.offer_tags(draft, tags, script)
                }
            }
            _ => self.show_pizzas(draft, category, script),
        }
    }

    fn on_tag(&self, draft: &mut ConversationState, value: &str, script: &mut Script) -> StepResult {
        let Some(category) = draft.selected_category() else {
            return Ok(Outcome::Unrecognized);
        };

        if value != values::SKIP {
            let offered = self
                .catalog()
                .map(|c| c.refinement_tags(category))
                .unwrap_or_default();
            if !offered.iter().any(|t| t == value) {
                return Ok(Outcome::Unrecognized);
            }
            draft.add_selected_tag(value)?;
        }

        self.show_pizzas(draft, category, script)
    }

    fn on_pizza(&self, draft: &mut ConversationState, value: &str, script: &mut Script) -> StepResult {
        let Some(item) = self.pizza_by_id(value) else {
            return Ok(Outcome::Unrecognized);
        };
        self.select_item(draft, item, script)
    }

    fn on_companion(&self, draft: &mut ConversationState, value: &str, script: &mut Script) -> StepResult {
        if value == values::NO_COMPANIONS {
            return self.summarize(draft, script);
        }

        let category = draft.selected_category().unwrap_or(Category::All);

        if let Ok(kind) = value.parse::<CompanionKind>() {
            let picks = self.companions(category, kind);
            if picks.is_empty() {
                script.bot(copy::companion_unavailable(kind));
            } else {
                script.bot(copy::companion_list_intro(kind, category.is_gluten_free()));
                for pick in &picks {
                    script.card(pick);
                }
            }
            script.options(companion_options());
            return Ok(Outcome::Handled);
        }

        // Only companions that could have been offered for this pizza count.
        let Some(companion) = self.catalog().and_then(|c| c.get_by_id(value)) else {
            return Ok(Outcome::Unrecognized);
        };
        let Some(kind) = companion.companion_kind() else {
            return Ok(Outcome::Unrecognized);
        };
        if !self
            .companions(category, kind)
            .iter()
            .any(|c| c.id() == companion.id())
        {
            return Ok(Outcome::Unrecognized);
        }

        draft.add_selected_companion(companion.clone())?;
        self.summarize(draft, script)
    }

    fn on_gluten_free(&self, draft: &mut ConversationState, value: &str, script: &mut Script) -> StepResult {
        match value {
            values::GF_PIZZAS => self.show_pizzas(draft, Category::SenzaGlutine, script),
            values::GF_BEVERAGES => self.list_gluten_free(CompanionKind::Beverages, script),
            values::GF_FRITTATINE => self.list_gluten_free(CompanionKind::Frittatine, script),
            values::GF_DESSERTS => self.list_gluten_free(CompanionKind::Desserts, script),
            values::GF_COMPLETE_MENU => self.gluten_free_menu(script),
            other => match self.pizza_by_id(other).filter(|i| i.is_gluten_free()) {
                Some(item) => self.select_item(draft, item, script),
                None => Ok(Outcome::Unrecognized),
            },
        }
    }

    fn on_special(&self, draft: &mut ConversationState, action: SpecialAction, script: &mut Script) -> StepResult {
        match action {
            SpecialAction::ShowCategories => {
                if draft.current_step().is_terminal() {
                    return Ok(Outcome::Unrecognized);
                }
                draft.clear_selections();
                draft.set_current_step(ConversationStep::CategorySelection)?;
                script.bot(copy::SHOW_CATEGORIES);
                script.options(category_options());
                Ok(Outcome::Handled)
            }
            SpecialAction::ShowAll => {
                if draft.current_step().is_terminal() {
                    return Ok(Outcome::Unrecognized);
                }
                draft.clear_selections();
                draft.set_selected_category(Category::All.slug())?;
                self.show_pizzas(draft, Category::All, script)
            }
            SpecialAction::ViewFullMenu => {
                let category = draft.selected_category().unwrap_or(Category::All);
                if self.menu_filter {
                    script.menu_filter(category);
                    script.bot(copy::menu_filtered(category));
                } else {
                    script.bot(copy::MENU_FILTER_FALLBACK);
                }
                let options = if draft.offered_options().is_empty() {
                    vec![ChatOption::restart()]
                } else {
                    draft.offered_options().to_vec()
                };
                script.options(options);
                Ok(Outcome::Handled)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Screens
    // ─────────────────────────────────────────────────────────────────────────

    fn greet(&self, script: &mut Script) {
        script.bot(copy::GREETING);
        script.bot(copy::ASK_CATEGORY);
        script.options(category_options());
    }

    fn offer_tags(&self, draft: &mut ConversationState, tags: Vec<String>, script: &mut Script) -> StepResult {
        draft.set_current_step(ConversationStep::TagRefinement)?;
        let mut options: Vec<ChatOption> = tags.iter().map(|t| ChatOption::tag(t)).collect();
        options.push(ChatOption::new(copy::SKIP_TAGS, values::SKIP));
        script.bot(copy::ASK_TAGS);
        script.options(options);
        Ok(Outcome::Handled)
    }

    fn show_pizzas(&self, draft: &mut ConversationState, category: Category, script: &mut Script) -> StepResult {
        draft.set_current_step(ConversationStep::PizzaSelection)?;

        let ranked = match self.catalog() {
            Some(catalog) => rank_by_relevance(&catalog.get_by_category(category), draft.selected_tags()),
            None => Vec::new(),
        };
        if ranked.is_empty() {
            self.coming_soon(script);
            return Ok(Outcome::Handled);
        }

        script.bot(copy::pizza_list_intro(category, draft.selected_tags()));
        for item in &ranked {
            script.card(item);
        }

        let mut options = Vec::new();
        if category != Category::All {
            options.push(ChatOption::show_all());
        }
        options.push(ChatOption::show_categories());
        options.push(ChatOption::restart());
        script.options(options);
        Ok(Outcome::Handled)
    }

    fn select_item(&self, draft: &mut ConversationState, item: &MenuItem, script: &mut Script) -> StepResult {
        draft.set_selected_item(item.clone())?;
        let next = draft.next_logical_step();
        draft.set_current_step(next)?;

        script.bot(copy::item_chosen(item));
        if let Some(catalog) = self.catalog() {
            let similar = similar_items(catalog, item, SIMILAR_LIMIT);
            if !similar.is_empty() {
                script.bot(copy::similar_suggestion(&similar));
            }
        }
        script.bot(copy::ASK_COMPANIONS);
        script.options(companion_options());
        Ok(Outcome::Handled)
    }

    fn summarize(&self, draft: &mut ConversationState, script: &mut Script) -> StepResult {
        draft.set_current_step(ConversationStep::OrderSummary)?;
        let Some(item) = draft.selected_item() else {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Order summary requested without a pizza",
            ));
        };

        script.bot(copy::order_summary(item, draft.selected_companions()));
        script.bot(copy::FAREWELL);
        script.options(vec![ChatOption::view_full_menu(), ChatOption::restart()]);
        Ok(Outcome::Handled)
    }

    fn enter_gluten_free(&self, draft: &mut ConversationState, script: &mut Script) -> StepResult {
        draft.set_current_step(ConversationStep::GlutenFreeEcosystem)?;
        if self.catalog().is_none() {
            self.coming_soon(script);
            return Ok(Outcome::Handled);
        }
        script.bot(copy::GF_INTRO);
        script.bot(copy::GF_ASK);
        script.options(gluten_free_options());
        Ok(Outcome::Handled)
    }

    fn list_gluten_free(&self, kind: CompanionKind, script: &mut Script) -> StepResult {
        let Some(catalog) = self.catalog() else {
            self.coming_soon(script);
            return Ok(Outcome::Handled);
        };
        script.bot(copy::gluten_free_listing(kind, &catalog.gluten_free_companions(kind)));
        script.options(gluten_free_options());
        Ok(Outcome::Handled)
    }

    fn gluten_free_menu(&self, script: &mut Script) -> StepResult {
        let Some(catalog) = self.catalog() else {
            self.coming_soon(script);
            return Ok(Outcome::Handled);
        };

        for kind in CompanionKind::ALL {
            let items = catalog.gluten_free_companions(kind);
            if !items.is_empty() {
                script.bot(copy::gluten_free_listing(kind, &items));
            }
        }

        let pizzas = catalog.get_by_category(Category::SenzaGlutine);
        if pizzas.is_empty() {
            script.bot(copy::COMING_SOON);
        } else {
            script.bot(copy::GF_CHOOSE_PIZZA);
            for pizza in &pizzas {
                script.card(pizza);
            }
        }
        script.options(gluten_free_options());
        Ok(Outcome::Handled)
    }

    fn coming_soon(&self, script: &mut Script) {
        script.bot(copy::COMING_SOON);
        script.options(vec![ChatOption::show_categories(), ChatOption::restart()]);
    }

    fn restart(&self, state: &mut ConversationState) -> FlowResponse {
        state.reset_state();
        let mut script = Script::new(self.typing_delay_ms);
        script.clear_messages();
        self.greet(&mut script);
        let response = script.finish(ConversationStep::Greeting, true);
        remember_options(state, &response);
        response
    }

    fn apologize(&self, state: &mut ConversationState, label: String) -> FlowResponse {
        let mut script = Script::new(self.typing_delay_ms);
        script.user(label);
        script.bot(copy::APOLOGY);
        script.options(vec![ChatOption::restart()]);
        let response = script.finish(state.current_step(), false);
        record(state, &response);
        response
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lookups
    // ─────────────────────────────────────────────────────────────────────────

    fn pizza_by_id(&self, id: &str) -> Option<&MenuItem> {
        self.catalog()
            .and_then(|c| c.get_by_id(id))
            .filter(|item| item.is_pizza())
    }

    fn companions(&self, category: Category, kind: CompanionKind) -> Vec<&MenuItem> {
        self.catalog()
            .map(|c| companions_for(c, category, kind))
            .unwrap_or_default()
    }

    /// Text echoed for a click: the button label, else the item name, else the raw value.
    fn label_for(&self, state: &ConversationState, value: &str) -> String {
        if let Some(label) = state.option_label(value) {
            return label.to_string();
        }
        if let Some(item) = self.catalog().and_then(|c| c.get_by_id(value)) {
            return item.name().to_string();
        }
        if value.is_empty() {
            return "…".to_string();
        }
        value.to_string()
    }
}

fn category_options() -> Vec<ChatOption> {
    let mut options: Vec<ChatOption> = Category::SELECTABLE
        .into_iter()
        .map(ChatOption::category)
        .collect();
    options.push(ChatOption::show_all());
    options
}

fn companion_options() -> Vec<ChatOption> {
    let mut options: Vec<ChatOption> = CompanionKind::ALL
        .into_iter()
        .map(ChatOption::companion_kind)
        .collect();
    options.push(ChatOption::new(copy::NO_COMPANIONS, values::NO_COMPANIONS));
    options
}

fn gluten_free_options() -> Vec<ChatOption> {
    let kind_option = |kind: CompanionKind, value: &str| {
        ChatOption::new(
            format!("{} {} senza glutine", kind.emoji(), kind.label()),
            value,
        )
    };
    vec![
        ChatOption::new(copy::GF_PIZZAS, values::GF_PIZZAS),
        kind_option(CompanionKind::Beverages, values::GF_BEVERAGES),
        kind_option(CompanionKind::Frittatine, values::GF_FRITTATINE),
        kind_option(CompanionKind::Desserts, values::GF_DESSERTS),
        ChatOption::new(copy::GF_COMPLETE_MENU, values::GF_COMPLETE_MENU),
        ChatOption::restart(),
    ]
}

/// Appends the script's chat bubbles to the history and remembers its options.
fn record(state: &mut ConversationState, response: &FlowResponse) {
    for step in &response.steps {
        let message = match step {
            PresentationStep::BotMessage { text, .. } => Message::bot(text.as_str()),
            PresentationStep::UserMessage { text } => Message::user(text.as_str()),
            _ => continue,
        };
        if let Ok(message) = message {
            state.push_message(message);
        }
    }
    remember_options(state, response);
}

fn remember_options(state: &mut ConversationState, response: &FlowResponse) {
    if let Some(options) = response.options() {
        state.set_offered_options(options.to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ItemId;

    fn item(id: &str, name: &str, price: &str, categories: &[&str], tags: &[&str]) -> MenuItem {
        MenuItem::builder(ItemId::new(id).unwrap(), name, price)
            .categories(categories.iter().copied())
            .tags(tags.iter().copied())
            .build()
            .unwrap()
    }

    fn catalog() -> Arc<CatalogIndex> {
        Arc::new(CatalogIndex::new(vec![
            item("margherita", "Margherita", "€ 6,00", &["classica"], &["popular", "tradizionale"]),
            item("diavola", "Diavola", "€ 7,50", &["classica"], &["piccante", "tradizionale"]),
            item("capricciosa", "Capricciosa", "€ 8,00", &["classica"], &["funghi", "tradizionale"]),
            item("tartufata", "Tartufata", "€ 12,00", &["pizze-d'autore"], &["tartufo", "gourmet"]),
            item("ortolana", "Ortolana", "€ 7,00", &["vegana"], &["vegano"]),
            item("margherita-gf", "Margherita senza glutine", "€ 8,00", &["senza-glutine"], &["tradizionale"]),
            item("birra-bionda", "Birra bionda", "€ 4,50", &["beverages"], &["birra"]),
            item("birra-gf", "Birra senza glutine", "€ 5,00", &["beverages"], &["birra", "senza-glutine"]),
            item("acqua", "Acqua", "€ 1,50", &["beverages"], &["classico"]),
            item("frittatina", "Frittatina classica", "€ 3,00", &["frittatine"], &["tradizionale"]),
            item("tiramisu", "Tiramisù", "€ 5,00", &["desserts"], &["tradizionale"]),
            item("sorbetto", "Sorbetto al limone", "€ 4,00", &["desserts"], &["senza-glutine"]),
        ]))
    }

    fn handler() -> FlowHandler {
        FlowHandler::new(Some(catalog())).with_typing_delay(0)
    }

    fn opened(handler: &FlowHandler) -> ConversationState {
        let mut state = ConversationState::new();
        handler.start(&mut state);
        state
    }

    fn drive(handler: &FlowHandler, state: &mut ConversationState, values: &[&str]) -> FlowResponse {
        let mut last = None;
        for value in values {
            last = Some(handler.handle(state, value));
        }
        last.expect("at least one value")
    }

    mod opening {
        use super::*;

        #[test]
        fn start_offers_categories_and_show_all() {
            let handler = handler();
            let mut state = ConversationState::new();
            let response = handler.start(&mut state);

            assert_eq!(response.step, ConversationStep::Greeting);
            assert_eq!(
                response.option_values(),
                vec!["classica", "pizze-d'autore", "vegana", "senza-glutine", "show_all"]
            );
            assert_eq!(response.bot_messages(), vec![copy::GREETING, copy::ASK_CATEGORY]);
        }

        #[test]
        fn start_does_not_record_history() {
            let state = opened(&handler());
            assert_eq!(state.history_len(), 0);
            assert_eq!(state.offered_options().len(), 5);
        }

        #[test]
        fn catalog_availability_reflects_data() {
            assert!(handler().catalog_available());
            assert!(!FlowHandler::new(None).catalog_available());
            assert!(!FlowHandler::new(Some(Arc::new(CatalogIndex::default()))).catalog_available());
        }
    }

    mod categories {
        use super::*;

        #[test]
        fn large_category_asks_for_tags() {
            let handler = handler();
            let mut state = opened(&handler);
            let response = handler.handle(&mut state, "classica");

            assert_eq!(response.step, ConversationStep::TagRefinement);
            assert_eq!(state.selected_category(), Some(Category::Classica));
            let offered = response.option_values();
            assert_eq!(offered.first(), Some(&"tradizionale"));
            assert!(!offered.contains(&"popular"));
            assert!(offered.len() <= 5);
            assert_eq!(offered.last(), Some(&values::SKIP));
        }

        #[test]
        fn small_category_lists_pizzas_directly() {
            let handler = handler();
            let mut state = opened(&handler);
            let response = handler.handle(&mut state, "vegana");

            assert_eq!(response.step, ConversationStep::PizzaSelection);
            let cards: Vec<&str> = response.cards().iter().map(|i| i.id().as_str()).collect();
            assert_eq!(cards, vec!["ortolana"]);
        }

        #[test]
        fn gluten_free_category_opens_the_ecosystem() {
            let handler = handler();
            let mut state = opened(&handler);
            let response = handler.handle(&mut state, "senza-glutine");

            assert_eq!(response.step, ConversationStep::GlutenFreeEcosystem);
            assert_eq!(state.current_step(), ConversationStep::GlutenFreeEcosystem);
            assert!(response.option_values().contains(&values::GF_PIZZAS));
            assert!(!response.option_values().contains(&values::SKIP));
        }

        #[test]
        fn user_echo_uses_the_button_label() {
            let handler = handler();
            let mut state = opened(&handler);
            let response = handler.handle(&mut state, "vegana");

            assert!(response.steps.contains(&PresentationStep::UserMessage {
                text: Category::Vegana.label().to_string()
            }));
            let first = state.history().next().unwrap();
            assert_eq!(first.content(), Category::Vegana.label());
            assert!(!first.is_from_bot());
        }

        #[test]
        fn show_all_lists_every_pizza_capped() {
            let handler = handler();
            let mut state = opened(&handler);
            let response = handler.handle(&mut state, values::SHOW_ALL);

            assert_eq!(response.step, ConversationStep::PizzaSelection);
            assert_eq!(state.selected_category(), Some(Category::All));
            assert_eq!(response.cards().len(), 6);
            assert!(response.cards().iter().all(|i| i.is_pizza()));
            assert!(!response.option_values().contains(&values::SHOW_ALL));
        }
    }

    mod refinement {
        use super::*;

        #[test]
        fn chosen_tag_ranks_matching_pizzas_first() {
            let handler = handler();
            let mut state = opened(&handler);
            let response = drive(&handler, &mut state, &["classica", "piccante"]);

            assert_eq!(response.step, ConversationStep::PizzaSelection);
            assert_eq!(state.selected_tags(), ["piccante".to_string()]);
            assert_eq!(response.cards()[0].id().as_str(), "diavola");
        }

        #[test]
        fn skip_keeps_tags_empty() {
            let handler = handler();
            let mut state = opened(&handler);
            let response = drive(&handler, &mut state, &["classica", values::SKIP]);

            assert_eq!(response.step, ConversationStep::PizzaSelection);
            assert!(state.selected_tags().is_empty());
            assert_eq!(response.cards().len(), 3);
        }

        #[test]
        fn tag_not_offered_is_rejected() {
            let handler = handler();
            let mut state = opened(&handler);
            let response = drive(&handler, &mut state, &["classica", "ananas"]);

            assert_eq!(response.bot_messages(), vec![copy::APOLOGY]);
            assert_eq!(state.current_step(), ConversationStep::TagRefinement);
            assert!(state.selected_tags().is_empty());
        }
    }

    mod selection {
        use super::*;

        #[test]
        fn picking_a_pizza_moves_to_companions() {
            let handler = handler();
            let mut state = opened(&handler);
            let response = drive(&handler, &mut state, &["classica", values::SKIP, "diavola"]);

            assert_eq!(response.step, ConversationStep::CompanionSelection);
            assert_eq!(state.selected_item().map(|i| i.name()), Some("Diavola"));
            assert_eq!(
                response.option_values(),
                vec!["beverages", "frittatine", "desserts", values::NO_COMPANIONS]
            );
        }

        #[test]
        fn unknown_item_apologizes_and_keeps_state() {
            let handler = handler();
            let mut state = opened(&handler);
            drive(&handler, &mut state, &["classica", values::SKIP]);
            let before = state.clone();

            let response = handler.handle(&mut state, "nonexistent");

            assert_eq!(response.bot_messages(), vec![copy::APOLOGY]);
            assert_eq!(response.option_values(), vec![values::RESTART]);
            assert_eq!(state.current_step(), ConversationStep::PizzaSelection);
            assert!(state.selected_item().is_none());
            assert_eq!(state.selected_category(), before.selected_category());
            assert_eq!(state.history_len(), before.history_len() + 2);
        }

        #[test]
        fn companion_id_is_not_a_pizza() {
            let handler = handler();
            let mut state = opened(&handler);
            let response = drive(&handler, &mut state, &[values::SHOW_ALL, "birra-bionda"]);

            assert_eq!(response.bot_messages(), vec![copy::APOLOGY]);
            assert!(state.selected_item().is_none());
        }

        #[test]
        fn show_categories_clears_selections() {
            let handler = handler();
            let mut state = opened(&handler);
            drive(&handler, &mut state, &["classica", "piccante"]);

            let response = handler.handle(&mut state, values::SHOW_CATEGORIES);

            assert_eq!(response.step, ConversationStep::CategorySelection);
            assert!(state.selected_category().is_none());
            assert!(state.selected_tags().is_empty());
        }
    }

    mod companions {
        use super::*;

        fn at_companions(handler: &FlowHandler, pizza: &str) -> ConversationState {
            let mut state = opened(handler);
            drive(handler, &mut state, &["classica", values::SKIP, pizza]);
            state
        }

        #[test]
        fn kind_lists_matching_companions_first() {
            let handler = handler();
            let mut state = at_companions(&handler, "margherita");
            let response = handler.handle(&mut state, "beverages");

            assert_eq!(response.step, ConversationStep::CompanionSelection);
            let ids: Vec<&str> = response.cards().iter().map(|i| i.id().as_str()).collect();
            assert_eq!(ids, vec!["birra-bionda", "birra-gf", "acqua"]);
        }

        #[test]
        fn picking_a_companion_summarizes_the_order() {
            let handler = handler();
            let mut state = at_companions(&handler, "margherita");
            let response = drive(&handler, &mut state, &["beverages", "birra-bionda"]);

            assert_eq!(response.step, ConversationStep::OrderSummary);
            assert_eq!(state.selected_companions().len(), 1);
            assert!(response.bot_messages()[0].contains("Totale: € 10,50"));
            assert_eq!(
                response.option_values(),
                vec![values::VIEW_FULL_MENU, values::RESTART]
            );
        }

        #[test]
        fn declining_companions_summarizes_the_pizza_alone() {
            let handler = handler();
            let mut state = at_companions(&handler, "diavola");
            let response = handler.handle(&mut state, values::NO_COMPANIONS);

            assert_eq!(response.step, ConversationStep::OrderSummary);
            assert!(state.selected_companions().is_empty());
            assert!(response.bot_messages()[0].contains("Diavola"));
        }
    }

    mod gluten_free {
        use super::*;

        fn in_ecosystem(handler: &FlowHandler) -> ConversationState {
            let mut state = opened(handler);
            handler.handle(&mut state, "senza-glutine");
            state
        }

        #[test]
        fn gf_pizzas_converges_to_pizza_selection() {
            let handler = handler();
            let mut state = in_ecosystem(&handler);
            let response = handler.handle(&mut state, values::GF_PIZZAS);

            assert_eq!(response.step, ConversationStep::PizzaSelection);
            assert!(!response.cards().is_empty());
            assert!(response.cards().iter().all(|i| i.is_gluten_free()));
        }

        #[test]
        fn companions_stay_gluten_free_after_choosing_a_pizza() {
            let handler = handler();
            let mut state = in_ecosystem(&handler);
            let response = drive(
                &handler,
                &mut state,
                &[values::GF_PIZZAS, "margherita-gf", "beverages"],
            );

            let ids: Vec<&str> = response.cards().iter().map(|i| i.id().as_str()).collect();
            assert_eq!(ids, vec!["birra-gf"]);
        }

        #[test]
        fn regular_companion_is_refused_for_gluten_free_orders() {
            let handler = handler();
            let mut state = in_ecosystem(&handler);
            let response = drive(
                &handler,
                &mut state,
                &[values::GF_PIZZAS, "margherita-gf", "birra-bionda"],
            );

            assert_eq!(response.bot_messages(), vec![copy::APOLOGY]);
            assert!(state.selected_companions().is_empty());
        }

        #[test]
        fn listing_stays_in_the_ecosystem() {
            let handler = handler();
            let mut state = in_ecosystem(&handler);
            let response = handler.handle(&mut state, values::GF_DESSERTS);

            assert_eq!(response.step, ConversationStep::GlutenFreeEcosystem);
            assert!(response.bot_messages()[0].contains("Sorbetto al limone"));
            assert!(!response.bot_messages()[0].contains("Tiramisù"));
        }

        #[test]
        fn complete_menu_shows_gluten_free_pizza_cards() {
            let handler = handler();
            let mut state = in_ecosystem(&handler);
            let response = handler.handle(&mut state, values::GF_COMPLETE_MENU);

            let ids: Vec<&str> = response.cards().iter().map(|i| i.id().as_str()).collect();
            assert_eq!(ids, vec!["margherita-gf"]);
            assert!(response.bot_messages().contains(&copy::GF_CHOOSE_PIZZA));
        }

        #[test]
        fn pizzas_tagged_gluten_free_are_listed_and_pickable() {
            let handler = FlowHandler::new(Some(Arc::new(CatalogIndex::new(vec![
                item("margherita-gf", "Margherita senza glutine", "€ 8,00", &["senza-glutine"], &[]),
                item("bufala", "Bufala", "€ 9,00", &["classica"], &["senza-glutine"]),
                item("diavola", "Diavola", "€ 7,50", &["classica"], &["piccante"]),
            ]))))
            .with_typing_delay(0);

            let mut state = in_ecosystem(&handler);
            let menu = handler.handle(&mut state, values::GF_COMPLETE_MENU);
            let ids: Vec<&str> = menu.cards().iter().map(|i| i.id().as_str()).collect();
            assert_eq!(ids, vec!["margherita-gf", "bufala"]);

            let pizzas = handler.handle(&mut state, values::GF_PIZZAS);
            assert!(pizzas.cards().iter().any(|i| i.id().as_str() == "bufala"));
            assert!(pizzas.cards().iter().all(|i| i.id().as_str() != "diavola"));

            let picked = handler.handle(&mut state, "bufala");
            assert_eq!(picked.step, ConversationStep::CompanionSelection);
        }

        #[test]
        fn pizza_card_can_be_picked_from_the_ecosystem() {
            let handler = handler();
            let mut state = in_ecosystem(&handler);
            let response = handler.handle(&mut state, "margherita-gf");

            assert_eq!(response.step, ConversationStep::CompanionSelection);
        }
    }

    mod summary {
        use super::*;

        fn finished(handler: &FlowHandler) -> ConversationState {
            let mut state = opened(handler);
            drive(
                handler,
                &mut state,
                &["classica", values::SKIP, "margherita", values::NO_COMPANIONS],
            );
            state
        }

        #[test]
        fn order_summary_absorbs_navigation() {
            let handler = handler();
            let mut state = finished(&handler);

            for value in ["classica", values::SHOW_ALL, values::SHOW_CATEGORIES, "diavola"] {
                let response = handler.handle(&mut state, value);
                assert_eq!(response.bot_messages(), vec![copy::APOLOGY], "value {value}");
                assert_eq!(state.current_step(), ConversationStep::OrderSummary);
            }
        }

        #[test]
        fn view_full_menu_applies_the_filter_when_available() {
            let handler = handler().with_menu_filter(true);
            let mut state = finished(&handler);
            let response = handler.handle(&mut state, values::VIEW_FULL_MENU);

            assert!(response.steps.contains(&PresentationStep::ApplyMenuFilter {
                category: Category::Classica
            }));
            assert_eq!(state.current_step(), ConversationStep::OrderSummary);
            assert_eq!(
                response.option_values(),
                vec![values::VIEW_FULL_MENU, values::RESTART]
            );
        }

        #[test]
        fn view_full_menu_falls_back_to_text() {
            let handler = handler();
            let mut state = finished(&handler);
            let response = handler.handle(&mut state, values::VIEW_FULL_MENU);

            assert_eq!(response.bot_messages(), vec![copy::MENU_FILTER_FALLBACK]);
            assert!(!response
                .steps
                .iter()
                .any(|s| matches!(s, PresentationStep::ApplyMenuFilter { .. })));
        }

        #[test]
        fn restart_resets_everything() {
            let handler = handler();
            let mut state = finished(&handler);
            let id = *state.id();

            let response = handler.handle(&mut state, values::RESTART);

            assert!(response.resets);
            assert_eq!(response.step, ConversationStep::Greeting);
            assert_eq!(response.steps[1], PresentationStep::ClearMessages);
            assert_eq!(state.current_step(), ConversationStep::Greeting);
            assert!(state.selected_category().is_none());
            assert!(state.selected_item().is_none());
            assert_eq!(state.history_len(), 0);
            assert_eq!(state.id(), &id);
        }
    }

    mod without_catalog {
        use super::*;

        #[test]
        fn selection_answers_coming_soon() {
            let handler = FlowHandler::new(None).with_typing_delay(0);
            let mut state = opened(&handler);
            let response = handler.handle(&mut state, "vegana");

            assert_eq!(response.step, ConversationStep::PizzaSelection);
            assert_eq!(response.bot_messages(), vec![copy::COMING_SOON]);
            assert!(response.cards().is_empty());
            assert_eq!(
                response.option_values(),
                vec![values::SHOW_CATEGORIES, values::RESTART]
            );
        }

        #[test]
        fn gluten_free_ecosystem_answers_coming_soon() {
            for catalog in [None, Some(Arc::new(CatalogIndex::default()))] {
                let handler = FlowHandler::new(catalog).with_typing_delay(0);
                let mut state = opened(&handler);
                let response = handler.handle(&mut state, "senza-glutine");

                assert_eq!(response.step, ConversationStep::GlutenFreeEcosystem);
                assert_eq!(response.bot_messages(), vec![copy::COMING_SOON]);
                assert_eq!(
                    response.option_values(),
                    vec![values::SHOW_CATEGORIES, values::RESTART]
                );

                let back = handler.handle(&mut state, values::SHOW_CATEGORIES);
                assert_eq!(back.step, ConversationStep::CategorySelection);
            }
        }

        #[test]
        fn large_category_skips_refinement() {
            let handler = FlowHandler::new(Some(Arc::new(CatalogIndex::default())));
            let mut state = opened(&handler);
            let response = handler.handle(&mut state, "classica");

            assert_eq!(response.step, ConversationStep::PizzaSelection);
            assert_eq!(response.bot_messages(), vec![copy::COMING_SOON]);
        }
    }

    mod delays {
        use super::*;

        #[test]
        fn bot_messages_carry_the_configured_delay() {
            let handler = FlowHandler::new(Some(catalog())).with_typing_delay(250);
            let mut state = ConversationState::new();
            let response = handler.start(&mut state);

            assert!(response.steps.iter().all(|s| match s {
                PresentationStep::BotMessage { delay_ms, .. } => *delay_ms == 250,
                _ => true,
            }));
        }
    }
}
