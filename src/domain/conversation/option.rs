//! Selectable options offered to the guest.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Category, CompanionKind};

/// Option values with a fixed meaning at every step.
pub mod values {
    pub const RESTART: &str = "restart_chat";
    pub const SHOW_CATEGORIES: &str = "show_categories";
    pub const SHOW_ALL: &str = "show_all";
    pub const VIEW_FULL_MENU: &str = "view_full_menu";
    pub const SKIP: &str = "skip";
    pub const NO_COMPANIONS: &str = "no_companions";

    pub const GF_PIZZAS: &str = "gf_pizzas";
    pub const GF_BEVERAGES: &str = "gf_beverages";
    pub const GF_FRITTATINE: &str = "gf_frittatine";
    pub const GF_DESSERTS: &str = "gf_desserts";
    pub const GF_COMPLETE_MENU: &str = "gf_complete_menu";
}

/// A choice presented at the current step.
///
/// `value` is opaque to the presentation layer and is handed back verbatim
/// when the guest clicks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatOption {
    pub text: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ChatOption {
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(category: Category) -> Self {
        Self::new(category.label(), category.slug()).with_description(category.blurb())
    }

    pub fn companion_kind(kind: CompanionKind) -> Self {
        Self::new(format!("{} {}", kind.emoji(), kind.label()), kind.slug())
    }

    pub fn tag(tag: &str) -> Self {
        let mut chars = tag.chars();
        let text = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        Self::new(text, tag)
    }

    pub fn restart() -> Self {
        Self::new("🔄 Ricomincia", values::RESTART)
    }

    pub fn show_categories() -> Self {
        Self::new("📋 Vedi categorie", values::SHOW_CATEGORIES)
    }

    pub fn show_all() -> Self {
        Self::new("🍕 Tutte le pizze", values::SHOW_ALL)
    }

    pub fn view_full_menu() -> Self {
        Self::new("📖 Apri il menu completo", values::VIEW_FULL_MENU)
    }
}
