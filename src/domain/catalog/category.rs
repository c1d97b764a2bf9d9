//! Menu categories and companion kinds.
//!
//! Both are closed sets. Categories drive catalog filtering and conversation
//! branching; companion kinds label the side datasets (beverages, frittatine,
//! desserts) suggested next to a pizza.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Slug shared by the gluten-free category and gluten-free companions.
pub const GLUTEN_FREE_SLUG: &str = "senza-glutine";

/// Top-level pizza category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "all")]
    All,
    #[serde(rename = "classica")]
    Classica,
    #[serde(rename = "pizze-d'autore")]
    PizzeDAutore,
    #[serde(rename = "vegana")]
    Vegana,
    #[serde(rename = "senza-glutine")]
    SenzaGlutine,
}

impl Category {
    /// Categories a guest can pick from the category step, in display order.
    pub const SELECTABLE: [Category; 4] = [
        Category::Classica,
        Category::PizzeDAutore,
        Category::Vegana,
        Category::SenzaGlutine,
    ];

    /// Returns the slug used in catalog rows and option values.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Classica => "classica",
            Self::PizzeDAutore => "pizze-d'autore",
            Self::Vegana => "vegana",
            Self::SenzaGlutine => GLUTEN_FREE_SLUG,
        }
    }

    /// Returns the label shown on buttons and in messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "Tutte le pizze",
            Self::Classica => "Classiche",
            Self::PizzeDAutore => "Pizze d'autore",
            Self::Vegana => "Vegane",
            Self::SenzaGlutine => "Senza glutine",
        }
    }

    /// One-line description offered next to the category button.
    pub fn blurb(&self) -> &'static str {
        match self {
            Self::All => "Tutto il nostro menu",
            Self::Classica => "I grandi classici della tradizione napoletana",
            Self::PizzeDAutore => "Le creazioni dei nostri pizzaioli",
            Self::Vegana => "Gusto pieno, zero ingredienti animali",
            Self::SenzaGlutine => "Impasto certificato e percorso dedicato",
        }
    }

    /// Large categories get a tag-refinement step before the pizza list.
    pub fn is_large(&self) -> bool {
        matches!(self, Self::Classica | Self::PizzeDAutore)
    }

    /// Returns true for the gluten-free category.
    pub fn is_gluten_free(&self) -> bool {
        matches!(self, Self::SenzaGlutine)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "classica" => Ok(Self::Classica),
            "pizze-d'autore" => Ok(Self::PizzeDAutore),
            "vegana" => Ok(Self::Vegana),
            GLUTEN_FREE_SLUG => Ok(Self::SenzaGlutine),
            _ => Err(ValidationError::unknown_value("category", s)),
        }
    }
}

/// Side dataset a companion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanionKind {
    Beverages,
    Frittatine,
    Desserts,
}

impl CompanionKind {
    pub const ALL: [CompanionKind; 3] = [
        CompanionKind::Beverages,
        CompanionKind::Frittatine,
        CompanionKind::Desserts,
    ];

    /// Returns the slug carried in the category set of companion items.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Beverages => "beverages",
            Self::Frittatine => "frittatine",
            Self::Desserts => "desserts",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Beverages => "Bevande",
            Self::Frittatine => "Frittatine",
            Self::Desserts => "Dolci",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Beverages => "🍺",
            Self::Frittatine => "🍝",
            Self::Desserts => "🍰",
        }
    }
}

impl fmt::Display for CompanionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for CompanionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beverages" => Ok(Self::Beverages),
            "frittatine" | "frittatinas" => Ok(Self::Frittatine),
            "desserts" => Ok(Self::Desserts),
            _ => Err(ValidationError::unknown_value("companion_kind", s)),
        }
    }
}
