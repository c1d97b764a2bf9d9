//! Menu item entity.
//!
//! A `MenuItem` is a read-only record loaded from the catalog data source.
//! Pizzas and companions share the same shape; companions carry a companion
//! slug (`beverages`, `frittatine`, `desserts`) in their category set.

use serde::{Deserialize, Serialize};

use super::category::{Category, CompanionKind, GLUTEN_FREE_SLUG};
use crate::domain::foundation::{ItemId, ValidationError};

/// A dish or drink on the menu.
///
/// # Invariants
///
/// - `name` and `price` are non-blank
/// - `category` has at least one entry
/// - category and tag labels are trimmed, lowercase and unique, in source order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    id: ItemId,
    name: String,
    #[serde(default)]
    description: String,
    price: String,
    category: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    image: Option<String>,
}

impl MenuItem {
    /// Starts building an item from its required fields.
    pub fn builder(
        id: ItemId,
        name: impl Into<String>,
        price: impl Into<String>,
    ) -> MenuItemBuilder {
        MenuItemBuilder {
            id,
            name: name.into(),
            description: String::new(),
            price: price.into(),
            category: Vec::new(),
            tags: Vec::new(),
            image: None,
        }
    }

    /// Checks the invariants.
    ///
    /// Items built through [`MenuItemBuilder`] always pass; items that arrive
    /// through deserialization may not.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if self.price.trim().is_empty() {
            return Err(ValidationError::empty_field("price"));
        }
        if self.category.iter().all(|c| c.trim().is_empty()) {
            return Err(ValidationError::empty_field("category"));
        }
        Ok(())
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Price as written in the catalog (`"€ 8,50"`).
    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn categories(&self) -> &[String] {
        &self.category
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn has_category(&self, slug: &str) -> bool {
        self.category.iter().any(|c| c == slug)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Returns the companion dataset this item belongs to, if any.
    pub fn companion_kind(&self) -> Option<CompanionKind> {
        CompanionKind::ALL
            .into_iter()
            .find(|kind| self.has_category(kind.slug()))
    }

    /// Returns true for pizzas, i.e. items outside every companion dataset.
    pub fn is_pizza(&self) -> bool {
        self.companion_kind().is_none()
    }

    /// Gluten-free items carry the slug either as category or as tag.
    pub fn is_gluten_free(&self) -> bool {
        self.has_category(GLUTEN_FREE_SLUG) || self.has_tag(GLUTEN_FREE_SLUG)
    }

    /// Whether the item is listed under `category`. `All` takes everything
    /// and the gluten-free category follows `is_gluten_free`.
    pub fn belongs_to(&self, category: Category) -> bool {
        match category {
            Category::All => true,
            Category::SenzaGlutine => self.is_gluten_free(),
            other => self.has_category(other.slug()),
        }
    }

    /// Parses the price string into euro cents.
    ///
    /// Accepts `"€ 8,50"`, `"8.50€"`, `"€7"`, `"12 EUR"`. Returns `None` when
    /// the string holds no readable amount.
    pub fn price_cents(&self) -> Option<u64> {
        parse_price_cents(&self.price)
    }
}

/// Builder for [`MenuItem`] that normalises label lists.
#[derive(Debug, Clone)]
pub struct MenuItemBuilder {
    id: ItemId,
    name: String,
    description: String,
    price: String,
    category: Vec<String>,
    tags: Vec<String>,
    image: Option<String>,
}

impl MenuItemBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into().trim().to_string();
        self
    }

    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.category = normalize_labels(categories);
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = normalize_labels(tags);
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        let image = image.into();
        let trimmed = image.trim();
        self.image = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Builds the item.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if name, price or category set is blank
    pub fn build(self) -> Result<MenuItem, ValidationError> {
        let item = MenuItem {
            id: self.id,
            name: self.name.trim().to_string(),
            description: self.description,
            price: self.price.trim().to_string(),
            category: self.category,
            tags: self.tags,
            image: self.image,
        };
        item.validate()?;
        Ok(item)
    }
}

fn normalize_labels<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for label in labels {
        let label = label.as_ref().trim().to_lowercase();
        if !label.is_empty() && !out.contains(&label) {
            out.push(label);
        }
    }
    out
}

/// Parses a currency string into cents.
pub fn parse_price_cents(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .replace("EUR", "")
        .replace("eur", "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '€')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = cleaned.replace(',', ".");
    let (whole, fraction) = match normalized.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (normalized.as_str(), ""),
    };

    if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if fraction.len() > 2 || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let whole: u64 = whole.parse().ok()?;
    let cents: u64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<u64>().ok()? * 10,
        _ => fraction.parse().ok()?,
    };
    whole.checked_mul(100)?.checked_add(cents)
}

/// Formats cents the way the menu prints prices (`"€ 12,50"`).
pub fn format_price_cents(cents: u64) -> String {
    format!("€ {},{:02}", cents / 100, cents % 100)
}
