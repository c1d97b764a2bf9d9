//! Raw catalog rows.
//!
//! Rows mirror the spreadsheet layout the menu is maintained in: every column
//! is optional text, list columns are comma separated.

use serde::{Deserialize, Serialize};

use super::menu_item::MenuItem;
use crate::domain::foundation::{ItemId, ValidationError};

/// One spreadsheet row as delivered by a catalog source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogRow {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    /// Comma-separated category slugs.
    pub category: Option<String>,
    /// Comma-separated tags.
    pub tags: Option<String>,
    pub image: Option<String>,
}

impl CatalogRow {
    /// Normalises the row into a [`MenuItem`].
    ///
    /// # Errors
    ///
    /// - `EmptyField` when `id`, `name`, `price` or `category` is missing
    pub fn into_menu_item(self) -> Result<MenuItem, ValidationError> {
        let id = ItemId::new(required(self.id, "id")?)?;
        let name = required(self.name, "name")?;
        let price = required(self.price, "price")?;
        let category = required(self.category, "category")?;

        let mut builder = MenuItem::builder(id, name, price)
            .categories(split_list(&category))
            .tags(split_list(self.tags.as_deref().unwrap_or_default()));
        if let Some(description) = self.description {
            builder = builder.description(description);
        }
        if let Some(image) = self.image {
            builder = builder.image(image);
        }
        builder.build()
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::empty_field(field)),
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> CatalogRow {
        CatalogRow {
            id: Some("diavola".into()),
            name: Some("Diavola".into()),
            description: Some("Salame piccante".into()),
            price: Some("€ 8,00".into()),
            category: Some("classica, senza-glutine".into()),
            tags: Some("hot,popular, ,".into()),
            image: None,
        }
    }

    #[test]
    fn splits_comma_lists() {
        let item = row().into_menu_item().unwrap();
        assert_eq!(item.categories(), &["classica", "senza-glutine"]);
        assert_eq!(item.tags(), &["hot", "popular"]);
    }

    #[test]
    fn missing_tags_column_is_fine() {
        let item = CatalogRow { tags: None, ..row() }.into_menu_item().unwrap();
        assert!(item.tags().is_empty());
    }

    #[test]
    fn missing_price_is_rejected() {
        let err = CatalogRow { price: None, ..row() }.into_menu_item().unwrap_err();
        assert_eq!(err, ValidationError::empty_field("price"));
    }

    #[test]
    fn blank_id_is_rejected() {
        let err = CatalogRow { id: Some("  ".into()), ..row() }
            .into_menu_item()
            .unwrap_err();
        assert_eq!(err, ValidationError::empty_field("id"));
    }

    #[test]
    fn deserializes_with_missing_columns() {
        let row: CatalogRow = serde_json::from_str(r#"{"id":"x","name":"X"}"#).unwrap();
        assert_eq!(row.price, None);
    }
}
