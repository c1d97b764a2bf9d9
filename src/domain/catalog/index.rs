//! Catalog index.
//!
//! In-memory, read-only lookup over the menu. Built once from a list of items
//! (or raw rows) and shared behind an `Arc` by everything that needs it.

use std::collections::HashMap;

use tracing::warn;

use super::category::{Category, CompanionKind};
use super::menu_item::MenuItem;
use super::row::CatalogRow;

/// Tags that feed relevance scoring and are never offered as refinements.
pub const SIGNAL_TAGS: &[&str] = &["popular", "bestseller", "hot", "premium"];

/// Maximum number of tags offered in the refinement step.
pub const REFINEMENT_TAG_LIMIT: usize = 4;

/// Read-only index of menu items.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    items: Vec<MenuItem>,
    by_id: HashMap<String, usize>,
}

impl CatalogIndex {
    /// Builds an index, keeping the first item for each duplicated id.
    pub fn new(items: impl IntoIterator<Item = MenuItem>) -> Self {
        let mut index = Self::default();
        for item in items {
            index.insert(item);
        }
        index
    }

    /// Builds an index from raw rows, dropping the malformed ones.
    pub fn from_rows(rows: impl IntoIterator<Item = CatalogRow>) -> Self {
        let mut index = Self::default();
        for (position, row) in rows.into_iter().enumerate() {
            match row.into_menu_item() {
                Ok(item) => index.insert(item),
                Err(e) => warn!(row = position, error = %e, "Dropping malformed catalog row"),
            }
        }
        index
    }

    fn insert(&mut self, item: MenuItem) {
        let key = item.id().as_str().to_string();
        if self.by_id.contains_key(&key) {
            warn!(id = %key, "Dropping duplicate catalog item");
            return;
        }
        self.by_id.insert(key, self.items.len());
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Every item, pizzas and companions, in catalog order.
    pub fn get_all(&self) -> &[MenuItem] {
        &self.items
    }

    /// Looks an item up by id; unknown ids yield `None`.
    pub fn get_by_id(&self, id: &str) -> Option<&MenuItem> {
        self.by_id.get(id.trim()).map(|&i| &self.items[i])
    }

    /// Pizzas in a category; `Category::All` yields every pizza.
    pub fn get_by_category(&self, category: Category) -> Vec<&MenuItem> {
        self.pizzas().filter(|item| item.belongs_to(category)).collect()
    }

    /// Items carrying any of the given tags, in catalog order.
    pub fn get_by_tags<S: AsRef<str>>(&self, tags: &[S]) -> Vec<&MenuItem> {
        self.items
            .iter()
            .filter(|item| tags.iter().any(|t| item.has_tag(t.as_ref())))
            .collect()
    }

    pub fn pizzas(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.iter().filter(|item| item.is_pizza())
    }

    /// Items of one companion dataset, in catalog order.
    pub fn companions(&self, kind: CompanionKind) -> Vec<&MenuItem> {
        self.items
            .iter()
            .filter(|item| item.has_category(kind.slug()))
            .collect()
    }

    /// Gluten-free subset of one companion dataset.
    pub fn gluten_free_companions(&self, kind: CompanionKind) -> Vec<&MenuItem> {
        self.companions(kind)
            .into_iter()
            .filter(|item| item.is_gluten_free())
            .collect()
    }

    /// Tags suggested in the refinement step for a category.
    ///
    /// Only large categories get suggestions. Tags are ordered by how many of
    /// the category's pizzas carry them, ties broken by first appearance.
    pub fn refinement_tags(&self, category: Category) -> Vec<String> {
        if !category.is_large() {
            return Vec::new();
        }

        let mut counts: Vec<(String, usize)> = Vec::new();
        for item in self.get_by_category(category) {
            for tag in item.tags() {
                if SIGNAL_TAGS.contains(&tag.as_str()) || tag == category.slug() {
                    continue;
                }
                match counts.iter_mut().find(|(t, _)| t == tag) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((tag.clone(), 1)),
                }
            }
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
            .into_iter()
            .take(REFINEMENT_TAG_LIMIT)
            .map(|(tag, _)| tag)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ItemId;

    fn item(id: &str, categories: &[&str], tags: &[&str]) -> MenuItem {
        MenuItem::builder(ItemId::new(id).unwrap(), id.to_uppercase(), "€ 8,00")
            .categories(categories)
            .tags(tags)
            .build()
            .unwrap()
    }

    fn catalog() -> CatalogIndex {
        CatalogIndex::new(vec![
            item("margherita", &["classica"], &["tradizionale", "popular", "vegetariana"]),
            item("diavola", &["classica"], &["piccante", "hot", "tradizionale"]),
            item("capricciosa", &["classica"], &["tradizionale", "ricca"]),
            item("tartufo", &["pizze-d'autore"], &["gourmet", "premium"]),
            item("ortolana", &["vegana", "senza-glutine"], &["verdure"]),
            item("birra", &["beverages"], &["artigianale"]),
            item("birra-gf", &["beverages", "senza-glutine"], &[]),
            item("tiramisu", &["desserts"], &["tradizionale"]),
        ])
    }

    mod lookups {
        use super::*;

        #[test]
        fn get_by_id_finds_items_and_ignores_whitespace() {
            let catalog = catalog();
            assert_eq!(catalog.get_by_id(" diavola ").unwrap().name(), "DIAVOLA");
        }

        #[test]
        fn get_by_id_returns_none_for_unknown() {
            assert!(catalog().get_by_id("hawaii").is_none());
        }

        #[test]
        fn get_by_category_all_returns_pizzas_only() {
            let catalog = catalog();
            let all = catalog.get_by_category(Category::All);
            assert_eq!(all.len(), 5);
            assert!(all.iter().all(|i| i.is_pizza()));
        }

        #[test]
        fn get_by_category_filters_by_slug() {
            let catalog = catalog();
            let gf = catalog.get_by_category(Category::SenzaGlutine);
            assert_eq!(gf.len(), 1);
            assert_eq!(gf[0].id().as_str(), "ortolana");
        }

        #[test]
        fn gluten_free_category_includes_tagged_pizzas() {
            let catalog = CatalogIndex::new(vec![
                item("margherita", &["classica"], &["tradizionale"]),
                item("bufala", &["classica"], &["senza-glutine"]),
                item("ortolana", &["vegana", "senza-glutine"], &[]),
                item("birra-gf", &["beverages"], &["senza-glutine"]),
            ]);
            let ids: Vec<&str> = catalog
                .get_by_category(Category::SenzaGlutine)
                .iter()
                .map(|i| i.id().as_str())
                .collect();
            assert_eq!(ids, vec!["bufala", "ortolana"]);
        }

        #[test]
        fn get_by_tags_is_a_union_in_catalog_order() {
            let catalog = catalog();
            let ids: Vec<_> = catalog
                .get_by_tags(&["piccante", "gourmet"])
                .iter()
                .map(|i| i.id().as_str())
                .collect();
            assert_eq!(ids, vec!["diavola", "tartufo"]);
        }

        #[test]
        fn gluten_free_companions_filter_the_kind() {
            let catalog = catalog();
            let ids: Vec<_> = catalog
                .gluten_free_companions(CompanionKind::Beverages)
                .iter()
                .map(|i| i.id().as_str())
                .collect();
            assert_eq!(ids, vec!["birra-gf"]);
        }
    }

    mod construction {
        use super::*;

        #[test]
        fn duplicate_ids_keep_the_first_item() {
            let catalog = CatalogIndex::new(vec![
                item("margherita", &["classica"], &[]),
                item("margherita", &["vegana"], &[]),
            ]);
            assert_eq!(catalog.len(), 1);
            assert!(catalog.get_by_id("margherita").unwrap().has_category("classica"));
        }

        #[test]
        fn from_rows_drops_malformed_rows() {
            let rows = vec![
                CatalogRow {
                    id: Some("margherita".into()),
                    name: Some("Margherita".into()),
                    price: Some("€ 6".into()),
                    category: Some("classica".into()),
                    ..Default::default()
                },
                CatalogRow {
                    id: Some("broken".into()),
                    ..Default::default()
                },
            ];
            let catalog = CatalogIndex::from_rows(rows);
            assert_eq!(catalog.len(), 1);
            assert!(catalog.get_by_id("broken").is_none());
        }

        #[test]
        fn empty_index_reports_empty() {
            assert!(CatalogIndex::default().is_empty());
        }
    }

    mod refinement_tags {
        use super::*;

        #[test]
        fn most_frequent_tags_first_without_signal_tags() {
            let tags = catalog().refinement_tags(Category::Classica);
            assert_eq!(tags[0], "tradizionale");
            assert!(!tags.iter().any(|t| SIGNAL_TAGS.contains(&t.as_str())));
            assert!(tags.len() <= REFINEMENT_TAG_LIMIT);
        }

        #[test]
        fn small_categories_have_no_refinement() {
            assert!(catalog().refinement_tags(Category::Vegana).is_empty());
            assert!(catalog().refinement_tags(Category::SenzaGlutine).is_empty());
        }
    }
}
