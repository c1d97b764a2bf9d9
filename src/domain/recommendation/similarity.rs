//! Item-to-item similarity for "you may also like" suggestions.

use crate::domain::catalog::{CatalogIndex, MenuItem};

/// `2 × shared categories + 1 × shared tags`.
pub fn similarity_of(a: &MenuItem, b: &MenuItem) -> u32 {
    let shared_categories = a.categories().iter().filter(|c| b.has_category(c)).count();
    let shared_tags = a.tags().iter().filter(|t| b.has_tag(t)).count();
    (2 * shared_categories + shared_tags) as u32
}

/// Other pizzas most similar to `item`, best first, ties in catalog order.
///
/// Pizzas sharing nothing with `item` are never suggested.
pub fn similar_items<'a>(catalog: &'a CatalogIndex, item: &MenuItem, limit: usize) -> Vec<&'a MenuItem> {
    let mut scored: Vec<(u32, &'a MenuItem)> = catalog
        .pizzas()
        .filter(|other| other.id() != item.id())
        .map(|other| (similarity_of(item, other), other))
        .filter(|(score, _)| *score > 0)
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(limit).map(|(_, other)| other).collect()
}
