//! Companion suggestions (beverages, frittatine, desserts) for a pizza category.

use crate::domain::catalog::{CatalogIndex, Category, CompanionKind, MenuItem};

/// Maximum number of companions shown for one kind.
pub const COMPANION_LIMIT: usize = 4;

/// Companion tags that pair well with a pizza category.
///
/// An empty list means "no preference": the whole dataset is offered.
pub fn preferred_tags(category: Category, kind: CompanionKind) -> &'static [&'static str] {
    use Category::*;
    use CompanionKind::*;
    match (category, kind) {
        (Classica, Beverages) => &["birra", "classico"],
        (Classica, Frittatine) => &["tradizionale", "classico"],
        (Classica, Desserts) => &["tradizionale"],
        (PizzeDAutore, Beverages) => &["vino", "artigianale"],
        (PizzeDAutore, Frittatine) => &["gourmet"],
        (PizzeDAutore, Desserts) => &["gourmet", "artigianale"],
        (Vegana, _) => &["vegano"],
        (All, _) | (SenzaGlutine, _) => &[],
    }
}

/// Companions of `kind` to suggest after a pizza from `category`.
///
/// Items matching the pairing table come first; if none match, the whole
/// dataset is used. For the gluten-free category the lookup is redirected to
/// the dataset's gluten-free subset and the pairing table is ignored.
pub fn companions_for(
    catalog: &CatalogIndex,
    category: Category,
    kind: CompanionKind,
) -> Vec<&MenuItem> {
    if category.is_gluten_free() {
        let mut subset = catalog.gluten_free_companions(kind);
        subset.truncate(COMPANION_LIMIT);
        return subset;
    }

    let pool = catalog.companions(kind);
    let preferred = preferred_tags(category, kind);
    let (mut matching, rest): (Vec<&MenuItem>, Vec<&MenuItem>) = pool
        .into_iter()
        .partition(|item| preferred.iter().any(|tag| item.has_tag(tag)));

    if matching.is_empty() {
        matching = rest;
    }
    matching.truncate(COMPANION_LIMIT);
    matching
}
