//! Relevance ranking for the pizza list.

use crate::domain::catalog::MenuItem;

/// Maximum number of pizzas shown at once.
pub const DISPLAY_LIMIT: usize = 6;

const TAG_MATCH_WEIGHT: f64 = 3.0;
const POPULAR_WEIGHT: f64 = 2.0;
const BESTSELLER_WEIGHT: f64 = 2.0;
const HOT_WEIGHT: f64 = 1.0;
const PREMIUM_PENALTY: f64 = 0.5;

/// Scores an item against the tags the guest picked.
///
/// `3 × matching tags + 2 × popular + 2 × bestseller + 1 × hot − 0.5 × premium`
pub fn relevance_score<S: AsRef<str>>(item: &MenuItem, selected_tags: &[S]) -> f64 {
    let matching = selected_tags
        .iter()
        .filter(|t| item.has_tag(t.as_ref()))
        .count() as f64;

    let mut score = TAG_MATCH_WEIGHT * matching;
    if item.has_tag("popular") {
        score += POPULAR_WEIGHT;
    }
    if item.has_tag("bestseller") {
        score += BESTSELLER_WEIGHT;
    }
    if item.has_tag("hot") {
        score += HOT_WEIGHT;
    }
    if item.has_tag("premium") {
        score -= PREMIUM_PENALTY;
    }
    score
}

/// Orders items by descending relevance and keeps the first [`DISPLAY_LIMIT`].
///
/// The sort is stable: equal scores keep their input (catalog) order.
pub fn rank_by_relevance<'a, S: AsRef<str>>(
    items: &[&'a MenuItem],
    selected_tags: &[S],
) -> Vec<&'a MenuItem> {
    let mut scored: Vec<(f64, &'a MenuItem)> = items
        .iter()
        .map(|&item| (relevance_score(item, selected_tags), item))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(DISPLAY_LIMIT)
        .map(|(_, item)| item)
        .collect()
}
