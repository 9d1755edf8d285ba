//! Client-side filtering of as-you-type city suggestions.

use std::collections::HashSet;

use crate::model::{GeoMatch, Suggestion};

/// True when `text` is long enough to be worth a geocoding request.
/// Length is counted in characters, not bytes.
pub fn should_query(text: &str, min_len: usize) -> bool {
    text.chars().count() >= min_len
}

/// Keep matches whose lower-cased name starts with the lower-cased query,
/// dropping repeated (name, country) pairs. First occurrence wins and the
/// service's order is preserved.
pub fn filter_suggestions(query: &str, matches: Vec<GeoMatch>) -> Vec<Suggestion> {
    let prefix = query.to_lowercase();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    matches
        .into_iter()
        .filter(|m| m.name.to_lowercase().starts_with(&prefix))
        .filter(|m| seen.insert((m.name.clone(), m.country.clone())))
        .map(Suggestion::from)
        .collect()
}
