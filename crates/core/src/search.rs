//! Multi-term page search matching.
//!
//! A page matches when its text contains every term. Comparison is
//! case-insensitive: both sides are uppercased before the containment test.

/// Default number of characters kept in a search hit preview.
pub const DEFAULT_PREVIEW_CHARS: usize = 200;

/// Split a raw query into uppercased, whitespace-separated terms.
pub fn parse_terms(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_uppercase).collect()
}

/// `text` contains every term of `terms` (already uppercased by
/// [`parse_terms`]). An empty term list matches nothing.
pub fn matches_all(text: &str, terms: &[String]) -> bool {
    if terms.is_empty() {
        return false;
    }
    let haystack = text.to_uppercase();
    terms.iter().all(|term| haystack.contains(term.as_str()))
}

/// First `max_chars` characters of `text`, cut on a character boundary.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
