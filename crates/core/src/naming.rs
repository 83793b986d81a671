//! Sibling name disambiguation.
//!
//! Two documents under the same parent (or two pages in the same document)
//! may not share a name. A colliding name gets a `" (n)"` suffix with the
//! smallest free `n`, starting at 1.

/// Name given to a document created without an explicit name.
pub const DEFAULT_DOCUMENT_NAME: &str = "New Document";

/// Prefix for generated page names (`Page 1`, `Page 2`, ...).
pub const DEFAULT_PAGE_PREFIX: &str = "Page";

/// Name of the page every new document starts with.
pub fn first_page_name() -> String {
    numbered_page_name(1)
}

/// `Page {n}`.
pub fn numbered_page_name(n: usize) -> String {
    format!("{DEFAULT_PAGE_PREFIX} {n}")
}

/// Return `base` if it is free, otherwise `base (n)` for the smallest free
/// `n >= 1`.
///
/// # Examples
///
/// ```
/// use daybook_core::naming::unique_name;
///
/// let taken = ["New Document", "New Document (1)"];
/// assert_eq!(unique_name("Other", |n| taken.contains(&n)), "Other");
/// assert_eq!(unique_name("New Document", |n| taken.contains(&n)), "New Document (2)");
/// ```
pub fn unique_name(base: &str, is_taken: impl Fn(&str) -> bool) -> String {
    if !is_taken(base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{base} ({n})"))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// Next generated page name for a document that already has `page_count`
/// pages: `Page {count + 1}`, bumped until free.
pub fn next_page_name(page_count: usize, is_taken: impl Fn(&str) -> bool) -> String {
    (page_count + 1..)
        .map(numbered_page_name)
        .find(|candidate| !is_taken(candidate))
        .unwrap_or_else(first_page_name)
}
