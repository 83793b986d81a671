//! Path algebra for document locations.
//!
//! A document's identity is its `location` string, e.g. `Parent/Child`. The
//! tree is implicit in these strings: `A/B` is a child of `A` because it
//! starts with `A/`. Every prefix test in this module respects the delimiter
//! boundary, so `AX` is never treated as living under `A`.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Separator between path segments.
pub const DELIMITER: char = '/';

/// Maximum allowed length for a single document or page name.
pub const MAX_NAME_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Decomposition
// ---------------------------------------------------------------------------

/// Parent prefix of `path`, or `None` for a root-level document.
pub fn parent_of(path: &str) -> Option<&str> {
    path.rfind(DELIMITER).map(|idx| &path[..idx])
}

/// Last segment of `path`.
pub fn leaf_of(path: &str) -> &str {
    match path.rfind(DELIMITER) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Join a parent prefix and a leaf name. An absent or empty parent means
/// the root.
pub fn join(parent: Option<&str>, leaf: &str) -> String {
    match parent {
        Some(parent) if !parent.is_empty() => format!("{parent}{DELIMITER}{leaf}"),
        _ => leaf.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Relationships
// ---------------------------------------------------------------------------

/// `path` is `ancestor` itself or lies anywhere beneath it.
pub fn is_within(path: &str, ancestor: &str) -> bool {
    path == ancestor || is_strict_descendant(path, ancestor)
}

/// `path` lies beneath `ancestor` (and is not `ancestor` itself).
fn is_strict_descendant(path: &str, ancestor: &str) -> bool {
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path[ancestor.len()..].starts_with(DELIMITER)
}

/// Both paths share the same parent prefix (both may be root-level).
pub fn same_parent(a: &str, b: &str) -> bool {
    parent_of(a) == parent_of(b)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a single document or page name: non-empty, no delimiter, within
/// [`MAX_NAME_LENGTH`].
pub fn validate_leaf_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Name must not be empty".to_string()));
    }
    if name.contains(DELIMITER) {
        return Err(CoreError::Validation(format!(
            "Name must not contain '{DELIMITER}': {name}"
        )));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Name must not exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a full location: every segment must be a valid name.
pub fn validate_path(path: &str) -> Result<(), CoreError> {
    if path.is_empty() {
        return Err(CoreError::Validation("Path must not be empty".to_string()));
    }
    for segment in path.split(DELIMITER) {
        if segment.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Path contains an empty segment: {path}"
            )));
        }
        if segment.chars().count() > MAX_NAME_LENGTH {
            return Err(CoreError::Validation(format!(
                "Path segment exceeds {MAX_NAME_LENGTH} characters: {path}"
            )));
        }
    }
    Ok(())
}
