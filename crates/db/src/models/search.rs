use serde::Serialize;

/// One page matching every search term.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub location: String,
    pub name: String,
    /// Leading characters of the page text.
    pub preview: String,
}
