#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} '{key}'")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A rename or move target collides with an existing sibling.
    #[error("Name already exists: {0}")]
    NameExists(String),

    /// The destination is the source itself or lies inside its subtree.
    #[error("Cannot move '{src}' into '{dst}': destination is inside its own subtree")]
    IllegalMove { src: String, dst: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a missing entity keyed by a path or name.
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    /// Whether this error is a recoverable rejection of user input, as
    /// opposed to an internal fault.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}
