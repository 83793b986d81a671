use daybook_core::error::CoreError;

/// Application-level error type for services and commands.
///
/// Wraps [`CoreError`] for domain rejections and adds storage, startup and
/// output failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `daybook_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying the embedded schema failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Invalid or unsupported configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading confirmation input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Command output could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for service return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Whether the operation was refused because of its input. Rejections
    /// leave storage unchanged and are shown as warnings; everything else is
    /// a fault worth logging.
    pub fn is_rejection(&self) -> bool {
        match self {
            AppError::Core(core) => core.is_rejection(),
            _ => false,
        }
    }
}
