use crate::error::{AppError, AppResult};

/// Storage engines the application can run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite,
}

impl StorageBackend {
    /// Select the backend from the scheme of a database URL.
    ///
    /// Legacy MySQL databases are not supported; they must be exported to
    /// SQLite first.
    pub fn from_url(url: &str) -> AppResult<Self> {
        let scheme = url.split(':').next().unwrap_or_default();
        match scheme {
            "sqlite" => Ok(Self::Sqlite),
            "mysql" => Err(AppError::Config(
                "MySQL storage is no longer supported; use a sqlite:// URL".to_string(),
            )),
            other => Err(AppError::Config(format!(
                "Unsupported database URL scheme '{other}'"
            ))),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration loaded from environment variables.
///
/// All fields have defaults suitable for a single local user.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database URL (default: `sqlite://daybook.db`).
    pub database_url: String,
    /// Backend selected from the URL scheme.
    pub backend: StorageBackend,
    /// Pool size (default: `5`).
    pub max_connections: u32,
    /// Log format (default: `pretty`).
    pub log_format: LogFormat,
    /// Characters kept in search previews (default: `200`).
    pub search_preview_chars: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            backend: StorageBackend::Sqlite,
            max_connections: 5,
            log_format: LogFormat::Pretty,
            search_preview_chars: daybook_core::search::DEFAULT_PREVIEW_CHARS,
        }
    }
}

const DEFAULT_DATABASE_URL: &str = "sqlite://daybook.db";

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default               |
    /// |------------------------|-----------------------|
    /// | `DATABASE_URL`         | `sqlite://daybook.db` |
    /// | `DB_MAX_CONNECTIONS`   | `5`                   |
    /// | `LOG_FORMAT`           | `pretty`              |
    /// | `SEARCH_PREVIEW_CHARS` | `200`                 |
    pub fn from_env() -> AppResult<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into());
        let backend = StorageBackend::from_url(&database_url)?;

        let max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .map_err(|_| AppError::Config("DB_MAX_CONNECTIONS must be a valid u32".into()))?;

        let log_format = match std::env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "pretty".into())
            .as_str()
        {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            other => {
                return Err(AppError::Config(format!(
                    "LOG_FORMAT must be 'pretty' or 'json', got '{other}'"
                )))
            }
        };

        let search_preview_chars: usize = std::env::var("SEARCH_PREVIEW_CHARS")
            .unwrap_or_else(|_| daybook_core::search::DEFAULT_PREVIEW_CHARS.to_string())
            .parse()
            .map_err(|_| AppError::Config("SEARCH_PREVIEW_CHARS must be a valid usize".into()))?;

        Ok(Self {
            database_url,
            backend,
            max_connections,
            log_format,
            search_preview_chars,
        })
    }

    /// Replace the database URL (e.g. from a command-line flag), re-selecting
    /// the backend.
    pub fn with_database_url(mut self, database_url: Option<String>) -> AppResult<Self> {
        if let Some(url) = database_url {
            self.backend = StorageBackend::from_url(&url)?;
            self.database_url = url;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn sqlite_urls_select_sqlite() {
        assert_eq!(
            StorageBackend::from_url("sqlite://daybook.db").unwrap(),
            StorageBackend::Sqlite
        );
        assert_eq!(
            StorageBackend::from_url("sqlite::memory:").unwrap(),
            StorageBackend::Sqlite
        );
    }

    #[test]
    fn other_schemes_are_rejected() {
        assert_matches!(
            StorageBackend::from_url("mysql://localhost/notes"),
            Err(AppError::Config(_))
        );
        assert_matches!(
            StorageBackend::from_url("postgres://x"),
            Err(AppError::Config(_))
        );
    }

    #[test]
    fn override_replaces_url() {
        let config = AppConfig::default()
            .with_database_url(Some("sqlite://other.db".into()))
            .unwrap();
        assert_eq!(config.database_url, "sqlite://other.db");

        let unchanged = AppConfig::default().with_database_url(None).unwrap();
        assert_eq!(unchanged.database_url, "sqlite://daybook.db");
    }
}
