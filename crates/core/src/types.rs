/// All database primary keys are SQLite INTEGER rowids.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Ordering key shared by `docOrder`, `pageOrder` and `taskOrder`.
pub type OrderValue = i64;
