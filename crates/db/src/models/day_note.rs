//! Notes attached to a calendar day.

use chrono::NaiveDate;
use daybook_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `DayNotes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DayNote {
    pub day: NaiveDate,
    pub text: String,
    pub last_modified: Timestamp,
}
