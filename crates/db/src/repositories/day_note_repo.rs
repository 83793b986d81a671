//! Repository for the `DayNotes` table.

use chrono::NaiveDate;
use daybook_core::types::Timestamp;
use sqlx::{Executor, Sqlite};

use crate::models::day_note::DayNote;

/// Column list for day note queries.
const COLUMNS: &str = "day, text, lastModified AS last_modified";

/// Provides CRUD operations for calendar day notes.
pub struct DayNoteRepo;

impl DayNoteRepo {
    /// Find the note for a day.
    pub async fn find<'e, E>(executor: E, day: NaiveDate) -> Result<Option<DayNote>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("SELECT {COLUMNS} FROM DayNotes WHERE day = ?1");
        sqlx::query_as::<_, DayNote>(&query)
            .bind(day)
            .fetch_optional(executor)
            .await
    }

    /// Insert or replace the note for a day.
    pub async fn upsert<'e, E>(
        executor: E,
        day: NaiveDate,
        text: &str,
        now: Timestamp,
    ) -> Result<(), sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "INSERT INTO DayNotes (day, text, lastModified) VALUES (?1, ?2, ?3)
             ON CONFLICT (day) DO UPDATE SET text = excluded.text,
                                             lastModified = excluded.lastModified",
        )
        .bind(day)
        .bind(text)
        .bind(now)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Delete the note for a day.
    ///
    /// Returns `true` if a row was deleted, `false` if not found.
    pub async fn delete<'e, E>(executor: E, day: NaiveDate) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM DayNotes WHERE day = ?1")
            .bind(day)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Days in `[start, end)` that have a note, ascending.
    pub async fn days_between<'e, E>(
        executor: E,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<NaiveDate>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows: Vec<(NaiveDate,)> = sqlx::query_as(
            "SELECT day FROM DayNotes WHERE day >= ?1 AND day < ?2 ORDER BY day ASC",
        )
        .bind(start)
        .bind(end)
        .fetch_all(executor)
        .await?;
        Ok(rows.into_iter().map(|(day,)| day).collect())
    }
}
