//! Repository for the `Docs` table.
//!
//! Document-level statements match a whole subtree: the exact location plus
//! every location starting with `location/`. The prefix test is written with
//! `substr` instead of `LIKE` so it stays case-sensitive and never treats
//! `%` or `_` in a name as wildcards.

use daybook_core::types::{DbId, OrderValue, Timestamp};
use sqlx::{Executor, Sqlite};

use crate::models::path_entry::{CreatePathEntry, DocumentOrder, PageSummary, PathEntry};

/// Column list for full-row queries.
const COLUMNS: &str = "id, name, location, text, lastModified AS last_modified, \
    indentLevel AS indent_level, docOrder AS doc_order, pageOrder AS page_order";

/// Column list for page listings.
const PAGE_COLUMNS: &str = "name, indentLevel AS indent_level, pageOrder AS page_order, \
    lastModified AS last_modified";

/// Predicate matching the location bound to `?1` and all of its descendants.
const SUBTREE: &str = "(location = ?1 OR substr(location, 1, length(?1) + 1) = ?1 || '/')";

/// Provides queries over documents and pages.
pub struct PathEntryRepo;

impl PathEntryRepo {
    // -----------------------------------------------------------------------
    // Inserts
    // -----------------------------------------------------------------------

    /// Insert one row, returning its id.
    pub async fn create<'e, E>(
        executor: E,
        input: &CreatePathEntry,
        now: Timestamp,
    ) -> Result<DbId, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "INSERT INTO Docs
                (name, location, text, lastModified, indentLevel, docOrder, pageOrder)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&input.name)
        .bind(&input.location)
        .bind(&input.text)
        .bind(now)
        .bind(input.indent_level)
        .bind(input.doc_order)
        .bind(input.page_order)
        .execute(executor)
        .await?;
        Ok(result.last_insert_rowid())
    }

    // -----------------------------------------------------------------------
    // Documents
    // -----------------------------------------------------------------------

    /// Every distinct location with its order, smallest `docOrder` first.
    /// Ties fall back to creation order.
    pub async fn list_documents<'e, E>(executor: E) -> Result<Vec<DocumentOrder>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, DocumentOrder>(
            "SELECT location, MIN(docOrder) AS doc_order
             FROM Docs
             GROUP BY location
             ORDER BY doc_order ASC, MIN(id) ASC",
        )
        .fetch_all(executor)
        .await
    }

    /// Whether any row has exactly this location.
    pub async fn document_exists<'e, E>(executor: E, location: &str) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM Docs WHERE location = ?1")
            .bind(location)
            .fetch_one(executor)
            .await?;
        Ok(row.0 > 0)
    }

    /// Whether any row lies at or beneath this location. A parent that only
    /// exists through its children still counts.
    pub async fn subtree_exists<'e, E>(executor: E, location: &str) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("SELECT COUNT(*) FROM Docs WHERE {SUBTREE}");
        let row: (i64,) = sqlx::query_as(&query)
            .bind(location)
            .fetch_one(executor)
            .await?;
        Ok(row.0 > 0)
    }

    /// The document's `docOrder`, or `None` if it does not exist.
    pub async fn document_order<'e, E>(
        executor: E,
        location: &str,
    ) -> Result<Option<OrderValue>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: (Option<OrderValue>,) =
            sqlx::query_as("SELECT MIN(docOrder) FROM Docs WHERE location = ?1")
                .bind(location)
                .fetch_one(executor)
                .await?;
        Ok(row.0)
    }

    /// Largest `docOrder` in the table, `None` when empty.
    pub async fn max_doc_order<'e, E>(executor: E) -> Result<Option<OrderValue>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: (Option<OrderValue>,) = sqlx::query_as("SELECT MAX(docOrder) FROM Docs")
            .fetch_one(executor)
            .await?;
        Ok(row.0)
    }

    /// Add `delta` to the `docOrder` of a document and its whole subtree.
    ///
    /// Returns the number of rows changed.
    pub async fn shift_subtree_order<'e, E>(
        executor: E,
        location: &str,
        delta: OrderValue,
    ) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("UPDATE Docs SET docOrder = docOrder + ?2 WHERE {SUBTREE}");
        let result = sqlx::query(&query)
            .bind(location)
            .bind(delta)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Replace the `old` prefix with `new` on a document and its subtree.
    ///
    /// `old/x/y` becomes `new/x/y`; `oldX` is untouched. Returns the number
    /// of rows changed.
    pub async fn rewrite_prefix<'e, E>(executor: E, old: &str, new: &str) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!(
            "UPDATE Docs SET location = ?2 || substr(location, length(?1) + 1) WHERE {SUBTREE}"
        );
        let result = sqlx::query(&query)
            .bind(old)
            .bind(new)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete a document and every document beneath it.
    ///
    /// Returns the number of rows removed.
    pub async fn delete_subtree<'e, E>(executor: E, location: &str) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("DELETE FROM Docs WHERE {SUBTREE}");
        let result = sqlx::query(&query).bind(location).execute(executor).await?;
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------------
    // Pages
    // -----------------------------------------------------------------------

    /// Pages of one document in `pageOrder`.
    pub async fn list_pages<'e, E>(executor: E, location: &str) -> Result<Vec<PageSummary>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!(
            "SELECT {PAGE_COLUMNS} FROM Docs
             WHERE location = ?1
             ORDER BY pageOrder ASC, id ASC"
        );
        sqlx::query_as::<_, PageSummary>(&query)
            .bind(location)
            .fetch_all(executor)
            .await
    }

    /// Find a single page by document and name.
    pub async fn find_page<'e, E>(
        executor: E,
        location: &str,
        name: &str,
    ) -> Result<Option<PathEntry>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("SELECT {COLUMNS} FROM Docs WHERE location = ?1 AND name = ?2");
        sqlx::query_as::<_, PathEntry>(&query)
            .bind(location)
            .bind(name)
            .fetch_optional(executor)
            .await
    }

    /// Names of the pages of one document.
    pub async fn page_names<'e, E>(executor: E, location: &str) -> Result<Vec<String>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM Docs WHERE location = ?1 ORDER BY pageOrder ASC, id ASC",
        )
        .bind(location)
        .fetch_all(executor)
        .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    /// A page's `pageOrder`, or `None` if the page does not exist.
    pub async fn page_order<'e, E>(
        executor: E,
        location: &str,
        name: &str,
    ) -> Result<Option<OrderValue>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: Option<(OrderValue,)> =
            sqlx::query_as("SELECT pageOrder FROM Docs WHERE location = ?1 AND name = ?2")
                .bind(location)
                .bind(name)
                .fetch_optional(executor)
                .await?;
        Ok(row.map(|(order,)| order))
    }

    /// Largest `pageOrder` within one document, `None` when it has no pages.
    pub async fn max_page_order<'e, E>(
        executor: E,
        location: &str,
    ) -> Result<Option<OrderValue>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: (Option<OrderValue>,) =
            sqlx::query_as("SELECT MAX(pageOrder) FROM Docs WHERE location = ?1")
                .bind(location)
                .fetch_one(executor)
                .await?;
        Ok(row.0)
    }

    /// Set a page's `pageOrder`.
    pub async fn set_page_order<'e, E>(
        executor: E,
        location: &str,
        name: &str,
        order: OrderValue,
    ) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result =
            sqlx::query("UPDATE Docs SET pageOrder = ?3 WHERE location = ?1 AND name = ?2")
                .bind(location)
                .bind(name)
                .bind(order)
                .execute(executor)
                .await?;
        Ok(result.rows_affected())
    }

    /// Replace a page's text and stamp `lastModified`.
    pub async fn update_text<'e, E>(
        executor: E,
        location: &str,
        name: &str,
        text: &str,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE Docs SET text = ?3, lastModified = ?4 WHERE location = ?1 AND name = ?2",
        )
        .bind(location)
        .bind(name)
        .bind(text)
        .bind(now)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    /// Rename a page within its document and stamp `lastModified`.
    pub async fn rename_page<'e, E>(
        executor: E,
        location: &str,
        old_name: &str,
        new_name: &str,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE Docs SET name = ?3, lastModified = ?4 WHERE location = ?1 AND name = ?2",
        )
        .bind(location)
        .bind(old_name)
        .bind(new_name)
        .bind(now)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    /// Set a page's indentation level.
    pub async fn set_indent<'e, E>(
        executor: E,
        location: &str,
        name: &str,
        indent_level: i32,
    ) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result =
            sqlx::query("UPDATE Docs SET indentLevel = ?3 WHERE location = ?1 AND name = ?2")
                .bind(location)
                .bind(name)
                .bind(indent_level)
                .execute(executor)
                .await?;
        Ok(result.rows_affected())
    }

    /// Move one page row to another document under `new_name`, taking that
    /// document's `docOrder` and the given `pageOrder`.
    #[allow(clippy::too_many_arguments)]
    pub async fn relocate_page<'e, E>(
        executor: E,
        src_location: &str,
        name: &str,
        dst_location: &str,
        new_name: &str,
        doc_order: OrderValue,
        page_order: OrderValue,
    ) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE Docs SET location = ?3, name = ?4, docOrder = ?5, pageOrder = ?6
             WHERE location = ?1 AND name = ?2",
        )
        .bind(src_location)
        .bind(name)
        .bind(dst_location)
        .bind(new_name)
        .bind(doc_order)
        .bind(page_order)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete a single page.
    ///
    /// Returns `true` if a row was deleted, `false` if not found.
    pub async fn delete_page<'e, E>(executor: E, location: &str, name: &str) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM Docs WHERE location = ?1 AND name = ?2")
            .bind(location)
            .bind(name)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Every page, grouped by location and ordered by `pageOrder`.
    pub async fn list_all_pages<'e, E>(executor: E) -> Result<Vec<PathEntry>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("SELECT {COLUMNS} FROM Docs ORDER BY location ASC, pageOrder ASC, id ASC");
        sqlx::query_as::<_, PathEntry>(&query)
            .fetch_all(executor)
            .await
    }
}
