//! Repository for the `Tasks` table.

use daybook_core::types::{DbId, OrderValue, Timestamp};
use sqlx::{Executor, Sqlite};

use crate::models::task::Task;

/// Column list for task queries.
const COLUMNS: &str = "id, text, done, taskOrder AS task_order, created";

/// Provides CRUD operations for the task list.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    pub async fn create<'e, E>(
        executor: E,
        text: &str,
        task_order: OrderValue,
        now: Timestamp,
    ) -> Result<Task, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!(
            "INSERT INTO Tasks (text, done, taskOrder, created)
             VALUES (?1, 0, ?2, ?3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(text)
            .bind(task_order)
            .bind(now)
            .fetch_one(executor)
            .await
    }

    /// Find a task by its primary key.
    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Task>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("SELECT {COLUMNS} FROM Tasks WHERE id = ?1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List all tasks in `taskOrder`.
    pub async fn list<'e, E>(executor: E) -> Result<Vec<Task>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("SELECT {COLUMNS} FROM Tasks ORDER BY taskOrder ASC, id ASC");
        sqlx::query_as::<_, Task>(&query).fetch_all(executor).await
    }

    /// Largest `taskOrder`, `None` when the list is empty.
    pub async fn max_order<'e, E>(executor: E) -> Result<Option<OrderValue>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: (Option<OrderValue>,) = sqlx::query_as("SELECT MAX(taskOrder) FROM Tasks")
            .fetch_one(executor)
            .await?;
        Ok(row.0)
    }

    /// Replace a task's text. Returns the updated row, or `None` if not found.
    pub async fn update_text<'e, E>(executor: E, id: DbId, text: &str) -> Result<Option<Task>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("UPDATE Tasks SET text = ?2 WHERE id = ?1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(text)
            .fetch_optional(executor)
            .await
    }

    /// Mark a task done or not done. Returns the updated row, or `None` if
    /// not found.
    pub async fn set_done<'e, E>(executor: E, id: DbId, done: bool) -> Result<Option<Task>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("UPDATE Tasks SET done = ?2 WHERE id = ?1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(done)
            .fetch_optional(executor)
            .await
    }

    /// Set a task's `taskOrder`.
    pub async fn set_order<'e, E>(executor: E, id: DbId, order: OrderValue) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("UPDATE Tasks SET taskOrder = ?2 WHERE id = ?1")
            .bind(id)
            .bind(order)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete a task by ID.
    ///
    /// Returns `true` if a row was deleted, `false` if not found.
    pub async fn delete<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM Tasks WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
