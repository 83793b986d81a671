//! Calendar day notes and the persistent task list.

use chrono::{NaiveDate, Utc};
use daybook_core::error::CoreError;
use daybook_core::journal;
use daybook_core::ordering::{self, Direction, Sibling};
use daybook_core::types::DbId;
use daybook_db::models::day_note::DayNote;
use daybook_db::models::task::Task;
use daybook_db::repositories::{DayNoteRepo, TaskRepo};
use daybook_db::DbPool;

use crate::error::AppResult;

fn task_not_found(id: DbId) -> CoreError {
    CoreError::not_found("Task", id.to_string())
}

/// Day notes and tasks.
#[derive(Debug, Clone)]
pub struct JournalService {
    pool: DbPool,
}

impl JournalService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    // -----------------------------------------------------------------------
    // Day notes
    // -----------------------------------------------------------------------

    pub async fn day_note(&self, day: NaiveDate) -> AppResult<Option<DayNote>> {
        Ok(DayNoteRepo::find(&self.pool, day).await?)
    }

    /// Store the note for a day. Blank text removes the note and returns
    /// `None`.
    pub async fn save_day_note(&self, day: NaiveDate, text: &str) -> AppResult<Option<DayNote>> {
        if journal::is_blank_note(text) {
            let removed = DayNoteRepo::delete(&self.pool, day).await?;
            tracing::info!(%day, removed, "Cleared day note");
            return Ok(None);
        }

        DayNoteRepo::upsert(&self.pool, day, text, Utc::now()).await?;
        tracing::info!(%day, bytes = text.len(), "Saved day note");
        Ok(DayNoteRepo::find(&self.pool, day).await?)
    }

    /// Days of a month that have a note, for calendar highlighting.
    pub async fn days_with_notes(&self, year: i32, month: u32) -> AppResult<Vec<NaiveDate>> {
        let (start, end) = journal::month_bounds(year, month)?;
        Ok(DayNoteRepo::days_between(&self.pool, start, end).await?)
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    pub async fn tasks(&self) -> AppResult<Vec<Task>> {
        Ok(TaskRepo::list(&self.pool).await?)
    }

    /// Append a task to the end of the list.
    pub async fn add_task(&self, text: &str) -> AppResult<Task> {
        let text = text.trim();
        journal::validate_task_text(text)?;

        let mut tx = self.pool.begin().await?;
        let order = ordering::next_order(TaskRepo::max_order(&mut *tx).await?);
        let task = TaskRepo::create(&mut *tx, text, order, Utc::now()).await?;
        tx.commit().await?;

        tracing::info!(task_id = task.id, "Added task");
        Ok(task)
    }

    pub async fn edit_task(&self, id: DbId, text: &str) -> AppResult<Task> {
        let text = text.trim();
        journal::validate_task_text(text)?;

        let task = TaskRepo::update_text(&self.pool, id, text)
            .await?
            .ok_or_else(|| task_not_found(id))?;
        tracing::info!(task_id = id, "Edited task");
        Ok(task)
    }

    pub async fn set_task_done(&self, id: DbId, done: bool) -> AppResult<Task> {
        let task = TaskRepo::set_done(&self.pool, id, done)
            .await?
            .ok_or_else(|| task_not_found(id))?;
        tracing::info!(task_id = id, done, "Updated task status");
        Ok(task)
    }

    /// Returns `true` if a task was deleted, `false` if not found.
    pub async fn delete_task(&self, id: DbId) -> AppResult<bool> {
        let deleted = TaskRepo::delete(&self.pool, id).await?;
        tracing::info!(task_id = id, deleted, "Deleted task");
        Ok(deleted)
    }

    /// Swap a task with its neighbour above or below. Returns `false` at the
    /// ends of the list or for an unknown task.
    pub async fn move_task(&self, id: DbId, direction: Direction) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        let siblings: Vec<Sibling<DbId>> = TaskRepo::list(&mut *tx)
            .await?
            .into_iter()
            .map(|task| Sibling {
                key: task.id,
                order: task.task_order,
            })
            .collect();

        let Some(current) = siblings.iter().find(|s| s.key == id) else {
            return Ok(false);
        };
        let Some(neighbor) = ordering::find_neighbor(&siblings, &id, direction) else {
            return Ok(false);
        };

        let next = ordering::next_order(siblings.iter().map(|s| s.order).max());
        let plan = ordering::plan_swap(current.order, neighbor.order, next);
        TaskRepo::set_order(&mut *tx, current.key, plan.first).await?;
        TaskRepo::set_order(&mut *tx, neighbor.key, plan.second).await?;

        tx.commit().await?;

        tracing::info!(task_id = id, ?direction, "Moved task");
        Ok(true)
    }
}
