//! Entries of the persistent task list.

use daybook_core::types::{DbId, OrderValue, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `Tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub text: String,
    pub done: bool,
    pub task_order: OrderValue,
    pub created: Timestamp,
}
