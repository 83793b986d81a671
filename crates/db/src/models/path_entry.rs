//! Rows of the `Docs` relation: one per (location, page name).

use daybook_core::types::{DbId, OrderValue, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A full row from the `Docs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PathEntry {
    pub id: DbId,
    /// Page name.
    pub name: String,
    /// Full document path, `/` delimited.
    pub location: String,
    /// Markdown body.
    pub text: String,
    pub last_modified: Timestamp,
    pub indent_level: i32,
    pub doc_order: OrderValue,
    pub page_order: OrderValue,
}

/// A page as listed inside its document, without the body.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PageSummary {
    pub name: String,
    pub indent_level: i32,
    pub page_order: OrderValue,
    pub last_modified: Timestamp,
}

/// A distinct document location with its sibling order.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DocumentOrder {
    pub location: String,
    pub doc_order: OrderValue,
}

/// Input for inserting one row.
#[derive(Debug, Clone)]
pub struct CreatePathEntry {
    pub name: String,
    pub location: String,
    pub text: String,
    pub indent_level: i32,
    pub doc_order: OrderValue,
    pub page_order: OrderValue,
}
