//! Order allocation for sibling documents and pages.
//!
//! Every write keys off the row identity (location, or location + page
//! name), never off the order value being replaced, and runs on the caller's
//! transaction. Two siblings therefore cannot be confused mid-swap and no
//! staging value is needed.

use daybook_core::error::CoreError;
use daybook_core::ordering::{self, Direction, Sibling};
use daybook_core::paths;
use daybook_core::types::OrderValue;
use daybook_db::repositories::PathEntryRepo;
use sqlx::SqliteConnection;

use crate::error::AppResult;

/// The set of rows an order value is unique within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope<'a> {
    /// `docOrder` across documents; sibling keys are locations.
    Documents,
    /// `pageOrder` within one document; sibling keys are page names.
    Pages { location: &'a str },
}

/// Computes and applies sibling order changes.
pub struct OrderAllocator;

impl OrderAllocator {
    /// `max(order in scope) + 1`, or `0` for an empty scope.
    pub async fn next_order(
        conn: &mut SqliteConnection,
        scope: OrderScope<'_>,
    ) -> Result<OrderValue, sqlx::Error> {
        let max = match scope {
            OrderScope::Documents => PathEntryRepo::max_doc_order(&mut *conn).await?,
            OrderScope::Pages { location } => {
                PathEntryRepo::max_page_order(&mut *conn, location).await?
            }
        };
        Ok(ordering::next_order(max))
    }

    /// Exchange the order values of two siblings.
    ///
    /// Returns `false` without writing when either key does not exist or
    /// both keys are the same. Documents must share a parent; a document's
    /// whole subtree moves with it.
    pub async fn swap(
        conn: &mut SqliteConnection,
        scope: OrderScope<'_>,
        first: &str,
        second: &str,
    ) -> AppResult<bool> {
        if first == second {
            return Ok(false);
        }

        let first_order = Self::current(&mut *conn, scope, first).await?;
        let second_order = Self::current(&mut *conn, scope, second).await?;
        let (Some(first_order), Some(second_order)) = (first_order, second_order) else {
            return Ok(false);
        };

        if scope == OrderScope::Documents && !paths::same_parent(first, second) {
            return Err(CoreError::Validation(format!(
                "'{first}' and '{second}' are not siblings"
            ))
            .into());
        }

        let next = Self::next_order(&mut *conn, scope).await?;
        let plan = ordering::plan_swap(first_order, second_order, next);

        match scope {
            OrderScope::Documents => {
                PathEntryRepo::shift_subtree_order(&mut *conn, first, plan.first - first_order)
                    .await?;
                PathEntryRepo::shift_subtree_order(&mut *conn, second, plan.second - second_order)
                    .await?;
            }
            OrderScope::Pages { location } => {
                PathEntryRepo::set_page_order(&mut *conn, location, first, plan.first).await?;
                PathEntryRepo::set_page_order(&mut *conn, location, second, plan.second).await?;
            }
        }

        tracing::debug!(?scope, first, second, ?plan, "Swapped sibling order");
        Ok(true)
    }

    /// Swap `key` with its nearest sibling above or below.
    ///
    /// Returns `false` when `key` is missing or already at that end.
    pub async fn shift(
        conn: &mut SqliteConnection,
        scope: OrderScope<'_>,
        key: &str,
        direction: Direction,
    ) -> AppResult<bool> {
        let siblings = Self::siblings(&mut *conn, scope, key).await?;
        let Some(neighbor) = ordering::find_neighbor(&siblings, key, direction) else {
            return Ok(false);
        };
        let neighbor = neighbor.key.clone();
        Self::swap(&mut *conn, scope, key, &neighbor).await
    }

    async fn current(
        conn: &mut SqliteConnection,
        scope: OrderScope<'_>,
        key: &str,
    ) -> Result<Option<OrderValue>, sqlx::Error> {
        match scope {
            OrderScope::Documents => PathEntryRepo::document_order(conn, key).await,
            OrderScope::Pages { location } => PathEntryRepo::page_order(conn, location, key).await,
        }
    }

    /// Siblings of `key` in the scope: documents under the same parent, or
    /// all pages of the document.
    async fn siblings(
        conn: &mut SqliteConnection,
        scope: OrderScope<'_>,
        key: &str,
    ) -> Result<Vec<Sibling<String>>, sqlx::Error> {
        let siblings = match scope {
            OrderScope::Documents => {
                let parent = paths::parent_of(key);
                PathEntryRepo::list_documents(conn)
                    .await?
                    .into_iter()
                    .filter(|doc| paths::parent_of(&doc.location) == parent)
                    .map(|doc| Sibling {
                        key: doc.location,
                        order: doc.doc_order,
                    })
                    .collect()
            }
            OrderScope::Pages { location } => PathEntryRepo::list_pages(conn, location)
                .await?
                .into_iter()
                .map(|page| Sibling {
                    key: page.name,
                    order: page.page_order,
                })
                .collect(),
        };
        Ok(siblings)
    }
}
