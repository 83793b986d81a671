//! Document tree operations.
//!
//! Every mutating method runs in one transaction, so a cascade either
//! completes or leaves storage untouched. Callers re-read the tree after a
//! mutation instead of predicting its result.

use chrono::Utc;
use daybook_core::error::CoreError;
use daybook_core::naming;
use daybook_core::ordering::Direction;
use daybook_core::paths;
use daybook_core::search::DEFAULT_PREVIEW_CHARS;
use daybook_core::tree::{self, TreeNode};
use daybook_db::models::path_entry::CreatePathEntry;
use daybook_db::repositories::PathEntryRepo;
use daybook_db::DbPool;

use crate::error::AppResult;
use crate::order::{OrderAllocator, OrderScope};
use crate::rewrite::{MoveOutcome, PathRewriter};

/// Documents and pages stored in the `Docs` relation.
#[derive(Debug, Clone)]
pub struct DocumentsService {
    pub(crate) pool: DbPool,
    pub(crate) preview_chars: usize,
}

impl DocumentsService {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }

    /// Number of characters kept in search previews.
    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Every document location in sibling order.
    pub async fn document_paths(&self) -> AppResult<Vec<String>> {
        let docs = PathEntryRepo::list_documents(&self.pool).await?;
        tracing::debug!(count = docs.len(), "Listed documents");
        Ok(docs.into_iter().map(|doc| doc.location).collect())
    }

    /// The document tree as displayed.
    pub async fn document_tree(&self) -> AppResult<Vec<TreeNode>> {
        let locations = self.document_paths().await?;
        Ok(tree::assemble(&locations))
    }

    pub async fn document_exists(&self, path: &str) -> AppResult<bool> {
        Ok(PathEntryRepo::document_exists(&self.pool, path).await?)
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Create a document with its first page, optionally under `parent`.
    ///
    /// The name defaults to `New Document` and is made unique among its
    /// siblings. Returns the new document's path.
    pub async fn create_document(&self, parent: Option<&str>, name: Option<&str>) -> AppResult<String> {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(naming::DEFAULT_DOCUMENT_NAME);
        paths::validate_leaf_name(name)?;

        let parent = parent.map(str::trim).filter(|p| !p.is_empty());
        if let Some(parent) = parent {
            paths::validate_path(parent)?;
        }

        let mut tx = self.pool.begin().await?;

        if let Some(parent) = parent {
            if !PathEntryRepo::subtree_exists(&mut *tx, parent).await? {
                return Err(CoreError::not_found("Document", parent).into());
            }
        }

        let locations: Vec<String> = PathEntryRepo::list_documents(&mut *tx)
            .await?
            .into_iter()
            .map(|doc| doc.location)
            .collect();
        let leaf = naming::unique_name(name, |candidate| {
            let candidate = paths::join(parent, candidate);
            locations.iter().any(|loc| paths::is_within(loc, &candidate))
        });
        let path = paths::join(parent, &leaf);

        let doc_order = OrderAllocator::next_order(&mut tx, OrderScope::Documents).await?;
        let page_order =
            OrderAllocator::next_order(&mut tx, OrderScope::Pages { location: &path }).await?;

        PathEntryRepo::create(
            &mut *tx,
            &CreatePathEntry {
                name: naming::first_page_name(),
                location: path.clone(),
                text: String::new(),
                indent_level: 0,
                doc_order,
                page_order,
            },
            Utc::now(),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(path = %path, doc_order, "Created document");
        Ok(path)
    }

    /// Rename a document, carrying every descendant along.
    /// Returns the new path.
    pub async fn rename_document(&self, path: &str, new_name: &str) -> AppResult<String> {
        let mut tx = self.pool.begin().await?;
        let new_path = PathRewriter::rename(&mut tx, path, new_name.trim()).await?;
        tx.commit().await?;

        tracing::info!(old_path = path, new_path = %new_path, "Renamed document");
        Ok(new_path)
    }

    /// Delete a document and everything beneath it.
    /// Returns the number of rows removed (`0` if nothing was there).
    pub async fn delete_document(&self, path: &str) -> AppResult<u64> {
        let removed = PathEntryRepo::delete_subtree(&self.pool, path).await?;
        tracing::info!(path, removed, "Deleted document");
        Ok(removed)
    }

    /// Drop `src` onto `dst` (or onto the root when `dst` is `None`).
    pub async fn move_document(&self, src: &str, dst: Option<&str>) -> AppResult<MoveOutcome> {
        let mut tx = self.pool.begin().await?;
        let outcome = PathRewriter::move_document(&mut tx, src, dst).await?;
        tx.commit().await?;

        tracing::info!(src, dst = ?dst, ?outcome, "Moved document");
        Ok(outcome)
    }

    /// Exchange the positions of two sibling documents.
    pub async fn swap_documents(&self, first: &str, second: &str) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;
        let swapped = OrderAllocator::swap(&mut tx, OrderScope::Documents, first, second).await?;
        tx.commit().await?;

        tracing::info!(first, second, swapped, "Swapped documents");
        Ok(swapped)
    }

    /// Move a document one place up among its siblings.
    pub async fn move_document_up(&self, path: &str) -> AppResult<bool> {
        self.shift_document(path, Direction::Up).await
    }

    /// Move a document one place down among its siblings.
    pub async fn move_document_down(&self, path: &str) -> AppResult<bool> {
        self.shift_document(path, Direction::Down).await
    }

    async fn shift_document(&self, path: &str, direction: Direction) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;
        let moved = OrderAllocator::shift(&mut tx, OrderScope::Documents, path, direction).await?;
        tx.commit().await?;

        tracing::info!(path, ?direction, moved, "Shifted document");
        Ok(moved)
    }
}
