//! Path rewrites: renaming and re-parenting documents, and moving pages
//! between documents.
//!
//! All functions run on the caller's transaction. Rejections are returned
//! before the first write, so a refused operation never changes storage.

use daybook_core::error::CoreError;
use daybook_core::naming;
use daybook_core::paths;
use daybook_db::repositories::PathEntryRepo;
use serde::Serialize;
use sqlx::SqliteConnection;

use crate::error::AppResult;
use crate::order::{OrderAllocator, OrderScope};

/// What a document drag-and-drop did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// Source and destination were siblings; their order was exchanged.
    Swapped,
    /// The source subtree now lives at `path`.
    Moved { path: String },
    /// Nothing to do: already in place, or a sibling swap that found no rows.
    Unchanged,
}

/// Renames and moves paths, cascading to every descendant.
pub struct PathRewriter;

impl PathRewriter {
    /// Rename the last segment of `old_path` to `new_leaf`.
    ///
    /// Fails with [`CoreError::NameExists`] when the new path is taken.
    /// Returns the new path.
    pub async fn rename(
        conn: &mut SqliteConnection,
        old_path: &str,
        new_leaf: &str,
    ) -> AppResult<String> {
        paths::validate_leaf_name(new_leaf)?;
        if !PathEntryRepo::subtree_exists(&mut *conn, old_path).await? {
            return Err(CoreError::not_found("Document", old_path).into());
        }

        let new_path = paths::join(paths::parent_of(old_path), new_leaf);
        if new_path == old_path {
            return Ok(new_path);
        }
        if PathEntryRepo::subtree_exists(&mut *conn, &new_path).await? {
            return Err(CoreError::NameExists(new_path).into());
        }

        let rows = PathEntryRepo::rewrite_prefix(&mut *conn, old_path, &new_path).await?;
        tracing::debug!(old_path, new_path = %new_path, rows, "Rewrote document prefix");
        Ok(new_path)
    }

    /// Move `src` onto `dst`.
    ///
    /// Dropping onto a sibling swaps the two, and is a no-op when either
    /// sibling is missing. Dropping onto any other document (or onto the
    /// root when `dst` is `None`) re-parents `src` beneath it, disambiguating
    /// the name with `" (n)"` and placing it after every existing document.
    pub async fn move_document(
        conn: &mut SqliteConnection,
        src: &str,
        dst: Option<&str>,
    ) -> AppResult<MoveOutcome> {
        let dst = dst.filter(|d| !d.is_empty());
        match dst {
            Some(dst) => {
                if paths::is_within(dst, src) {
                    return Err(CoreError::IllegalMove {
                        src: src.to_string(),
                        dst: dst.to_string(),
                    }
                    .into());
                }
                if paths::same_parent(src, dst) {
                    let swapped =
                        OrderAllocator::swap(&mut *conn, OrderScope::Documents, src, dst).await?;
                    return Ok(if swapped {
                        MoveOutcome::Swapped
                    } else {
                        MoveOutcome::Unchanged
                    });
                }
                if paths::parent_of(src) == Some(dst) {
                    return Ok(MoveOutcome::Unchanged);
                }
                if !PathEntryRepo::subtree_exists(&mut *conn, src).await? {
                    return Err(CoreError::not_found("Document", src).into());
                }
                if !PathEntryRepo::subtree_exists(&mut *conn, dst).await? {
                    return Err(CoreError::not_found("Document", dst).into());
                }
            }
            None => {
                if paths::parent_of(src).is_none() {
                    return Ok(MoveOutcome::Unchanged);
                }
                if !PathEntryRepo::subtree_exists(&mut *conn, src).await? {
                    return Err(CoreError::not_found("Document", src).into());
                }
            }
        }

        let locations: Vec<String> = PathEntryRepo::list_documents(&mut *conn)
            .await?
            .into_iter()
            .map(|doc| doc.location)
            .collect();
        let leaf = naming::unique_name(paths::leaf_of(src), |candidate| {
            let candidate = paths::join(dst, candidate);
            locations.iter().any(|loc| paths::is_within(loc, &candidate))
        });
        let target = paths::join(dst, &leaf);

        let old_order = PathEntryRepo::document_order(&mut *conn, src).await?;
        let next = OrderAllocator::next_order(&mut *conn, OrderScope::Documents).await?;

        let rows = PathEntryRepo::rewrite_prefix(&mut *conn, src, &target).await?;
        if let Some(old_order) = old_order {
            PathEntryRepo::shift_subtree_order(&mut *conn, &target, next - old_order).await?;
        }

        tracing::debug!(src, target = %target, rows, "Re-parented document");
        Ok(MoveOutcome::Moved { path: target })
    }

    /// Move one page from `src_location` to the end of `dst_location`.
    ///
    /// The page is renamed with `" (n)"` if the destination already has a
    /// page of that name. Moving a document's only page leaves the document
    /// without rows, so it drops out of the tree.
    /// Returns the page's name in the destination.
    pub async fn move_page(
        conn: &mut SqliteConnection,
        src_location: &str,
        page: &str,
        dst_location: &str,
    ) -> AppResult<String> {
        if PathEntryRepo::find_page(&mut *conn, src_location, page)
            .await?
            .is_none()
        {
            return Err(CoreError::not_found("Page", format!("{src_location}/{page}")).into());
        }
        if src_location == dst_location {
            return Ok(page.to_string());
        }

        let Some(doc_order) = PathEntryRepo::document_order(&mut *conn, dst_location).await? else {
            return Err(CoreError::not_found("Document", dst_location).into());
        };

        let taken = PathEntryRepo::page_names(&mut *conn, dst_location).await?;
        let new_name = naming::unique_name(page, |candidate| taken.iter().any(|n| n == candidate));
        let page_order = OrderAllocator::next_order(
            &mut *conn,
            OrderScope::Pages {
                location: dst_location,
            },
        )
        .await?;

        PathEntryRepo::relocate_page(
            &mut *conn,
            src_location,
            page,
            dst_location,
            &new_name,
            doc_order,
            page_order,
        )
        .await?;

        tracing::debug!(src_location, page, dst_location, new_name = %new_name, "Moved page");
        Ok(new_name)
    }
}
