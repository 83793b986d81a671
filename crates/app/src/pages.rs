//! Page operations within a document.

use chrono::Utc;
use daybook_core::error::CoreError;
use daybook_core::naming;
use daybook_core::ordering::Direction;
use daybook_core::paths;
use daybook_db::models::path_entry::{CreatePathEntry, PageSummary, PathEntry};
use daybook_db::repositories::PathEntryRepo;

use crate::documents::DocumentsService;
use crate::error::AppResult;
use crate::order::{OrderAllocator, OrderScope};
use crate::rewrite::PathRewriter;

fn page_not_found(location: &str, name: &str) -> CoreError {
    CoreError::not_found("Page", format!("{location}/{name}"))
}

impl DocumentsService {
    /// Pages of a document in order. Empty for an unknown document.
    pub async fn list_pages(&self, location: &str) -> AppResult<Vec<PageSummary>> {
        let pages = PathEntryRepo::list_pages(&self.pool, location).await?;
        tracing::debug!(location, count = pages.len(), "Listed pages");
        Ok(pages)
    }

    /// Read one page, body included.
    pub async fn get_page(&self, location: &str, name: &str) -> AppResult<PathEntry> {
        PathEntryRepo::find_page(&self.pool, location, name)
            .await?
            .ok_or_else(|| page_not_found(location, name).into())
    }

    /// Append a page to a document.
    ///
    /// Without a name the page is called `Page N`; an explicit name is made
    /// unique within the document.
    pub async fn create_page(&self, location: &str, name: Option<&str>) -> AppResult<PathEntry> {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        if let Some(name) = name {
            paths::validate_leaf_name(name)?;
        }

        let mut tx = self.pool.begin().await?;

        let Some(doc_order) = PathEntryRepo::document_order(&mut *tx, location).await? else {
            return Err(CoreError::not_found("Document", location).into());
        };

        let taken = PathEntryRepo::page_names(&mut *tx, location).await?;
        let is_taken = |candidate: &str| taken.iter().any(|n| n == candidate);
        let name = match name {
            Some(name) => naming::unique_name(name, is_taken),
            None => naming::next_page_name(taken.len(), is_taken),
        };

        let page_order = OrderAllocator::next_order(&mut tx, OrderScope::Pages { location }).await?;

        PathEntryRepo::create(
            &mut *tx,
            &CreatePathEntry {
                name: name.clone(),
                location: location.to_string(),
                text: String::new(),
                indent_level: 0,
                doc_order,
                page_order,
            },
            Utc::now(),
        )
        .await?;

        let page = PathEntryRepo::find_page(&mut *tx, location, &name)
            .await?
            .ok_or_else(|| CoreError::Internal(format!("page '{name}' vanished after insert")))?;

        tx.commit().await?;

        tracing::info!(location, name = %name, page_order, "Created page");
        Ok(page)
    }

    /// Replace a page's markdown body.
    pub async fn save_page(&self, location: &str, name: &str, text: &str) -> AppResult<PathEntry> {
        let mut tx = self.pool.begin().await?;

        let changed = PathEntryRepo::update_text(&mut *tx, location, name, text, Utc::now()).await?;
        if changed == 0 {
            return Err(page_not_found(location, name).into());
        }
        let page = PathEntryRepo::find_page(&mut *tx, location, name)
            .await?
            .ok_or_else(|| page_not_found(location, name))?;

        tx.commit().await?;

        tracing::info!(location, name, bytes = text.len(), "Saved page");
        Ok(page)
    }

    /// Rename a page within its document. Returns the new name.
    pub async fn rename_page(&self, location: &str, old_name: &str, new_name: &str) -> AppResult<String> {
        let new_name = new_name.trim();
        paths::validate_leaf_name(new_name)?;

        let mut tx = self.pool.begin().await?;

        if PathEntryRepo::find_page(&mut *tx, location, old_name)
            .await?
            .is_none()
        {
            return Err(page_not_found(location, old_name).into());
        }
        if new_name == old_name {
            return Ok(new_name.to_string());
        }
        if PathEntryRepo::find_page(&mut *tx, location, new_name)
            .await?
            .is_some()
        {
            return Err(CoreError::NameExists(new_name.to_string()).into());
        }

        PathEntryRepo::rename_page(&mut *tx, location, old_name, new_name, Utc::now()).await?;
        tx.commit().await?;

        tracing::info!(location, old_name, new_name, "Renamed page");
        Ok(new_name.to_string())
    }

    /// Delete one page.
    ///
    /// Returns `false` if the page does not exist. Deleting a document's
    /// only page removes the document from the tree.
    pub async fn delete_page(&self, location: &str, name: &str) -> AppResult<bool> {
        let deleted = PathEntryRepo::delete_page(&self.pool, location, name).await?;
        tracing::info!(location, name, deleted, "Deleted page");
        Ok(deleted)
    }

    /// Exchange the positions of two pages of one document.
    pub async fn swap_pages(&self, location: &str, first: &str, second: &str) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;
        let swapped =
            OrderAllocator::swap(&mut tx, OrderScope::Pages { location }, first, second).await?;
        tx.commit().await?;

        tracing::info!(location, first, second, swapped, "Swapped pages");
        Ok(swapped)
    }

    /// Move a page one place up.
    pub async fn move_page_up(&self, location: &str, name: &str) -> AppResult<bool> {
        self.shift_page(location, name, Direction::Up).await
    }

    /// Move a page one place down.
    pub async fn move_page_down(&self, location: &str, name: &str) -> AppResult<bool> {
        self.shift_page(location, name, Direction::Down).await
    }

    async fn shift_page(&self, location: &str, name: &str, direction: Direction) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;
        let moved =
            OrderAllocator::shift(&mut tx, OrderScope::Pages { location }, name, direction).await?;
        tx.commit().await?;

        tracing::info!(location, name, ?direction, moved, "Shifted page");
        Ok(moved)
    }

    /// Indent a page one level. Returns the new level.
    pub async fn indent_page(&self, location: &str, name: &str) -> AppResult<i32> {
        self.adjust_indent(location, name, 1).await
    }

    /// Outdent a page one level, stopping at `0`. Returns the new level.
    pub async fn outdent_page(&self, location: &str, name: &str) -> AppResult<i32> {
        self.adjust_indent(location, name, -1).await
    }

    async fn adjust_indent(&self, location: &str, name: &str, step: i32) -> AppResult<i32> {
        let mut tx = self.pool.begin().await?;

        let page = PathEntryRepo::find_page(&mut *tx, location, name)
            .await?
            .ok_or_else(|| page_not_found(location, name))?;
        let level = (page.indent_level + step).max(0);
        if level != page.indent_level {
            PathEntryRepo::set_indent(&mut *tx, location, name, level).await?;
        }

        tx.commit().await?;

        tracing::info!(location, name, level, "Changed page indent");
        Ok(level)
    }

    /// Move a page to the end of another document. Returns its name there.
    pub async fn move_page_to_document(
        &self,
        src_location: &str,
        name: &str,
        dst_location: &str,
    ) -> AppResult<String> {
        let mut tx = self.pool.begin().await?;
        let new_name = PathRewriter::move_page(&mut tx, src_location, name, dst_location).await?;
        tx.commit().await?;

        tracing::info!(src_location, name, dst_location, new_name = %new_name, "Moved page to document");
        Ok(new_name)
    }
}
