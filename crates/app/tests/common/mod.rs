#![allow(dead_code)]

use daybook_app::config::AppConfig;
use daybook_app::context::AppContext;
use daybook_app::documents::DocumentsService;
use daybook_app::journal::JournalService;
use daybook_db::repositories::PathEntryRepo;
use sqlx::SqlitePool;

pub fn documents(pool: SqlitePool) -> DocumentsService {
    DocumentsService::new(pool)
}

pub fn journal(pool: SqlitePool) -> JournalService {
    JournalService::new(pool)
}

/// Context over an already-migrated test pool.
pub fn context(pool: SqlitePool) -> AppContext {
    AppContext::from_pool(AppConfig::default(), pool)
}

/// Create root-level documents in the given order.
pub async fn create_all(docs: &DocumentsService, paths: &[&str]) {
    for path in paths {
        let (parent, name) = match path.rsplit_once('/') {
            Some((parent, name)) => (Some(parent), name),
            None => (None, *path),
        };
        docs.create_document(parent, Some(name)).await.unwrap();
    }
}

/// `docOrder` of a document's own rows.
pub async fn doc_order(pool: &SqlitePool, path: &str) -> i64 {
    PathEntryRepo::document_order(pool, path)
        .await
        .unwrap()
        .unwrap_or_else(|| panic!("no rows at '{path}'"))
}

/// Page names of a document in page order.
pub async fn page_names(docs: &DocumentsService, location: &str) -> Vec<String> {
    docs.list_pages(location)
        .await
        .unwrap()
        .into_iter()
        .map(|page| page.name)
        .collect()
}

/// All document paths, sorted, for order-insensitive comparisons.
pub async fn sorted_paths(docs: &DocumentsService) -> Vec<String> {
    let mut paths = docs.document_paths().await.unwrap();
    paths.sort();
    paths
}
