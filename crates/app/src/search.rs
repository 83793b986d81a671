use daybook_core::search;
use daybook_db::models::search::SearchHit;
use daybook_db::repositories::PathEntryRepo;

use crate::documents::DocumentsService;
use crate::error::AppResult;

impl DocumentsService {
    /// Pages whose text contains every whitespace-separated term of `query`,
    /// ignoring case. Results are grouped by location, then page order.
    pub async fn search(&self, query: &str) -> AppResult<Vec<SearchHit>> {
        let terms = search::parse_terms(query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let hits: Vec<SearchHit> = PathEntryRepo::list_all_pages(&self.pool)
            .await?
            .into_iter()
            .filter(|page| search::matches_all(&page.text, &terms))
            .map(|page| SearchHit {
                preview: search::preview(&page.text, self.preview_chars),
                location: page.location,
                name: page.name,
            })
            .collect();

        tracing::debug!(terms = terms.len(), hits = hits.len(), "Searched pages");
        Ok(hits)
    }
}
