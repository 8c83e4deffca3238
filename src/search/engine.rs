//! Document search engine
//!
//! Ties the page text cache, the match locator and the rect reconstructor
//! together. Pages are scanned strictly in ascending order inside the
//! caller's task.

use std::sync::Arc;

use tokio::time::Duration;

use crate::config::SearchConfig;
use crate::document::PdfDocument;

use super::cache::{Binding, CacheStats, PageTextCache};
use super::index::{fold_query, PageTextIndex};
use super::locator::locate;
use super::reconstruct::reconstruct;
use super::types::SearchMatch;

/// Text search over one bound document
pub struct SearchEngine {
    cache: PageTextCache,
    config: SearchConfig,
}

impl SearchEngine {
    /// Create an engine with the default configuration
    pub fn new(document: Arc<dyn PdfDocument>) -> Self {
        Self::with_config(document, SearchConfig::default())
    }

    pub fn with_config(document: Arc<dyn PdfDocument>, config: SearchConfig) -> Self {
        let cache = PageTextCache::new(
            document,
            config.scale,
            Duration::from_secs(config.page_timeout_secs),
        );
        Self { cache, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Swap in a new document; every cached page is discarded
    pub async fn update_document(&self, document: Arc<dyn PdfDocument>) {
        tracing::info!(document = document.id(), "Binding new document");
        self.cache.rebind(document).await;
    }

    /// Drop all cached page text for the bound document
    pub async fn clear_cache(&self) {
        self.cache.invalidate_all().await;
    }

    /// Find every occurrence of `query` in the document
    ///
    /// Results are ordered by page, then left to right within a page. An
    /// empty or whitespace-only query returns nothing. Pages whose text
    /// cannot be extracted are skipped.
    pub async fn search_text(&self, query: &str) -> Vec<SearchMatch> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let folded = fold_query(query);
        let binding = self.cache.binding().await;
        let num_pages = binding.document().num_pages();
        let limit = self.limit();

        let mut results = Vec::new();
        for page_number in 1..=num_pages {
            let index = self.cache.ensure_for(&binding, page_number).await;
            collect_page_matches(&index, &folded, &mut results, limit);

            if results.len() >= limit {
                tracing::debug!(limit, "Result limit reached");
                break;
            }
        }

        tracing::debug!(
            document = binding.document().id(),
            pages = num_pages,
            matches = results.len(),
            "Search complete"
        );

        results
    }

    /// Find every occurrence of `query` on a single page
    ///
    /// `match_index` counts from zero within the page. Out-of-range pages
    /// return nothing.
    pub async fn search_page(&self, page_number: u32, query: &str) -> Vec<SearchMatch> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let binding = self.cache.binding().await;
        if !page_in_range(&binding, page_number) {
            return Vec::new();
        }

        let index = self.cache.ensure_for(&binding, page_number).await;
        let mut results = Vec::new();
        collect_page_matches(&index, &fold_query(query), &mut results, self.limit());
        results
    }

    /// Cached text of a page, if it has been extracted
    pub async fn get_page_text(&self, page_number: u32) -> Option<String> {
        self.cache
            .peek(page_number)
            .await
            .map(|index| index.text().to_string())
    }

    /// Text of a page, extracting it first if needed
    pub async fn load_page_text(&self, page_number: u32) -> Option<String> {
        let binding = self.cache.binding().await;
        if !page_in_range(&binding, page_number) {
            return None;
        }
        let index = self.cache.ensure_for(&binding, page_number).await;
        if index.viewport().is_none() {
            return None;
        }
        Some(index.text().to_string())
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    fn limit(&self) -> usize {
        match self.config.max_results {
            0 => usize::MAX,
            n => n,
        }
    }
}

fn page_in_range(binding: &Binding, page_number: u32) -> bool {
    (1..=binding.document().num_pages()).contains(&page_number)
}

/// Append the matches found on one page
fn collect_page_matches(
    index: &PageTextIndex,
    folded_query: &[char],
    results: &mut Vec<SearchMatch>,
    limit: usize,
) {
    let page_number = index.page_number();
    let mut page_count = 0;

    for located in locate(index, folded_query) {
        if results.len() >= limit {
            break;
        }

        let Some(geometry) = reconstruct(index, &located.span) else {
            tracing::debug!(
                page = page_number,
                start = located.occurrence.start,
                "Dropping match without usable geometry"
            );
            continue;
        };

        let occurrence = located.occurrence;
        results.push(SearchMatch {
            id: format!("search-{}-{}", page_number, page_count),
            text: index.slice(occurrence.start, occurrence.end),
            page_number,
            position: geometry.position,
            scaled_position: geometry.scaled_position,
            match_index: results.len(),
            start_offset: occurrence.start,
            end_offset: occurrence.end,
        });
        page_count += 1;
    }

    if page_count > 0 {
        tracing::debug!(page = page_number, matches = page_count, "Page matches");
    }
}
