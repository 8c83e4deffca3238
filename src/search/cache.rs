//! Per-page text cache
//!
//! Memoizes [`PageTextIndex`] per page for the bound document. The cache is
//! never updated incrementally: swapping the document clears every entry and
//! bumps an epoch counter.
//!
//! # Thread Safety
//!
//! The page map sits behind a `tokio::sync::RwLock`. Each page slot is a
//! `tokio::sync::OnceCell`, so concurrent first accesses to the same page run
//! a single extraction and every caller receives the same `Arc`. Extraction
//! that started under an older epoch never lands in the current map.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{OnceCell, RwLock};
use tokio::time::{timeout, Duration};

use crate::document::{DocumentError, DocumentResult, PdfDocument};

use super::index::PageTextIndex;

type PageSlot = Arc<OnceCell<Arc<PageTextIndex>>>;

struct CacheState {
    document: Arc<dyn PdfDocument>,
    epoch: u64,
    pages: HashMap<u32, PageSlot>,
}

/// Snapshot of the bound document and the epoch it belongs to
#[derive(Clone)]
pub struct Binding {
    document: Arc<dyn PdfDocument>,
    epoch: u64,
}

impl Binding {
    pub fn document(&self) -> &Arc<dyn PdfDocument> {
        &self.document
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Current epoch (bumped on every invalidation)
    pub epoch: u64,
    /// Pages with a cached index
    pub pages_cached: usize,
    /// Pages with a slot but no index yet (in flight or failed)
    pub pages_pending: usize,
}

/// Page text cache bound to one document at a time
pub struct PageTextCache {
    state: RwLock<CacheState>,
    scale: f64,
    page_timeout: Duration,
}

impl PageTextCache {
    pub fn new(document: Arc<dyn PdfDocument>, scale: f64, page_timeout: Duration) -> Self {
        Self {
            state: RwLock::new(CacheState {
                document,
                epoch: 0,
                pages: HashMap::new(),
            }),
            scale,
            page_timeout,
        }
    }

    /// Current document and epoch
    pub async fn binding(&self) -> Binding {
        let state = self.state.read().await;
        Binding {
            document: state.document.clone(),
            epoch: state.epoch,
        }
    }

    /// Index for a page of the currently bound document
    pub async fn ensure(&self, page_number: u32) -> Arc<PageTextIndex> {
        let binding = self.binding().await;
        self.ensure_for(&binding, page_number).await
    }

    /// Index for a page of `binding`'s document
    ///
    /// Never fails: a page that cannot be extracted yields an empty index,
    /// which is not retained so a later call tries again. If `binding` is
    /// stale the page is extracted without touching the cache.
    pub async fn ensure_for(&self, binding: &Binding, page_number: u32) -> Arc<PageTextIndex> {
        let document = binding.document.as_ref();

        let Some(slot) = self.slot(binding, page_number).await else {
            tracing::debug!(
                page = page_number,
                epoch = binding.epoch,
                "Stale binding, extracting without caching"
            );
            return match self.extract(document, page_number).await {
                Ok(index) => index,
                Err(err) => self.failed(document, page_number, err),
            };
        };

        if let Some(index) = slot.get() {
            tracing::trace!(page = page_number, "Page text cache hit");
            return index.clone();
        }

        match slot
            .get_or_try_init(|| self.extract(document, page_number))
            .await
        {
            Ok(index) => index.clone(),
            Err(err) => self.failed(document, page_number, err),
        }
    }

    /// Cached index for a page, without extracting
    pub async fn peek(&self, page_number: u32) -> Option<Arc<PageTextIndex>> {
        let state = self.state.read().await;
        state
            .pages
            .get(&page_number)
            .and_then(|slot| slot.get().cloned())
    }

    /// Drop every cached page
    pub async fn invalidate_all(&self) {
        let mut state = self.state.write().await;
        state.pages.clear();
        state.epoch += 1;
        tracing::debug!(epoch = state.epoch, "Page text cache invalidated");
    }

    /// Bind a new document and drop every cached page
    pub async fn rebind(&self, document: Arc<dyn PdfDocument>) {
        let mut state = self.state.write().await;
        state.document = document;
        state.pages.clear();
        state.epoch += 1;
        tracing::debug!(
            document = state.document.id(),
            epoch = state.epoch,
            "Page text cache rebound"
        );
    }

    pub async fn epoch(&self) -> u64 {
        self.state.read().await.epoch
    }

    /// Number of pages with a cached index
    pub async fn len(&self) -> usize {
        let state = self.state.read().await;
        state.pages.values().filter(|slot| slot.initialized()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn stats(&self) -> CacheStats {
        let state = self.state.read().await;
        let pages_cached = state
            .pages
            .values()
            .filter(|slot| slot.initialized())
            .count();

        CacheStats {
            epoch: state.epoch,
            pages_cached,
            pages_pending: state.pages.len() - pages_cached,
        }
    }

    /// Slot for a page, created on demand; `None` if `binding` is stale
    async fn slot(&self, binding: &Binding, page_number: u32) -> Option<PageSlot> {
        {
            let state = self.state.read().await;
            if state.epoch != binding.epoch {
                return None;
            }
            if let Some(slot) = state.pages.get(&page_number) {
                return Some(slot.clone());
            }
        }

        let mut state = self.state.write().await;
        if state.epoch != binding.epoch {
            return None;
        }
        Some(
            state
                .pages
                .entry(page_number)
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone(),
        )
    }

    async fn extract(
        &self,
        document: &dyn PdfDocument,
        page_number: u32,
    ) -> DocumentResult<Arc<PageTextIndex>> {
        tracing::debug!(
            document = document.id(),
            page = page_number,
            "Extracting page text"
        );

        let work = async {
            let page = document.get_page(page_number).await?;
            let viewport = page.viewport(self.scale);
            let content = page.text_content().await?;
            Ok::<_, DocumentError>(PageTextIndex::build(page_number, content.items, viewport))
        };

        let index = timeout(self.page_timeout, work)
            .await
            .map_err(|_| DocumentError::Timeout(self.page_timeout.as_secs()))??;

        Ok(Arc::new(index))
    }

    fn failed(
        &self,
        document: &dyn PdfDocument,
        page_number: u32,
        err: DocumentError,
    ) -> Arc<PageTextIndex> {
        tracing::warn!(
            document = document.id(),
            page = page_number,
            "Error extracting page text: {}",
            err
        );
        Arc::new(PageTextIndex::empty(page_number))
    }
}
