//! In-memory document
//!
//! A [`PdfDocument`] backed by pre-extracted pages. Used by the CLI (loaded
//! from a JSON description), the benches and the tests.
//!
//! JSON shape:
//!
//! ```json
//! {
//!   "id": "report",
//!   "pages": [
//!     {
//!       "width": 612, "height": 792,
//!       "runs": [{ "text": "Hello", "transform": [12,0,0,12,72,700], "width": 30, "height": 12 }]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::error::{DocumentError, Result};
use super::traits::{PdfDocument, PdfPage};
use super::types::{TextContent, TextRun};
use crate::geometry::Viewport;

#[derive(Debug, Deserialize)]
struct DocumentDescription {
    #[serde(default)]
    id: Option<String>,
    pages: Vec<PageDescription>,
}

#[derive(Debug, Deserialize)]
struct PageDescription {
    width: f64,
    height: f64,
    #[serde(default)]
    runs: Vec<TextRun>,
    /// Simulate a provider that cannot extract this page
    #[serde(default)]
    failing: bool,
}

/// Page held in memory
#[derive(Debug)]
pub struct MemoryPage {
    page_number: u32,
    width: f64,
    height: f64,
    runs: Vec<TextRun>,
    failing: bool,
    text_requests: AtomicUsize,
}

impl MemoryPage {
    /// Number of `text_content` calls served so far
    pub fn text_requests(&self) -> usize {
        self.text_requests.load(Ordering::Relaxed)
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }
}

#[async_trait]
impl PdfPage for MemoryPage {
    fn page_number(&self) -> u32 {
        self.page_number
    }

    fn viewport(&self, scale: f64) -> Viewport {
        Viewport::for_page(self.width, self.height, scale)
    }

    async fn text_content(&self) -> Result<TextContent> {
        self.text_requests.fetch_add(1, Ordering::Relaxed);

        if self.failing {
            return Err(DocumentError::TextExtractionError(format!(
                "page {} has no extractable text layer",
                self.page_number
            )));
        }

        Ok(TextContent::new(self.runs.clone()))
    }
}

/// Document whose pages are held in memory
#[derive(Debug)]
pub struct MemoryDocument {
    id: String,
    pages: Vec<Arc<MemoryPage>>,
}

impl MemoryDocument {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            pages: Vec::new(),
        }
    }

    /// Append a page of `width` x `height` user-space units
    pub fn with_page(mut self, width: f64, height: f64, runs: Vec<TextRun>) -> Self {
        self.push_page(width, height, runs, false);
        self
    }

    /// Append a page whose text extraction always fails
    pub fn with_failing_page(mut self, width: f64, height: f64) -> Self {
        self.push_page(width, height, Vec::new(), true);
        self
    }

    fn push_page(&mut self, width: f64, height: f64, runs: Vec<TextRun>, failing: bool) {
        let page_number = self.pages.len() as u32 + 1;
        self.pages.push(Arc::new(MemoryPage {
            page_number,
            width,
            height,
            runs,
            failing,
            text_requests: AtomicUsize::new(0),
        }));
    }

    /// Parse a JSON document description
    pub fn from_json(json: &str) -> Result<Self> {
        let description: DocumentDescription = serde_json::from_str(json)?;

        let mut document = Self::new(description.id.unwrap_or_else(|| "document".to_string()));
        for page in description.pages {
            if !(page.width > 0.0 && page.height > 0.0) {
                return Err(DocumentError::ParseError(format!(
                    "page {} has invalid dimensions {}x{}",
                    document.pages.len() + 1,
                    page.width,
                    page.height
                )));
            }
            document.push_page(page.width, page.height, page.runs, page.failing);
        }

        Ok(document)
    }

    /// Load a JSON document description from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Direct access to a page (1-indexed)
    pub fn page(&self, page_number: u32) -> Option<&Arc<MemoryPage>> {
        page_number
            .checked_sub(1)
            .and_then(|index| self.pages.get(index as usize))
    }
}

#[async_trait]
impl PdfDocument for MemoryDocument {
    fn id(&self) -> &str {
        &self.id
    }

    fn num_pages(&self) -> u32 {
        self.pages.len() as u32
    }

    async fn get_page(&self, page_number: u32) -> Result<Arc<dyn PdfPage>> {
        let page = self
            .page(page_number)
            .cloned()
            .ok_or(DocumentError::PageNotFound(page_number))?;
        Ok(page)
    }
}
