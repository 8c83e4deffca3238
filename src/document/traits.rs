//! Document traits
//!
//! Interfaces the search engine consumes. Rendering backends implement these
//! to expose page geometry and positioned text.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::Result;
use super::types::TextContent;
use crate::geometry::Viewport;

/// A paginated document
#[async_trait]
pub trait PdfDocument: Send + Sync {
    /// Identifier used in logs
    fn id(&self) -> &str;

    /// Number of pages
    fn num_pages(&self) -> u32;

    /// Fetch a page handle (1-indexed)
    async fn get_page(&self, page_number: u32) -> Result<Arc<dyn PdfPage>>;
}

/// A single page of a [`PdfDocument`]
#[async_trait]
pub trait PdfPage: Send + Sync {
    /// Page number (1-indexed)
    fn page_number(&self) -> u32;

    /// Viewport mapping page user-space to pixels at `scale`
    fn viewport(&self, scale: f64) -> Viewport;

    /// Extract positioned text runs
    async fn text_content(&self) -> Result<TextContent>;
}
