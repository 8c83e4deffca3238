//! Document text search
//!
//! # Architecture
//!
//! ```text
//! search_text(query)
//!        │
//!        ▼
//! ┌──────────────┐  ensure(page)  ┌──────────────────┐  get_page / text_content
//! │ SearchEngine │ ─────────────▶ │  PageTextCache   │ ───────────────────────▶ PdfDocument
//! └──────────────┘                └──────────────────┘
//!        │                                 │
//!        │                        PageTextIndex (text + char map)
//!        ▼                                 │
//! ┌──────────────┐   run spans    ┌──────────────────┐
//! │ locate()     │ ─────────────▶ │  reconstruct()   │ ──▶ SearchMatch
//! └──────────────┘                └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use highlight_locator::search::SearchEngine;
//!
//! let engine = SearchEngine::new(document);
//! for m in engine.search_text("chest pain").await {
//!     println!("{} on page {}: {:?}", m.text, m.page_number, m.position.bounding_rect);
//! }
//! ```

mod cache;
mod engine;
mod index;
mod locator;
mod reconstruct;
mod types;

pub use cache::{Binding, CacheStats, PageTextCache};
pub use engine::SearchEngine;
pub use index::{fold_char, fold_query, CharSlot, PageTextIndex, SEPARATOR};
pub use locator::{
    find_occurrences, locate, resolve_span, LocatedMatch, Occurrence, RunSpan,
    MAX_EXPECTED_RUN_SPAN,
};
pub use reconstruct::{reconstruct, MatchGeometry};
pub use types::{Position, ScaledPosition, SearchMatch};
