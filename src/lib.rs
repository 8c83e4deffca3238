//! Highlight Locator Library
//!
//! Locates text across a paginated document and returns re-projectable
//! highlight geometry for every occurrence.
//!
//! # Modules
//!
//! - `geometry`: viewport and scale-independent rectangles, conversions
//! - `document`: document/page provider traits and an in-memory document
//! - `search`: per-page text cache, match locator, rect reconstruction, engine
//! - `highlight`: highlight objects built from matches or backend records
//! - `config`: engine configuration

pub mod config;
pub mod document;
pub mod geometry;
pub mod highlight;
pub mod search;

pub use config::{Config, SearchConfig};
pub use document::{MemoryDocument, PdfDocument, PdfPage, TextRun};
pub use search::{SearchEngine, SearchMatch};
