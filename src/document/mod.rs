//! Document abstraction
//!
//! The search engine never parses PDFs itself. It consumes a [`PdfDocument`]
//! that hands out [`PdfPage`]s, each able to report its viewport and its
//! positioned text runs.
//!
//! ```text
//! ┌──────────────┐   get_page(n)   ┌──────────────┐
//! │ PdfDocument  │ ──────────────▶ │   PdfPage    │
//! └──────────────┘                 └──────────────┘
//!                                    │         │
//!                          viewport(s)│         │text_content()
//!                                    ▼         ▼
//!                              ┌──────────┐ ┌─────────────┐
//!                              │ Viewport │ │ TextContent │
//!                              └──────────┘ └─────────────┘
//! ```

mod error;
mod memory;
mod traits;
mod types;

pub use error::{DocumentError, DocumentResult, Result};
pub use memory::{MemoryDocument, MemoryPage};
pub use traits::{PdfDocument, PdfPage};
pub use types::{TextContent, TextRun};
