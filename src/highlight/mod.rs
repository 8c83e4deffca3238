//! Highlights
//!
//! Positioned annotations built from search matches or backend records.

mod backend;
mod types;

pub use backend::{
    parse_backend_payload, resolve_backend_highlight, resolve_backend_highlights,
    BackendCoordinates, BackendHighlight,
};
pub use types::{Highlight, HighlightCategory, HighlightContent};
