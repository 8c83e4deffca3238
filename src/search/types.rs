//! Search result types

use serde::{Deserialize, Serialize};

use crate::geometry::{ScaledRect, ViewportRect};

/// Viewport geometry of a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Union of `rects`
    pub bounding_rect: ViewportRect,
    /// One rect per contributing run
    pub rects: Vec<ViewportRect>,
}

/// Scale-independent geometry of a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledPosition {
    /// Union of `rects`
    pub bounding_rect: ScaledRect,
    /// One rect per contributing run
    pub rects: Vec<ScaledRect>,
    /// Corners are in PDF user-space rather than viewport pixels
    #[serde(default)]
    pub use_pdf_coordinates: bool,
}

/// One located occurrence of a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    /// `search-{page}-{n}`, `n` counting matches within the page
    pub id: String,
    /// Matched text as it appears on the page
    pub text: String,
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Geometry at the scale the search ran with
    pub position: Position,
    /// Geometry re-projectable onto any zoom
    pub scaled_position: ScaledPosition,
    /// Index within the full result sequence
    pub match_index: usize,
    /// First char offset into the page text
    pub start_offset: usize,
    /// One past the last char offset into the page text
    pub end_offset: usize,
}

impl SearchMatch {
    /// Number of runs contributing to the match
    pub fn run_count(&self) -> usize {
        self.position.rects.len()
    }
}
