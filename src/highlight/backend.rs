//! Highlights from backend records
//!
//! A backend may send highlights with precomputed scaled coordinates, or only
//! the text and page number. In the latter case the text is located on that
//! page with the search engine and the first match is used.

use serde::{Deserialize, Serialize};

use crate::geometry::ScaledRect;
use crate::search::{ScaledPosition, SearchEngine};

use super::types::{Highlight, HighlightCategory};

/// Precomputed scaled geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendCoordinates {
    pub bounding_rect: ScaledRect,
    pub rects: Vec<ScaledRect>,
}

/// One highlight as delivered by a backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendHighlight {
    pub text: String,
    /// Page number (1-indexed)
    pub page_number: u32,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub category: Option<HighlightCategory>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub coordinates: Option<BackendCoordinates>,
}

/// Accepted payload shapes: `{"highlights": [...]}` or a bare array
#[derive(Deserialize)]
#[serde(untagged)]
enum BackendPayload {
    Wrapped { highlights: Vec<BackendHighlight> },
    Bare(Vec<BackendHighlight>),
}

/// Parse a backend response body
pub fn parse_backend_payload(json: &str) -> serde_json::Result<Vec<BackendHighlight>> {
    Ok(match serde_json::from_str(json)? {
        BackendPayload::Wrapped { highlights } => highlights,
        BackendPayload::Bare(highlights) => highlights,
    })
}

/// Turn one backend record into a highlight
///
/// Returns `None` when no coordinates were supplied and the text cannot be
/// found on the given page.
pub async fn resolve_backend_highlight(
    engine: &SearchEngine,
    data: &BackendHighlight,
) -> Option<Highlight> {
    let position = match &data.coordinates {
        Some(coordinates) => ScaledPosition {
            bounding_rect: coordinates.bounding_rect,
            rects: coordinates.rects.clone(),
            use_pdf_coordinates: false,
        },
        None => {
            let found = engine.search_page(data.page_number, &data.text).await;
            let Some(first) = found.into_iter().next() else {
                tracing::warn!(
                    page = data.page_number,
                    "Text not found for backend highlight: {:?}",
                    preview(&data.text)
                );
                return None;
            };
            first.scaled_position
        }
    };

    let mut highlight = Highlight::new(data.text.clone(), position);
    highlight.comment = data.comment.clone();
    highlight.category = data.category;
    highlight.color = data.color.clone();

    tracing::debug!(
        id = %highlight.id,
        page = highlight.page_number(),
        "Backend highlight resolved"
    );
    Some(highlight)
}

/// Resolve a batch of backend records in order, skipping unresolvable ones
pub async fn resolve_backend_highlights(
    engine: &SearchEngine,
    records: &[BackendHighlight],
) -> Vec<Highlight> {
    let mut highlights = Vec::with_capacity(records.len());
    for record in records {
        if let Some(highlight) = resolve_backend_highlight(engine, record).await {
            highlights.push(highlight);
        }
    }
    highlights
}

fn preview(text: &str) -> String {
    const PREVIEW_CHARS: usize = 50;
    let mut out: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        out.push_str("...");
    }
    out
}
