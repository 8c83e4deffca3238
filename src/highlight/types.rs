//! Highlight types
//!
//! Highlights store only scaled geometry; viewport rectangles are derived on
//! demand for whatever zoom the page is currently rendered at.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{to_viewport_rect, ViewportRect};
use crate::search::{ScaledPosition, SearchMatch};

/// Highlight category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HighlightCategory {
    ExtractedText,
    ExtractedCode,
    IctCode,
    Codes,
    #[serde(rename = "text+code")]
    TextPlusCode,
    /// Any category this crate does not know about
    #[serde(other)]
    Other,
}

/// Highlighted content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightContent {
    pub text: String,
}

/// A positioned text highlight
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    /// Unique identifier
    pub id: String,
    pub content: HighlightContent,
    /// Scale-independent geometry
    pub position: ScaledPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<HighlightCategory>,
    /// CSS color override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Highlight {
    /// Create a highlight with a fresh UUID
    pub fn new(text: impl Into<String>, position: ScaledPosition) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: HighlightContent { text: text.into() },
            position,
            comment: None,
            category: None,
            color: None,
            created_at: Utc::now(),
        }
    }

    /// Highlight covering a search match; keeps the match id
    pub fn from_match(search_match: &SearchMatch) -> Self {
        Self {
            id: search_match.id.clone(),
            ..Self::new(
                search_match.text.clone(),
                search_match.scaled_position.clone(),
            )
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_category(mut self, category: HighlightCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn page_number(&self) -> u32 {
        self.position.bounding_rect.page_number
    }

    pub fn text(&self) -> &str {
        &self.content.text
    }

    /// Per-run rectangles on a viewport of the given pixel size
    pub fn viewport_rects(&self, viewport_width: f64, viewport_height: f64) -> Vec<ViewportRect> {
        self.position
            .rects
            .iter()
            .map(|r| to_viewport_rect(r, viewport_width, viewport_height))
            .collect()
    }

    /// Bounding rectangle on a viewport of the given pixel size
    pub fn viewport_bounding_rect(
        &self,
        viewport_width: f64,
        viewport_height: f64,
    ) -> ViewportRect {
        to_viewport_rect(&self.position.bounding_rect, viewport_width, viewport_height)
    }
}
