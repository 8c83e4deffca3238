//! Text-content types
//!
//! Shapes produced by text-content providers: one [`TextRun`] per positioned
//! string, in reading order.

use serde::{Deserialize, Serialize};

use crate::geometry::AffineTransform;

/// One atomic positioned string extracted from a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    /// Literal run text
    #[serde(alias = "str")]
    pub text: String,
    /// Page-space transform; `(e, f)` is the baseline origin
    pub transform: AffineTransform,
    /// Measured width in page user-space units
    pub width: f64,
    /// Measured height in page user-space units
    pub height: f64,
}

impl TextRun {
    pub fn new(
        text: impl Into<String>,
        transform: AffineTransform,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            text: text.into(),
            transform,
            width,
            height,
        }
    }

    /// Unrotated left-to-right run with its baseline origin at `(x, y)`
    ///
    /// The horizontal scale is set to the run height, which is what typical
    /// providers report as the font size.
    pub fn positioned(text: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            text,
            AffineTransform::new(height, 0.0, 0.0, height, x, y),
            width,
            height,
        )
    }

    /// Length in chars (not bytes)
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Text content of a single page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    /// Runs in reading order
    pub items: Vec<TextRun>,
}

impl TextContent {
    pub fn new(items: Vec<TextRun>) -> Self {
        Self { items }
    }
}
