//! Rect reconstruction
//!
//! Turns a run span into per-run rectangles plus their union, in both the
//! viewport and the scaled form. The scaled geometry is derived from the
//! viewport geometry, never computed separately: corners are brought back to
//! scale 1 and paired with the page size at scale 1.

use crate::geometry::{bounding_rect, rect_from_run, to_scaled_rect, ViewportRect};

use super::index::PageTextIndex;
use super::locator::RunSpan;
use super::types::{Position, ScaledPosition};

/// Viewport and scaled geometry of one match
#[derive(Debug, Clone, PartialEq)]
pub struct MatchGeometry {
    pub position: Position,
    pub scaled_position: ScaledPosition,
}

/// Build the geometry for a run span
///
/// Returns `None` if no run in the span produces a usable rectangle.
pub fn reconstruct(index: &PageTextIndex, span: &RunSpan) -> Option<MatchGeometry> {
    let viewport = index.viewport()?;
    let page_number = index.page_number();
    let runs = index.runs();

    let mut rects: Vec<ViewportRect> = Vec::with_capacity(span.run_count());
    for run_index in span.first_run..=span.last_run {
        let Some(run) = runs.get(run_index) else {
            continue;
        };
        let char_count = run.char_len();

        let start = if run_index == span.first_run {
            span.first_char
        } else {
            0
        };
        let end = if run_index == span.last_run {
            span.last_char_end.min(char_count)
        } else {
            char_count
        };
        if start >= end {
            continue;
        }

        let rect = rect_from_run(run, start, end, viewport, page_number);
        if !rect.is_degenerate() {
            rects.push(rect);
        }
    }

    if rects.is_empty() {
        return None;
    }

    let bound = bounding_rect(&rects, page_number);

    let scale = viewport.scale;
    let page_width = viewport.width / scale;
    let page_height = viewport.height / scale;
    let scaled_rects = rects
        .iter()
        .map(|r| to_scaled_rect(&r.unscaled(scale), page_width, page_height, page_number))
        .collect();
    let scaled_bound =
        to_scaled_rect(&bound.unscaled(scale), page_width, page_height, page_number);

    Some(MatchGeometry {
        position: Position {
            bounding_rect: bound,
            rects,
        },
        scaled_position: ScaledPosition {
            bounding_rect: scaled_bound,
            rects: scaled_rects,
            use_pdf_coordinates: false,
        },
    })
}
