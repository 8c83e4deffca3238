//! Pure conversions between page user-space, viewport pixels and the
//! scale-independent rectangle form.
//!
//! None of these functions fail. Inputs that cannot produce geometry yield a
//! zero-area rect, which callers filter with `is_degenerate()`.

use crate::document::TextRun;

use super::types::{ScaledRect, Viewport, ViewportRect};

/// Map a page user-space point through the viewport transform
#[inline]
pub fn to_viewport_point(page_x: f64, page_y: f64, viewport: &Viewport) -> (f64, f64) {
    viewport.convert_to_viewport_point(page_x, page_y)
}

/// Estimate the viewport rectangle covering chars `[start_char, end_char)` of a run
///
/// Glyph advances are not available, so every char of the run is assumed to
/// take `run.width / char_count` user-space units. Only the sign of the
/// transform's `a` component is used (left-to-right vs mirrored runs).
pub fn rect_from_run(
    run: &TextRun,
    start_char: usize,
    end_char: usize,
    viewport: &Viewport,
    page_number: u32,
) -> ViewportRect {
    let char_count = run.char_len();
    if char_count == 0 || start_char >= end_char || end_char > char_count {
        return ViewportRect::empty(page_number);
    }

    let char_width = run.width / char_count as f64;
    let direction = if run.transform.a < 0.0 { -1.0 } else { 1.0 };
    let (origin_x, baseline) = run.transform.origin();

    let left = origin_x + start_char as f64 * char_width * direction;
    let width = (end_char - start_char) as f64 * char_width;

    let (x0, y0) = to_viewport_point(left, baseline, viewport);
    let (x1, y1) = to_viewport_point(left + width, baseline + run.height, viewport);

    let rect = ViewportRect::new(
        x0.min(x1),
        y0.min(y1),
        (x1 - x0).abs(),
        (y1 - y0).abs(),
        page_number,
    );

    if rect.is_degenerate() {
        ViewportRect::empty(page_number)
    } else {
        rect
    }
}

/// Repackage a viewport rect as a scaled rect against the given page size
pub fn to_scaled_rect(
    rect: &ViewportRect,
    page_width: f64,
    page_height: f64,
    page_number: u32,
) -> ScaledRect {
    ScaledRect {
        x1: rect.left,
        y1: rect.top,
        x2: rect.right(),
        y2: rect.bottom(),
        width: page_width,
        height: page_height,
        page_number,
    }
}

/// Re-project a scaled rect onto a viewport of the given pixel size
pub fn to_viewport_rect(
    scaled: &ScaledRect,
    viewport_width: f64,
    viewport_height: f64,
) -> ViewportRect {
    if scaled.width <= 0.0 || scaled.height <= 0.0 {
        return ViewportRect::empty(scaled.page_number);
    }

    let sx = viewport_width / scaled.width;
    let sy = viewport_height / scaled.height;

    ViewportRect::from_ltrb(
        scaled.x1 * sx,
        scaled.y1 * sy,
        scaled.x2 * sx,
        scaled.y2 * sy,
        scaled.page_number,
    )
}

/// Smallest axis-aligned rect containing every input rect
///
/// Returns a zero-area rect when `rects` is empty.
pub fn bounding_rect(rects: &[ViewportRect], page_number: u32) -> ViewportRect {
    if rects.is_empty() {
        return ViewportRect::empty(page_number);
    }

    let left = rects.iter().map(|r| r.left).fold(f64::INFINITY, f64::min);
    let top = rects.iter().map(|r| r.top).fold(f64::INFINITY, f64::min);
    let right = rects.iter().map(|r| r.right()).fold(f64::NEG_INFINITY, f64::max);
    let bottom = rects.iter().map(|r| r.bottom()).fold(f64::NEG_INFINITY, f64::max);

    ViewportRect::from_ltrb(left, top, right, bottom, page_number)
}

/// Union of scaled rects; page dimensions are taken from the first rect
pub fn scaled_bounding_rect(rects: &[ScaledRect], page_number: u32) -> ScaledRect {
    let Some(first) = rects.first() else {
        return ScaledRect::empty(page_number);
    };

    ScaledRect {
        x1: rects.iter().map(|r| r.x1).fold(f64::INFINITY, f64::min),
        y1: rects.iter().map(|r| r.y1).fold(f64::INFINITY, f64::min),
        x2: rects.iter().map(|r| r.x2).fold(f64::NEG_INFINITY, f64::max),
        y2: rects.iter().map(|r| r.y2).fold(f64::NEG_INFINITY, f64::max),
        width: first.width,
        height: first.height,
        page_number,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::AffineTransform;

    fn run(text: &str, x: f64, y: f64, width: f64, height: f64) -> TextRun {
        TextRun::positioned(text, x, y, width, height)
    }

    #[test]
    fn test_rect_from_run_interpolates_chars() {
        let viewport = Viewport::for_page(600.0, 800.0, 1.0);
        let r = run("abcdefghij", 100.0, 700.0, 50.0, 10.0);

        let rect = rect_from_run(&r, 2, 5, &viewport, 1);
        assert_eq!(rect.left, 110.0);
        assert_eq!(rect.width, 15.0);
        // baseline at y=700 -> 100px from top, glyph box extends 10 units upwards
        assert_eq!(rect.top, 90.0);
        assert_eq!(rect.height, 10.0);
        assert_eq!(rect.page_number, 1);
    }

    #[test]
    fn test_rect_from_run_scales_with_viewport() {
        let viewport = Viewport::for_page(600.0, 800.0, 2.0);
        let r = run("abcd", 100.0, 700.0, 40.0, 10.0);

        let rect = rect_from_run(&r, 0, 4, &viewport, 1);
        assert_eq!(rect.left, 200.0);
        assert_eq!(rect.width, 80.0);
        assert_eq!(rect.top, 180.0);
        assert_eq!(rect.height, 20.0);
    }

    #[test]
    fn test_rect_from_run_mirrored_direction() {
        let viewport = Viewport::for_page(600.0, 800.0, 1.0);
        let mut r = run("abcd", 100.0, 700.0, 40.0, 10.0);
        r.transform = AffineTransform::new(-10.0, 0.0, 0.0, 10.0, 100.0, 700.0);

        let rect = rect_from_run(&r, 1, 2, &viewport, 1);
        assert_eq!(rect.left, 90.0);
        assert_eq!(rect.width, 10.0);
    }

    #[test]
    fn test_rect_from_run_degenerate_inputs() {
        let viewport = Viewport::for_page(600.0, 800.0, 1.0);
        let r = run("abc", 0.0, 0.0, 30.0, 10.0);

        assert!(rect_from_run(&r, 2, 2, &viewport, 1).is_degenerate());
        assert!(rect_from_run(&r, 0, 4, &viewport, 1).is_degenerate());
        assert!(rect_from_run(&run("", 0.0, 0.0, 0.0, 10.0), 0, 1, &viewport, 1).is_degenerate());
        let flat = run("abc", 0.0, 0.0, 30.0, 0.0);
        assert!(rect_from_run(&flat, 0, 1, &viewport, 1).is_degenerate());
    }

    #[test]
    fn test_scaled_rect_carries_page_dimensions() {
        let rect = ViewportRect::new(10.0, 20.0, 30.0, 5.0, 2);
        let scaled = to_scaled_rect(&rect, 612.0, 792.0, 2);

        assert_eq!(scaled.x1, 10.0);
        assert_eq!(scaled.y1, 20.0);
        assert_eq!(scaled.x2, 40.0);
        assert_eq!(scaled.y2, 25.0);
        assert_eq!(scaled.width, 612.0);
        assert_eq!(scaled.height, 792.0);
        assert_eq!(scaled.page_number, 2);
    }

    #[test]
    fn test_reprojection_at_double_zoom() {
        let rect = ViewportRect::new(10.0, 20.0, 30.0, 5.0, 1);
        let scaled = to_scaled_rect(&rect, 600.0, 800.0, 1);

        let zoomed = to_viewport_rect(&scaled, 1200.0, 1600.0);
        assert_eq!(zoomed, ViewportRect::new(20.0, 40.0, 60.0, 10.0, 1));

        let same = to_viewport_rect(&scaled, 600.0, 800.0);
        assert_eq!(same, rect);
    }

    #[test]
    fn test_bounding_rect_union() {
        let rects = [
            ViewportRect::new(10.0, 20.0, 30.0, 10.0, 1),
            ViewportRect::new(5.0, 35.0, 10.0, 10.0, 1),
        ];
        let bound = bounding_rect(&rects, 1);
        assert_eq!(bound, ViewportRect::new(5.0, 20.0, 35.0, 25.0, 1));

        assert!(bounding_rect(&[], 4).is_degenerate());
        assert_eq!(bounding_rect(&[], 4).page_number, 4);
    }

    #[test]
    fn test_scaled_bounding_rect_union() {
        let a = to_scaled_rect(&ViewportRect::new(10.0, 20.0, 30.0, 10.0, 1), 600.0, 800.0, 1);
        let b = to_scaled_rect(&ViewportRect::new(5.0, 35.0, 10.0, 10.0, 1), 600.0, 800.0, 1);
        let bound = scaled_bounding_rect(&[a, b], 1);

        assert_eq!((bound.x1, bound.y1, bound.x2, bound.y2), (5.0, 20.0, 40.0, 45.0));
        assert_eq!((bound.width, bound.height), (600.0, 800.0));
        assert!(scaled_bounding_rect(&[], 1).is_degenerate());
    }
}
