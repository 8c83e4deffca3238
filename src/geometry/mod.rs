//! Coordinate model
//!
//! Viewport rectangles change with every zoom; scaled rectangles record the
//! page size they were measured against and can be projected back onto any
//! viewport later.
//!
//! ```rust
//! use highlight_locator::geometry::{to_scaled_rect, to_viewport_rect, ViewportRect};
//!
//! let rect = ViewportRect::new(10.0, 20.0, 30.0, 5.0, 1);
//! let scaled = to_scaled_rect(&rect, 600.0, 800.0, 1);
//!
//! // Same rect at 2x zoom
//! let zoomed = to_viewport_rect(&scaled, 1200.0, 1600.0);
//! assert_eq!(zoomed.left, 20.0);
//! ```

mod projection;
mod types;

pub use projection::{
    bounding_rect, rect_from_run, scaled_bounding_rect, to_scaled_rect, to_viewport_point,
    to_viewport_rect,
};
pub use types::{AffineTransform, ScaledRect, Viewport, ViewportRect};
