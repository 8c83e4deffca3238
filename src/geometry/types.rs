//! Coordinate types
//!
//! Two rectangle spaces are used throughout the crate:
//!
//! - [`ViewportRect`]: pixels at the current render scale.
//! - [`ScaledRect`]: corner coordinates plus the dimensions of the page they
//!   were measured against, so they can be re-projected at any zoom.

use serde::{Deserialize, Serialize};

/// Six-value affine matrix `(a, b, c, d, e, f)`
///
/// Maps `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`. Serialized as a plain
/// six-element array, matching what text-content providers emit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 6]", into = "[f64; 6]")]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl AffineTransform {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Apply the transform to a point
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Origin of the transformed space (`e`, `f`)
    pub fn origin(&self) -> (f64, f64) {
        (self.e, self.f)
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[f64; 6]> for AffineTransform {
    fn from(m: [f64; 6]) -> Self {
        Self::new(m[0], m[1], m[2], m[3], m[4], m[5])
    }
}

impl From<AffineTransform> for [f64; 6] {
    fn from(t: AffineTransform) -> Self {
        [t.a, t.b, t.c, t.d, t.e, t.f]
    }
}

/// On-screen mapping of one page at a specific zoom
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    /// Page width in pixels at `scale`
    pub width: f64,
    /// Page height in pixels at `scale`
    pub height: f64,
    /// Zoom factor
    pub scale: f64,
    /// Page user-space to viewport pixels
    pub transform: AffineTransform,
}

impl Viewport {
    pub fn new(width: f64, height: f64, scale: f64, transform: AffineTransform) -> Self {
        Self {
            width,
            height,
            scale,
            transform,
        }
    }

    /// Standard unrotated viewport for a page of `page_width` x `page_height`
    /// user-space units.
    ///
    /// PDF user space has its origin at the bottom-left with Y growing
    /// upwards; viewport pixels start at the top-left with Y growing
    /// downwards.
    pub fn for_page(page_width: f64, page_height: f64, scale: f64) -> Self {
        Self {
            width: page_width * scale,
            height: page_height * scale,
            scale,
            transform: AffineTransform::new(scale, 0.0, 0.0, -scale, 0.0, page_height * scale),
        }
    }

    /// Map a page user-space point to viewport pixels
    #[inline]
    pub fn convert_to_viewport_point(&self, x: f64, y: f64) -> (f64, f64) {
        self.transform.apply(x, y)
    }
}

/// Rectangle in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Page number (1-indexed)
    pub page_number: u32,
}

impl ViewportRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64, page_number: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
            page_number,
        }
    }

    /// Zero-area placeholder for inputs that produce no geometry
    pub fn empty(page_number: u32) -> Self {
        Self {
            page_number,
            ..Self::default()
        }
    }

    pub fn from_ltrb(left: f64, top: f64, right: f64, bottom: f64, page_number: u32) -> Self {
        Self::new(left, top, right - left, bottom - top, page_number)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// The same rect on a viewport rendered at scale 1
    pub fn unscaled(&self, scale: f64) -> Self {
        Self::new(
            self.left / scale,
            self.top / scale,
            self.width / scale,
            self.height / scale,
            self.page_number,
        )
    }

    /// True when the rect has no usable area or carries non-finite values
    pub fn is_degenerate(&self) -> bool {
        !(self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// Scale-independent rectangle
///
/// Corners are page pixels at scale 1. `width`/`height` are NOT the
/// rectangle's own size: they are the page dimensions at scale 1.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Page width at scale 1
    pub width: f64,
    /// Page height at scale 1
    pub height: f64,
    /// Page number (1-indexed)
    pub page_number: u32,
}

impl ScaledRect {
    pub fn empty(page_number: u32) -> Self {
        Self {
            page_number,
            ..Self::default()
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.x2 <= self.x1 || self.y2 <= self.y1 || self.width <= 0.0 || self.height <= 0.0
    }
}
