//! Rectangle and coordinate-space primitives.
//!
//! Two coordinate spaces exist: *display* space (surface pixels) and *true*
//! space (source image pixels). They are related by per-axis factors:
//! `true = display * scale`.

use crate::error::{CropError, CropResult};
use serde::{Deserialize, Serialize};

/// A point in container-local display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned box with redundant edge and size fields.
///
/// `x2 == x + w` and `y2 == y + h` hold for every rect the engine commits.
/// Intermediate rects handed between filter stages may break this transiently;
/// they are re-derived before being trusted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub x2: f64,
    pub y2: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    /// Build a rect from origin and size.
    pub fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            x2: x + w,
            y2: y + h,
            w,
            h,
        }
    }

    /// Build a rect from its four edges; size is derived.
    pub fn from_edges(x: f64, y: f64, x2: f64, y2: f64) -> Self {
        Self {
            x,
            y,
            x2,
            y2,
            w: x2 - x,
            h: y2 - y,
        }
    }

    /// Smallest rect spanning two points, whatever their order.
    pub fn spanning(a: Point, b: Point) -> Self {
        Self::from_edges(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// Convert an `[x, y, w, h]` array into a rect.
    ///
    /// Fails unless the slice has exactly four elements.
    pub fn wrap_from_xywh(values: &[f64]) -> CropResult<Self> {
        match *values {
            [x, y, w, h] => Ok(Self::from_xywh(x, y, w, h)),
            _ => Err(CropError::InvalidCoordinates { len: values.len() }),
        }
    }

    /// `[x, y, w, h]` view of this rect.
    pub fn to_xywh(&self) -> [f64; 4] {
        [self.x, self.y, self.w, self.h]
    }

    /// Recompute `x2, y2` from origin and size.
    #[inline]
    pub fn rederive(self) -> Self {
        Self::from_xywh(self.x, self.y, self.w, self.h)
    }

    /// Recompute `w, h` from the four edges.
    #[inline]
    pub fn resize_from_edges(self) -> Self {
        Self::from_edges(self.x, self.y, self.x2, self.y2)
    }

    /// Translate both edges on each axis, keeping size.
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::from_xywh(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Whether the point lies inside or on the boundary.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.x2 && point.y >= self.y && point.y <= self.y2
    }

    /// Whether `x2 == x + w` and `y2 == y + h` within `eps`.
    pub fn is_consistent(&self, eps: f64) -> bool {
        (self.x2 - (self.x + self.w)).abs() <= eps && (self.y2 - (self.y + self.h)).abs() <= eps
    }

    /// Field-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Rect, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.x2 - other.x2).abs() <= eps
            && (self.y2 - other.y2).abs() <= eps
            && (self.w - other.w).abs() <= eps
            && (self.h - other.h).abs() <= eps
    }

    /// Linear interpolation of origin and size; `t` is clamped to `0..=1`.
    pub fn lerp(from: &Rect, to: &Rect, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::from_xywh(
            from.x + (to.x - from.x) * t,
            from.y + (to.y - from.y) * t,
            from.w + (to.w - from.w) * t,
            from.h + (to.h - from.h) * t,
        )
    }
}

/// Per-axis factors relating display space to true space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

impl Default for Scale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Scale {
    pub const IDENTITY: Scale = Scale { x: 1.0, y: 1.0 };

    /// Create a scale; zero, negative or non-finite factors fall back to 1.
    pub fn new(x: f64, y: f64) -> Self {
        let sanitize = |v: f64| if v.is_finite() && v > 0.0 { v } else { 1.0 };
        Self {
            x: sanitize(x),
            y: sanitize(y),
        }
    }

    /// True-space rect to display space.
    pub fn scale(&self, rect: &Rect) -> Rect {
        Rect::from_xywh(
            rect.x / self.x,
            rect.y / self.y,
            rect.w / self.x,
            rect.h / self.y,
        )
    }

    /// Display-space rect to true space.
    pub fn unscale(&self, rect: &Rect) -> Rect {
        Rect::from_xywh(
            rect.x * self.x,
            rect.y * self.y,
            rect.w * self.x,
            rect.h * self.y,
        )
    }
}

/// Largest `ratio` (width / height) box fitting in `max_w` x `max_h`.
///
/// Full width is tried first; if the height overflows, height is pinned and
/// width derived instead. Both values are rounded to the nearest integer.
pub fn largest_box(ratio: f64, max_w: f64, max_h: f64) -> (f64, f64) {
    let mut w = max_w;
    let mut h = max_w / ratio;
    if h > max_h {
        h = max_h;
        w = max_h * ratio;
    }
    (w.round(), h.round())
}
