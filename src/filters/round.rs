use super::{Filter, FilterContext};
use crate::constants::ROUND_PRIORITY;
use crate::geometry::Rect;
use crate::input::Direction;

/// Snaps edges to whole display pixels; size follows from the rounded edges.
///
/// An edge that was inside the permitted area stays inside it. Ratio-locked
/// selections pass through unchanged, since integer sides cannot hold an
/// arbitrary ratio.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoundFilter;

impl Filter for RoundFilter {
    fn tag(&self) -> &str {
        "round"
    }

    fn priority(&self) -> i32 {
        ROUND_PRIORITY
    }

    fn apply(&self, rect: Rect, _direction: Direction, ctx: &mut FilterContext<'_>) -> Rect {
        if ctx.selection.settings().aspect_ratio > 0.0 {
            return rect;
        }
        let bounds = ctx.bounds();
        let x = snap_low(rect.x, bounds.x);
        let y = snap_low(rect.y, bounds.y);
        let x2 = snap_high(rect.x2, bounds.x2).max(x);
        let y2 = snap_high(rect.y2, bounds.y2).max(y);
        Rect::from_edges(x, y, x2, y2)
    }
}

/// Round a leading edge without crossing `bound` from inside.
fn snap_low(edge: f64, bound: f64) -> f64 {
    let rounded = edge.round();
    if rounded < bound && edge >= bound {
        edge.ceil()
    } else {
        rounded
    }
}

/// Round a trailing edge without crossing `bound` from inside.
fn snap_high(edge: f64, bound: f64) -> f64 {
    let rounded = edge.round();
    if rounded > bound && edge <= bound {
        edge.floor()
    } else {
        rounded
    }
}
