use super::{Filter, FilterContext};
use crate::constants::EXTENT_PRIORITY;
use crate::geometry::Rect;
use crate::input::Direction;

/// Enforces the selection's minimum and maximum size.
///
/// The edge being dragged gives way; the opposite edge stays put. A rect that
/// grows past the permitted area is shifted back inside. Moves are untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtentFilter;

impl Filter for ExtentFilter {
    fn tag(&self) -> &str {
        "extent"
    }

    fn priority(&self) -> i32 {
        EXTENT_PRIORITY
    }

    fn apply(&self, rect: Rect, direction: Direction, ctx: &mut FilterContext<'_>) -> Rect {
        if direction == Direction::Move {
            return rect;
        }
        let settings = ctx.selection.settings();
        let w = limit(rect.w, settings.min_size[0], settings.max_size[0]);
        let h = limit(rect.h, settings.min_size[1], settings.max_size[1]);

        let x = if direction.moves_west() { rect.x2 - w } else { rect.x };
        let y = if direction.moves_north() { rect.y2 - h } else { rect.y };

        let bounds = ctx.bounds();
        Rect::from_xywh(
            shift_into(x, w, bounds.x, bounds.x2),
            shift_into(y, h, bounds.y, bounds.y2),
            w,
            h,
        )
    }
}

/// Apply a `[min, max]` pair where 0 disables either bound. The minimum wins
/// when they conflict.
fn limit(value: f64, min: f64, max: f64) -> f64 {
    let mut v = value;
    if max > 0.0 {
        v = v.min(max);
    }
    if min > 0.0 {
        v = v.max(min);
    }
    v
}

fn shift_into(pos: f64, size: f64, lo: f64, hi: f64) -> f64 {
    let mut p = pos;
    if p + size > hi {
        p = hi - size;
    }
    if p < lo {
        p = lo;
    }
    p
}
