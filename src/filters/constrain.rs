use super::{Filter, FilterContext};
use crate::constants::CONSTRAIN_PRIORITY;
use crate::geometry::Rect;
use crate::input::Direction;

/// Clamps the rect's edges to the permitted area; size is derived from the
/// clamped edges.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConstrainFilter;

impl ConstrainFilter {
    /// Clamp `rect` to `bounds`.
    pub fn clamp(rect: Rect, bounds: &Rect) -> Rect {
        let x = rect.x.max(bounds.x).min(bounds.x2);
        let y = rect.y.max(bounds.y).min(bounds.y2);
        // a rect entirely outside collapses onto the boundary
        let x2 = rect.x2.min(bounds.x2).max(x);
        let y2 = rect.y2.min(bounds.y2).max(y);
        Rect::from_edges(x, y, x2, y2)
    }
}

impl Filter for ConstrainFilter {
    fn tag(&self) -> &str {
        "constrain"
    }

    fn priority(&self) -> i32 {
        CONSTRAIN_PRIORITY
    }

    fn apply(&self, rect: Rect, _direction: Direction, ctx: &mut FilterContext<'_>) -> Rect {
        Self::clamp(rect, &ctx.bounds())
    }
}
