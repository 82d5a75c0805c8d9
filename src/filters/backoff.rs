use super::{Filter, FilterContext};
use crate::constants::BACKOFF_PRIORITY;
use crate::geometry::Rect;
use crate::input::Direction;
use tracing::trace;

/// Falls back to the last committed rect when an earlier stage (usually the
/// ratio lock fitting into a corner) left the rect below the minimum size.
#[derive(Debug, Default, Clone, Copy)]
pub struct BackoffFilter;

const TOLERANCE: f64 = 1e-9;

impl Filter for BackoffFilter {
    fn tag(&self) -> &str {
        "backoff"
    }

    fn priority(&self) -> i32 {
        BACKOFF_PRIORITY
    }

    fn apply(&self, rect: Rect, _direction: Direction, ctx: &mut FilterContext<'_>) -> Rect {
        let [min_w, min_h] = ctx.selection.settings().min_size;
        let too_small = (min_w > 0.0 && rect.w < min_w - TOLERANCE)
            || (min_h > 0.0 && rect.h < min_h - TOLERANCE);
        match ctx.selection.last() {
            Some(last) if too_small => {
                trace!(w = rect.w, h = rect.h, "below minimum size, backing off");
                last
            }
            _ => rect,
        }
    }
}
