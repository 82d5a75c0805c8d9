use super::{Filter, FilterContext};
use crate::constants::{RATIO_EPSILON, RATIO_PRIORITY};
use crate::geometry::Rect;
use crate::input::Direction;

/// Aspect-ratio lock.
///
/// `n`/`s` drags derive width from height, `e`/`w` drags derive height from
/// width. Corner drags and moves let the dimension that changed proportionally
/// more (relative to [`Selection::reference_rect`]) drive the other; with no
/// clear winner the oversized dimension is shrunk. The edges opposite the
/// drag stay anchored, and the result is shrunk to fit the permitted area.
///
/// [`Selection::reference_rect`]: crate::Selection::reference_rect
#[derive(Debug, Default, Clone, Copy)]
pub struct RatioFilter;

impl Filter for RatioFilter {
    fn tag(&self) -> &str {
        "ratio"
    }

    fn priority(&self) -> i32 {
        RATIO_PRIORITY
    }

    fn apply(&self, rect: Rect, direction: Direction, ctx: &mut FilterContext<'_>) -> Rect {
        let ratio = ctx.selection.settings().aspect_ratio;
        if !(ratio.is_finite() && ratio > 0.0) {
            return rect;
        }

        let mut w = rect.w.max(0.0);
        let mut h = rect.h.max(0.0);
        if direction.is_vertical_edge() {
            w = h * ratio;
        } else if direction.is_horizontal_edge() {
            h = w / ratio;
        } else {
            match width_drives(&rect, ctx.selection.reference_rect()) {
                Some(true) => h = w / ratio,
                Some(false) => w = h * ratio,
                None if h == 0.0 || w / h > ratio => w = h * ratio,
                None => h = w / ratio,
            }
        }

        let bounds = ctx.bounds();
        let max_w = if direction.moves_west() {
            rect.x2 - bounds.x
        } else {
            bounds.x2 - rect.x
        };
        let max_h = if direction.moves_north() {
            rect.y2 - bounds.y
        } else {
            bounds.y2 - rect.y
        };
        if w > max_w {
            w = max_w.max(0.0);
            h = w / ratio;
        }
        if h > max_h {
            h = max_h.max(0.0);
            w = h * ratio;
        }

        let x = if direction.moves_west() { rect.x2 - w } else { rect.x };
        let y = if direction.moves_north() { rect.y2 - h } else { rect.y };
        Rect::from_xywh(x, y, w, h)
    }
}

/// `Some(true)` if width changed proportionally more than height, `Some(false)`
/// for the reverse, `None` without a reference or when the changes tie.
fn width_drives(rect: &Rect, reference: Option<Rect>) -> Option<bool> {
    let reference = reference?;
    let dw = relative_change(rect.w, reference.w);
    let dh = relative_change(rect.h, reference.h);
    if (dw - dh).abs() <= RATIO_EPSILON {
        None
    } else {
        Some(dw > dh)
    }
}

fn relative_change(new: f64, old: f64) -> f64 {
    let delta = (new - old).abs();
    if old > 0.0 { delta / old } else { delta }
}
