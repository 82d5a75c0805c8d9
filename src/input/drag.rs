//! Pointer move handling - turns pointer motion into candidate rects.
//!
//! ## Performance Notes
//!
//! Pointer move fires at display rate while a gesture is live and every call
//! runs the full filter pipeline. Each call is timed against the surface clock
//! and recorded in [`Cropper::move_stats`]; calls slower than `SLOW_MOVE_MS`
//! are logged.
//!
//! Enable profiling with `cargo build --features profiling` to see scope
//! timing.

use super::{CoordinateConverter, Direction, DragMode, DragState, PointerInput};
use crate::constants::SLOW_MOVE_MS;
use crate::cropper::Cropper;
use crate::events::CropEvent;
use crate::geometry::{Point, Rect};
use crate::perf::log_if_slow;
use crate::profile_scope;
use crate::selection::Selection;
use crate::surface::Surface;
use tracing::trace;

/// Candidate rect for an adjust gesture, before filtering.
///
/// `move` translates the origin rect. Edge and corner directions move the
/// named edges by the pointer delta while the opposite edges stay anchored; a
/// moving edge stops at its anchor, so the size floors at 0.
pub fn drag_rect(origin: &Rect, direction: Direction, dx: f64, dy: f64) -> Rect {
    if direction == Direction::Move {
        return origin.translate(dx, dy);
    }
    let (mut x, mut y, mut x2, mut y2) = (origin.x, origin.y, origin.x2, origin.y2);

    if direction.moves_west() {
        x = (x + dx).min(x2);
    } else if direction.moves_east() {
        x2 = (x2 + dx).max(x);
    }
    if direction.moves_north() {
        y = (y + dy).min(y2);
    } else if direction.moves_south() {
        y2 = (y2 + dy).max(y);
    }
    Rect::from_edges(x, y, x2, y2)
}

/// Keep a translated rect inside `bounds` without changing its size.
///
/// A rect larger than the bounds on an axis is pinned to the near edge.
pub fn clamp_move(rect: Rect, bounds: &Rect) -> Rect {
    let x = rect.x.min(bounds.x2 - rect.w).max(bounds.x);
    let y = rect.y.min(bounds.y2 - rect.h).max(bounds.y);
    Rect::from_xywh(x, y, rect.w, rect.h)
}

/// Candidate rect and reported direction for a gesture at `pos`.
fn candidate(drag: &DragState, pos: Point, bounds: &Rect) -> (Rect, Direction) {
    match drag.mode {
        DragMode::Adjust => {
            let (dx, dy) = drag.delta(pos);
            let rect = drag_rect(&drag.origin, drag.direction, dx, dy);
            if drag.direction == Direction::Move {
                (clamp_move(rect, bounds), Direction::Move)
            } else {
                (rect, drag.direction)
            }
        }
        DragMode::Draw => {
            let (dx, dy) = drag.delta(pos);
            (Rect::spanning(drag.start, pos), Direction::quadrant(dx, dy))
        }
    }
}

impl<S: Surface> Cropper<S> {
    /// Handle a document-level pointer move. Returns false when no gesture is
    /// live.
    ///
    /// A touch move without touches reuses the last known position.
    pub fn pointer_move(&mut self, input: &PointerInput) -> bool {
        profile_scope!("pointer_move");

        let Some(index) = self.ui.multi.iter().position(Selection::is_dragging) else {
            return false;
        };
        let started_at = self.surface.now();
        let page = input.page_position();
        let pos = page.map(|p| CoordinateConverter::to_container(&self.surface, self.container, p));
        let scale = self.scale_factors();
        let size = self.container_size();

        let (mut core, multi) = self.split();
        let selection = &mut multi[index];
        let Some(pos) = selection.input.track(pos) else {
            return false;
        };
        let Some(drag) = selection.input.drag().copied() else {
            return false;
        };
        let edge = selection.settings().edge;
        let bounds = Rect::from_edges(edge.w, edge.n, size.width - edge.e, size.height - edge.s);

        let (rect, direction) = candidate(&drag, pos, &bounds);
        trace!(selection = %selection.id(), %direction, x = rect.x, y = rect.y, w = rect.w, h = rect.h, "drag candidate");

        if selection.input.mark_started() {
            if let Some(element) = selection.element() {
                let event = CropEvent::Start {
                    selection: selection.id(),
                    rect: scale.unscale(&rect),
                };
                core.emit(element, event);
            }
        }
        selection.update_raw(&mut core, rect, direction);

        let elapsed = (core.surface.now() - started_at).max(0.0);
        self.move_stats.record(elapsed);
        log_if_slow("pointer_move", elapsed, SLOW_MOVE_MS);
        true
    }
}
