//! Drag state machine - one per selection.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Dragging(Adjust)    (primary pointer down on a selection control)
//! Idle -> Dragging(Draw)      (primary pointer down on the empty stage)
//!
//! Dragging -> Idle            (pointer up, selection removed, controller destroyed)
//! ```
//!
//! A [`DragState`] exists only between pointer down and pointer up; it is
//! dropped as soon as the gesture ends.

use super::Direction;
use crate::geometry::{Point, Rect};

/// How pointer motion maps onto the selection's rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Move or resize an existing rect according to the drag direction
    Adjust,
    /// Span a new rect between the start point and the pointer
    Draw,
}

/// Anchors captured at pointer down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    /// Container-local pointer position at drag start
    pub start: Point,
    /// Selection rect at drag start, display scale
    pub origin: Rect,
    pub direction: Direction,
    pub mode: DragMode,
    /// Most recent pointer position; reused when an end event has no touches
    pub last_pos: Point,
    /// Whether `cropstart` has been emitted for this gesture
    pub started: bool,
}

impl DragState {
    /// Pointer delta from the drag start.
    pub fn delta(&self, pos: Point) -> (f64, f64) {
        (pos.x - self.start.x, pos.y - self.start.y)
    }
}

#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress
    #[default]
    Idle,

    /// Pointer is down and the gesture is live
    Dragging(DragState),
}

impl InputState {
    /// Returns true if the state is Idle
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true if a gesture is live
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    /// Returns true if drawing a new rect
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Dragging(d) if d.mode == DragMode::Draw)
    }

    pub fn drag(&self) -> Option<&DragState> {
        match self {
            Self::Dragging(d) => Some(d),
            Self::Idle => None,
        }
    }

    pub fn drag_mut(&mut self) -> Option<&mut DragState> {
        match self {
            Self::Dragging(d) => Some(d),
            Self::Idle => None,
        }
    }

    /// Direction of the live gesture
    pub fn direction(&self) -> Option<Direction> {
        self.drag().map(|d| d.direction)
    }

    /// Enter `Dragging`, replacing any previous gesture
    pub fn start(&mut self, start: Point, origin: Rect, direction: Direction, mode: DragMode) {
        *self = Self::Dragging(DragState {
            start,
            origin,
            direction,
            mode,
            last_pos: start,
            started: false,
        });
    }

    /// Record a pointer position, returning it (or the last known one)
    pub fn track(&mut self, pos: Option<Point>) -> Option<Point> {
        let drag = self.drag_mut()?;
        if let Some(p) = pos {
            drag.last_pos = p;
        }
        Some(drag.last_pos)
    }

    /// Mark `cropstart` as emitted; returns true the first time
    pub fn mark_started(&mut self) -> bool {
        match self.drag_mut() {
            Some(d) if !d.started => {
                d.started = true;
                true
            }
            _ => false,
        }
    }

    /// Reset to Idle state, returning the finished gesture
    pub fn reset(&mut self) -> Option<DragState> {
        match std::mem::take(self) {
            Self::Dragging(d) => Some(d),
            Self::Idle => None,
        }
    }
}
