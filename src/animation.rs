//! Linear selection animation driven by host display frames.
//!
//! An [`Animation`] captures the start and target rects and a start time. The
//! controller asks the surface for a frame, steps the animation from
//! [`Cropper::on_frame`](crate::Cropper::on_frame), and drops it once progress
//! reaches 1.

use crate::geometry::Rect;
use crate::selection::SelectionId;
use std::fmt;

/// Called with the animated selection once the target rect is committed.
pub type AnimationCallback = Box<dyn FnOnce(SelectionId)>;

pub struct Animation {
    target: SelectionId,
    /// Display scale
    from: Rect,
    /// Display scale
    to: Rect,
    start: f64,
    duration: f64,
    callback: Option<AnimationCallback>,
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("target", &self.target)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("start", &self.start)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

impl Animation {
    pub fn new(
        target: SelectionId,
        from: Rect,
        to: Rect,
        start: f64,
        duration: f64,
        callback: Option<AnimationCallback>,
    ) -> Self {
        Self {
            target,
            from,
            to,
            start,
            duration,
            callback,
        }
    }

    pub fn target(&self) -> SelectionId {
        self.target
    }

    pub fn destination(&self) -> Rect {
        self.to
    }

    /// Progress in `0..=1` at time `now`. A non-positive duration is
    /// complete immediately.
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start) / self.duration).clamp(0.0, 1.0)
    }

    /// Interpolated rect at `now` and whether the animation has finished.
    pub fn step(&self, now: f64) -> (Rect, bool) {
        let t = self.progress(now);
        if t >= 1.0 {
            (self.to, true)
        } else {
            (Rect::lerp(&self.from, &self.to, t), false)
        }
    }

    /// Take the completion callback; `None` after the first call.
    pub fn take_callback(&mut self) -> Option<AnimationCallback> {
        self.callback.take()
    }
}
