//! Geometry commands on the active selection - nudge, set, maximize,
//! animate, center - plus display/true scale conversion.

use super::Cropper;
use crate::animation::{Animation, AnimationCallback};
use crate::error::CropResult;
use crate::events::CropEvent;
use crate::geometry::Rect;
use crate::input::Direction;
use crate::profile_scope;
use crate::selection::{Selection, SelectionId};
use crate::surface::Surface;
use tracing::{debug, trace};

impl<S: Surface> Cropper<S> {
    /// True-scale rect to display scale.
    pub fn scale(&self, rect: &Rect) -> Rect {
        self.options.scale().scale(rect)
    }

    /// Display-scale rect to true scale.
    pub fn unscale(&self, rect: &Rect) -> Rect {
        self.options.scale().unscale(rect)
    }

    /// Translate the active selection by a display-space delta.
    ///
    /// An edge pushed past the container is pinned to it and the other edge
    /// follows, so the size is kept. Emits `cropstart`, `cropmove` and
    /// `cropend`. No-op without an active selection.
    pub fn nudge(&mut self, dx: f64, dy: f64) {
        let Some(id) = self.ui.selection else {
            debug!("nudge ignored, no active selection");
            return;
        };
        let size = self.container_size();
        let scale = self.scale_factors();

        self.with_selection(id, |selection, core| {
            let mut b = selection.get().translate(dx, dy);
            if b.x < 0.0 {
                b.x = 0.0;
                b.x2 = b.w;
            } else if b.x2 > size.width {
                b.x2 = size.width;
                b.x = b.x2 - b.w;
            }
            if b.y < 0.0 {
                b.y = 0.0;
                b.y2 = b.h;
            } else if b.y2 > size.height {
                b.y2 = size.height;
                b.y = b.y2 - b.h;
            }
            trace!(dx, dy, x = b.x, y = b.y, "nudge");

            let element = selection.element();
            if let Some(element) = element {
                core.emit(element, CropEvent::Start { selection: id, rect: scale.unscale(&b) });
            }
            let committed = selection.update_raw(core, b, Direction::Move);
            if let Some(element) = element {
                core.emit(element, CropEvent::End { selection: id, rect: scale.unscale(&committed) });
            }
        });
    }

    /// Cover the whole container with the active selection.
    pub fn max_select(&mut self) {
        let full = self.container_rect();
        if let Some(id) = self.ui.selection {
            self.with_selection(id, |s, core| s.update_raw(core, full, Direction::SE));
        }
    }

    /// Set the active selection from a true-scale `[x, y, w, h]` array.
    ///
    /// Fails on a malformed array; a no-op without an active selection.
    pub fn set_select(&mut self, values: &[f64]) -> CropResult<()> {
        let rect = Rect::wrap_from_xywh(values)?;
        self.update(rect);
        Ok(())
    }

    /// Commit a true-scale rect to the active selection.
    pub fn update(&mut self, rect: Rect) {
        match self.ui.selection {
            Some(id) => {
                self.with_selection(id, |s, core| s.update(core, rect));
            }
            None => debug!("update ignored, no active selection"),
        }
    }

    /// Commit a true-scale rect to a given selection.
    pub fn update_selection(&mut self, id: SelectionId, rect: Rect) -> Option<Rect> {
        self.with_selection(id, |s, core| s.update(core, rect))
    }

    // ========================================================================
    // Animation
    // ========================================================================

    /// Animate the active selection to a true-scale `[x, y, w, h]`.
    pub fn animate_to(&mut self, values: &[f64]) -> CropResult<()> {
        let rect = Rect::wrap_from_xywh(values)?;
        if let Some(id) = self.ui.selection {
            let target = self.scale(&rect);
            self.animate_display(id, target, None);
        }
        Ok(())
    }

    /// Animate one selection to a true-scale `[x, y, w, h]`, calling
    /// `callback` once the target is committed. Returns false for an unknown
    /// selection.
    pub fn animate_selection_to(
        &mut self,
        id: SelectionId,
        values: &[f64],
        callback: Option<AnimationCallback>,
    ) -> CropResult<bool> {
        let rect = Rect::wrap_from_xywh(values)?;
        let target = self.scale(&rect);
        Ok(self.animate_display(id, target, callback))
    }

    /// Start animating towards a display-scale rect. With animation disabled
    /// the target is committed at once. A running animation is replaced.
    fn animate_display(
        &mut self,
        id: SelectionId,
        target: Rect,
        callback: Option<AnimationCallback>,
    ) -> bool {
        let Some(from) = self.selection(id).map(Selection::get) else {
            return false;
        };
        if self.animation.take().is_some() {
            debug!("replacing running animation");
        }

        if !self.options.animation {
            self.with_selection(id, |s, core| s.update_raw(core, target, Direction::SE));
            if let Some(callback) = callback {
                callback(id);
            }
            return true;
        }

        let start = self.surface.now();
        self.animation = Some(Animation::new(
            id,
            from,
            target,
            start,
            self.options.anim_duration,
            callback,
        ));
        self.surface.request_frame();
        true
    }

    /// Advance the running animation to `now` (milliseconds, same clock as
    /// [`Surface::now`]). Returns true while more frames are needed.
    pub fn on_frame(&mut self, now: f64) -> bool {
        profile_scope!("animation_frame");
        let Some(animation) = self.animation.as_ref() else {
            return false;
        };
        let id = animation.target();
        let (rect, done) = animation.step(now);

        let committed = self.with_selection(id, |s, core| s.update_raw(core, rect, Direction::SE));
        if committed.is_none() {
            self.animation = None;
            return false;
        }

        if done {
            let callback = self.animation.take().and_then(|mut a| a.take_callback());
            if let Some(callback) = callback {
                callback(id);
            }
            debug!(selection = %id, "animation finished");
            return false;
        }
        self.surface.request_frame();
        true
    }

    /// Stop the running animation where it is.
    pub fn cancel_animation(&mut self) -> bool {
        self.animation.take().is_some()
    }

    /// Move a selection to the middle of the container, keeping its size.
    pub fn center(&mut self, id: SelectionId, instant: bool) -> bool {
        let Some(b) = self.selection(id).map(Selection::get) else {
            return false;
        };
        let size = self.container_size();
        let target = Rect::from_xywh(
            (size.width - b.w) / 2.0,
            (size.height - b.h) / 2.0,
            b.w,
            b.h,
        );
        if instant {
            self.with_selection(id, |s, core| s.update_raw(core, target, Direction::SE));
            true
        } else {
            self.animate_display(id, target, None)
        }
    }
}
