//! Pointer down handling - resolves the target to a drag or a draw gesture.

use super::{CoordinateConverter, Direction, DragMode, PointerInput};
use crate::constants::{ORD_ATTRIBUTE, TOUCH_SELECTION_SIZE};
use crate::cropper::Cropper;
use crate::geometry::{Point, Rect};
use crate::profile_scope;
use crate::selection::SelectionId;
use crate::surface::{NodeId, Surface};
use tracing::debug;

impl<S: Surface> Cropper<S> {
    /// Handle a pointer down on `target`. Returns true when a gesture started.
    ///
    /// Only the primary button counts. A control carrying the drag class
    /// starts a drag in its `data-ord` direction (`move` when absent); any
    /// other element of the stage starts drawing when `allowSelect` is on.
    pub fn pointer_down(&mut self, target: NodeId, input: &PointerInput) -> bool {
        profile_scope!("pointer_down");

        if self.destroyed || !input.is_primary() {
            return false;
        }
        let Some(page) = input.page_position() else {
            return false;
        };
        let pos = CoordinateConverter::to_container(&self.surface, self.container, page);

        if self.surface.has_class(target, &self.options.css.drag) {
            if let Some(id) = self.owning_selection(target) {
                let token = self.surface.attribute(target, ORD_ATTRIBUTE);
                let direction = Direction::from_token(token.as_deref());
                return self.start_drag(id, pos, direction);
            }
        }

        if self.options.allow_select && self.is_stage_target(target) {
            return self.start_draw(pos);
        }
        false
    }

    /// Handle a touch start on `target`.
    ///
    /// A single tap on an empty stage with no selections creates a
    /// selection centered on the tap; everything else is treated as a pointer
    /// down.
    pub fn touch_start(&mut self, target: NodeId, input: &PointerInput) -> bool {
        if self.destroyed {
            return false;
        }
        let on_control = self.surface.has_class(target, &self.options.css.drag);
        if self.ui.is_empty() && !on_control {
            if input.touch_count() != 1 {
                return false;
            }
            let Some(page) = input.page_position() else {
                return false;
            };
            let pos = CoordinateConverter::to_container(&self.surface, self.container, page);
            let rect =
                CoordinateConverter::centered_box(pos, TOUCH_SELECTION_SIZE, &self.container_rect());
            let id = self.new_selection();
            self.with_selection(id, |s, core| s.update_raw(core, rect, Direction::SE));
            debug!(selection = %id, x = pos.x, y = pos.y, "selection created from tap");
            return true;
        }
        self.pointer_down(target, input)
    }

    /// Start adjusting a selection from a container-local position.
    ///
    /// Refused when the selection cannot be selected, or the direction needs
    /// a capability the selection lacks.
    pub fn start_drag(&mut self, id: SelectionId, pos: Point, direction: Direction) -> bool {
        let Some(selection) = self.selection(id) else {
            return false;
        };
        let settings = selection.settings();
        let refused = !settings.can_select
            || (direction == Direction::Move && !settings.can_drag)
            || (direction.is_resize() && !settings.can_resize);
        if refused {
            debug!(selection = %id, %direction, "drag refused by capabilities");
            return false;
        }
        self.begin_gesture(id, pos, direction, DragMode::Adjust);
        true
    }

    /// Start drawing a rect from `pos`.
    fn start_draw(&mut self, pos: Point) -> bool {
        let below_max = self
            .options
            .multi_max
            .is_none_or(|max| self.ui.len() < max);
        let id = match self.ui.selection {
            Some(id) if !(self.options.multi && below_max) => id,
            _ => self.new_selection(),
        };
        if !self.selection(id).is_some_and(|s| s.settings().can_select) {
            return false;
        }

        self.begin_gesture(id, pos, Direction::SE, DragMode::Draw);
        let rect = Rect::spanning(pos, pos);
        self.with_selection(id, |s, core| s.update_raw(core, rect, Direction::SE));
        true
    }

    fn begin_gesture(&mut self, id: SelectionId, pos: Point, direction: Direction, mode: DragMode) {
        if self.animation.as_ref().is_some_and(|a| a.target() == id) {
            self.animation = None;
        }
        // a previous gesture that never saw its release
        for other in self.ui.multi.iter_mut().filter(|s| s.is_dragging()) {
            other.input.reset();
            self.surface.unbind_document_drag();
        }

        if self.ui.selection != Some(id) {
            self.set_selection(id);
        }
        self.with_selection(id, |s, _| {
            let origin = s.get();
            s.input.start(pos, origin, direction, mode);
        });
        self.surface.bind_document_drag();
        debug!(selection = %id, %direction, ?mode, "gesture started");
    }

    /// Selection whose root element contains `node`.
    fn owning_selection(&self, node: NodeId) -> Option<SelectionId> {
        self.ui
            .multi
            .iter()
            .find(|s| s.element().is_some_and(|e| self.surface.contains(e, node)))
            .map(|s| s.id())
    }

    /// The container or anything inside it that is not part of a selection.
    fn is_stage_target(&self, node: NodeId) -> bool {
        self.surface.contains(self.container, node) && self.owning_selection(node).is_none()
    }
}
