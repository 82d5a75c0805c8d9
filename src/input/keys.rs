//! Keyboard handling - arrow nudges, delete and escape.

use super::Key;
use crate::constants::{NUDGE_STEP, NUDGE_STEP_LARGE};
use crate::cropper::Cropper;
use crate::surface::Surface;
use tracing::trace;

impl<S: Surface> Cropper<S> {
    /// Handle a key press. Returns true when the key was consumed, in which
    /// case the host should prevent its default action.
    ///
    /// Keys are only handled while the watcher is enabled, a selection is
    /// active, and keyboard focus is inside the container.
    pub fn key_down(&mut self, key: Key, shift: bool) -> bool {
        if !self.keyboard || self.ui.selection.is_none() || !self.has_keyboard_focus() {
            return false;
        }
        trace!(?key, shift, "key down");

        if let Some((x, y)) = key.arrow_vector() {
            let step = if shift { NUDGE_STEP_LARGE } else { NUDGE_STEP };
            self.nudge(x * step, y * step);
            return true;
        }
        match key {
            Key::Delete | Key::Backspace => {
                let deletable = self.active().is_some_and(|s| s.settings().can_delete);
                if deletable {
                    self.request_delete();
                }
                deletable
            }
            Key::Escape => {
                self.blur();
                true
            }
            _ => false,
        }
    }

    /// Enable or disable the keyboard watcher.
    pub fn set_keyboard_enabled(&mut self, enabled: bool) {
        if !self.destroyed {
            self.keyboard = enabled;
        }
    }

    /// Whether focus is on the container or inside one of its selections.
    fn has_keyboard_focus(&self) -> bool {
        let Some(active) = self.surface.active_element() else {
            return false;
        };
        active == self.container
            || self
                .ui
                .multi()
                .iter()
                .any(|s| s.element().is_some_and(|e| self.surface.contains(e, active)))
    }
}
