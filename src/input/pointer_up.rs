//! Pointer up handling - ends the live gesture.

use super::PointerInput;
use crate::cropper::Cropper;
use crate::events::CropEvent;
use crate::selection::Selection;
use crate::surface::Surface;
use tracing::debug;

impl<S: Surface> Cropper<S> {
    /// Handle a document-level pointer up. Returns false when no gesture was
    /// live.
    ///
    /// Detaches the document listeners, emits `cropend` with the committed
    /// rect in true scale and focuses the selection. A touch end without
    /// touches is fine; the last committed rect is reported.
    pub fn pointer_up(&mut self, _input: &PointerInput) -> bool {
        let Some(index) = self.ui.multi.iter().position(Selection::is_dragging) else {
            return false;
        };
        let scale = self.scale_factors();

        let (mut core, multi) = self.split();
        let selection = &mut multi[index];
        let Some(drag) = selection.input.reset() else {
            return false;
        };
        core.surface.unbind_document_drag();

        if let Some(element) = selection.element() {
            let event = CropEvent::End {
                selection: selection.id(),
                rect: scale.unscale(&selection.get()),
            };
            core.emit(element, event);
        }
        selection.focus(&mut core);
        debug!(selection = %selection.id(), direction = %drag.direction, moved = drag.started, "gesture ended");
        true
    }
}
