//! Borrowed view of controller state handed to selections.
//!
//! A selection never stores a reference to its controller. Every selection
//! operation that needs the surface, options, shades or listeners receives a
//! `Core` built from disjoint controller fields for the duration of the call.

use crate::events::{CropEvent, Emitter};
use crate::filters::FilterContext;
use crate::geometry::{Scale, Size};
use crate::options::Options;
use crate::selection::Selection;
use crate::stage::Stage;
use crate::surface::{NodeId, Surface};
use tracing::trace;

pub(crate) struct Core<'a> {
    pub surface: &'a mut dyn Surface,
    pub options: &'a Options,
    pub container: NodeId,
    pub stage: &'a mut Stage,
    pub emitter: &'a mut Emitter,
}

impl Core<'_> {
    pub fn scale(&self) -> Scale {
        self.options.scale()
    }

    pub fn container_size(&self) -> Size {
        self.surface.size(self.container)
    }

    /// Dispatch `event` on `node` and run the registered handlers.
    pub fn emit(&mut self, node: NodeId, event: CropEvent) {
        trace!(event = event.name(), ?node, "emit");
        self.surface.dispatch(node, &event);
        self.emitter.emit(&event);
    }

    pub fn filter_context<'b>(&'b mut self, selection: &'b Selection) -> FilterContext<'b> {
        FilterContext {
            selection,
            container: self.surface.size(self.container),
            stage: &mut *self.stage,
            surface: &mut *self.surface,
        }
    }
}
