//! Presentation-layer adapter.
//!
//! The engine never reads geometry back from the presentation layer: the
//! committed rect lives on the [`Selection`](crate::Selection) and the surface is
//! a downstream renderer. The surface does supply the things only it can know,
//! which are the container size, the container's page origin, the current focus
//! owner, and a clock.
//!
//! ## Implementations
//!
//! - [`MemorySurface`] - headless element tree, used by tests and non-browser hosts
//! - `WebSurface` - `web-sys` backed, behind the `web` feature

mod memory;
#[cfg(feature = "web")]
mod web;

pub use memory::{MemoryNode, MemorySurface};
#[cfg(feature = "web")]
pub use web::WebSurface;

use crate::events::CropEvent;
use crate::geometry::{Point, Size};
use serde::Serialize;

/// Opaque handle to an element owned by a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

/// Element creation, styling and event plumbing the engine depends on.
///
/// Class arguments may hold several space-separated class names; each is
/// added or removed individually.
pub trait Surface {
    /// Find an element by selector.
    fn query(&self, selector: &str) -> Option<NodeId>;

    /// Create a detached element with the given attributes. A `class`
    /// attribute sets the class list.
    fn create_element(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId;

    /// Append `child` as the last child of `parent`.
    fn append(&mut self, parent: NodeId, child: NodeId);

    /// Insert `node` as the previous sibling of `reference`.
    fn insert_before(&mut self, reference: NodeId, node: NodeId);

    /// Detach `node` (and its subtree) from the tree.
    fn remove(&mut self, node: NodeId);

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn add_class(&mut self, node: NodeId, class: &str);
    fn remove_class(&mut self, node: NodeId, class: &str);
    fn has_class(&self, node: NodeId, class: &str) -> bool;

    fn toggle_class(&mut self, node: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Set (`Some`) or remove (`None`) an attribute.
    fn set_attribute(&mut self, node: NodeId, name: &str, value: Option<&str>);

    /// Set CSS properties (kebab-case names).
    fn set_style(&mut self, node: NodeId, props: &[(&str, String)]);

    /// Rendered width and height of an element.
    fn size(&self, node: NodeId) -> Size;

    /// Page coordinates of the element's top-left corner, scroll included.
    fn page_origin(&self, node: NodeId) -> Point;

    fn focus(&mut self, node: NodeId);
    fn blur(&mut self, node: NodeId);

    /// Element currently holding keyboard focus.
    fn active_element(&self) -> Option<NodeId>;

    /// Start routing document-level pointer move/up events to the engine.
    fn bind_document_drag(&mut self);

    /// Stop routing document-level pointer events.
    fn unbind_document_drag(&mut self);

    /// Publish a notification on an element (e.g. as a DOM custom event).
    fn dispatch(&mut self, node: NodeId, event: &CropEvent);

    /// Monotonic time in milliseconds.
    fn now(&self) -> f64;

    /// Ask the host to call [`Cropper::on_frame`](crate::Cropper::on_frame) on the
    /// next display frame.
    fn request_frame(&mut self);

    /// Whether `node` is `ancestor` or lies inside it.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }
}
