//! Browser surface backed by `web-sys`.
//!
//! Elements are tracked in a handle table. An element created elsewhere (the
//! target of a DOM event, say) is registered on first sight through
//! [`WebSurface::node_for`], so hosts can translate `event.target` into a
//! [`NodeId`] before calling the cropper.
//!
//! Document-level listener binding and frame scheduling are left to the host:
//! it supplies hooks that add/remove its `pointermove`/`pointerup` listeners
//! and call `requestAnimationFrame`.

use super::{NodeId, Surface};
use crate::events::CropEvent;
use crate::geometry::{Point, Size};
use std::collections::HashMap;
use tracing::{error, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, CustomEventInit, Document, Element, HtmlElement, Window};

const NODE_ATTRIBUTE: &str = "data-cropwidget-node";

pub type DragHook = Box<dyn FnMut(bool)>;
pub type FrameHook = Box<dyn FnMut()>;

pub struct WebSurface {
    window: Window,
    document: Document,
    elements: HashMap<NodeId, Element>,
    next_id: u64,
    on_drag_binding: Option<DragHook>,
    on_frame_request: Option<FrameHook>,
}

impl std::fmt::Debug for WebSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSurface")
            .field("elements", &self.elements.len())
            .finish_non_exhaustive()
    }
}

impl WebSurface {
    /// Surface over the global window's document. `None` outside a browser.
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self {
            window,
            document,
            elements: HashMap::new(),
            next_id: 0,
            on_drag_binding: None,
            on_frame_request: None,
        })
    }

    /// Called with `true` to start and `false` to stop routing document
    /// pointer events to the cropper.
    pub fn with_drag_hook(mut self, hook: DragHook) -> Self {
        self.on_drag_binding = Some(hook);
        self
    }

    /// Called when the cropper wants an animation frame.
    pub fn with_frame_hook(mut self, hook: FrameHook) -> Self {
        self.on_frame_request = Some(hook);
        self
    }

    /// Handle for an element, registering it if unseen.
    pub fn node_for(&mut self, element: &Element) -> NodeId {
        if let Some(id) = element
            .get_attribute(NODE_ATTRIBUTE)
            .and_then(|v| v.parse().ok())
            .map(NodeId)
        {
            if self.elements.contains_key(&id) {
                return id;
            }
        }
        self.next_id += 1;
        let id = NodeId(self.next_id);
        if let Err(e) = element.set_attribute(NODE_ATTRIBUTE, &id.0.to_string()) {
            warn!(?e, "could not tag element");
        }
        self.elements.insert(id, element.clone());
        id
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(&node)
    }

    fn html(&self, node: NodeId) -> Option<&HtmlElement> {
        self.elements.get(&node)?.dyn_ref::<HtmlElement>()
    }
}

fn log_js(op: &str, result: Result<impl Sized, JsValue>) {
    if let Err(e) = result {
        error!(operation = op, ?e, "DOM call failed");
    }
}

impl Surface for WebSurface {
    fn query(&self, selector: &str) -> Option<NodeId> {
        let element = self.document.query_selector(selector).ok()??;
        // unregistered elements resolve only after `node_for`
        element
            .get_attribute(NODE_ATTRIBUTE)
            .and_then(|v| v.parse().ok())
            .map(NodeId)
            .filter(|id| self.elements.contains_key(id))
            .or_else(|| {
                self.elements
                    .iter()
                    .find(|(_, e)| **e == element)
                    .map(|(id, _)| *id)
            })
    }

    fn create_element(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let element = match self.document.create_element(tag) {
            Ok(element) => element,
            Err(e) => {
                error!(tag, ?e, "create_element failed");
                return NodeId(0);
            }
        };
        for (name, value) in attrs {
            log_js("set_attribute", element.set_attribute(name, value));
        }
        self.node_for(&element)
    }

    fn append(&mut self, parent: NodeId, child: NodeId) {
        if let (Some(p), Some(c)) = (self.elements.get(&parent), self.elements.get(&child)) {
            log_js("append_child", p.append_child(c));
        }
    }

    fn insert_before(&mut self, reference: NodeId, node: NodeId) {
        let (Some(r), Some(n)) = (self.elements.get(&reference), self.elements.get(&node)) else {
            return;
        };
        if let Some(parent) = r.parent_node() {
            log_js("insert_before", parent.insert_before(n, Some(r)));
        }
    }

    fn remove(&mut self, node: NodeId) {
        if let Some(element) = self.elements.get(&node) {
            element.remove();
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.elements.get(&node)?.parent_element()?;
        self.elements
            .iter()
            .find(|(_, e)| **e == parent)
            .map(|(id, _)| *id)
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.elements.get(&node) {
            for c in class.split_whitespace() {
                log_js("class_list.add", element.class_list().add_1(c));
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.elements.get(&node) {
            for c in class.split_whitespace() {
                log_js("class_list.remove", element.class_list().remove_1(c));
            }
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.elements.get(&node).is_some_and(|element| {
            let list = element.class_list();
            class.split_whitespace().all(|c| list.contains(c))
        })
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.elements.get(&node)?.get_attribute(name)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: Option<&str>) {
        if let Some(element) = self.elements.get(&node) {
            match value {
                Some(v) => log_js("set_attribute", element.set_attribute(name, v)),
                None => log_js("remove_attribute", element.remove_attribute(name)),
            }
        }
    }

    fn set_style(&mut self, node: NodeId, props: &[(&str, String)]) {
        if let Some(element) = self.html(node) {
            let style = element.style();
            for (prop, value) in props {
                log_js("style.set_property", style.set_property(prop, value));
            }
        }
    }

    fn size(&self, node: NodeId) -> Size {
        self.html(node)
            .map(|e| Size::new(e.offset_width() as f64, e.offset_height() as f64))
            .unwrap_or_default()
    }

    fn page_origin(&self, node: NodeId) -> Point {
        let Some(element) = self.elements.get(&node) else {
            return Point::default();
        };
        let rect = element.get_bounding_client_rect();
        let sx = self.window.scroll_x().unwrap_or(0.0);
        let sy = self.window.scroll_y().unwrap_or(0.0);
        Point::new(rect.left() + sx, rect.top() + sy)
    }

    fn focus(&mut self, node: NodeId) {
        if let Some(element) = self.html(node) {
            log_js("focus", element.focus());
        }
    }

    fn blur(&mut self, node: NodeId) {
        if let Some(element) = self.html(node) {
            log_js("blur", element.blur());
        }
    }

    fn active_element(&self) -> Option<NodeId> {
        let active = self.document.active_element()?;
        self.elements
            .iter()
            .find(|(_, e)| **e == active)
            .map(|(id, _)| *id)
    }

    fn bind_document_drag(&mut self) {
        if let Some(hook) = self.on_drag_binding.as_mut() {
            hook(true);
        }
    }

    fn unbind_document_drag(&mut self) {
        if let Some(hook) = self.on_drag_binding.as_mut() {
            hook(false);
        }
    }

    fn dispatch(&mut self, node: NodeId, event: &CropEvent) {
        let Some(element) = self.elements.get(&node) else {
            return;
        };
        let detail = match serde_json::to_string(event) {
            Ok(json) => JsValue::from_str(&json),
            Err(e) => {
                error!(event = event.name(), %e, "could not serialize event detail");
                return;
            }
        };
        let init = CustomEventInit::new();
        init.set_bubbles(true);
        init.set_detail(&detail);
        match CustomEvent::new_with_event_init_dict(event.name(), &init) {
            Ok(custom) => log_js("dispatch_event", element.dispatch_event(&custom)),
            Err(e) => error!(event = event.name(), ?e, "could not create custom event"),
        }
    }

    fn now(&self) -> f64 {
        self.window.performance().map(|p| p.now()).unwrap_or(0.0)
    }

    fn request_frame(&mut self) {
        if let Some(hook) = self.on_frame_request.as_mut() {
            hook();
        }
    }
}
