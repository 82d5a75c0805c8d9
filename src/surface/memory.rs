//! Headless in-memory surface.
//!
//! Keeps a small element tree with classes, attributes and inline styles so the
//! engine can run without a browser. Sizes come from inline `width`/`height`
//! styles when present, otherwise from the size given at creation.

use super::{NodeId, Surface};
use crate::events::CropEvent;
use crate::geometry::{Point, Size};
use std::collections::BTreeMap;

/// One element of a [`MemorySurface`].
#[derive(Debug, Clone, Default)]
pub struct MemoryNode {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub style: BTreeMap<String, String>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Intrinsic size, used when no inline size is set
    pub size: Size,
    /// Page position of the top-left corner, without scroll
    pub origin: Point,
}

impl MemoryNode {
    fn style_px(&self, prop: &str) -> Option<f64> {
        self.style
            .get(prop)
            .and_then(|v| v.strip_suffix("px"))
            .and_then(|v| v.parse().ok())
    }
}

/// Element tree held in memory.
#[derive(Debug, Default)]
pub struct MemorySurface {
    nodes: BTreeMap<NodeId, MemoryNode>,
    next_id: u64,
    focused: Option<NodeId>,
    scroll: Point,
    document_listeners: usize,
    dispatched: Vec<(NodeId, CropEvent)>,
    frames_requested: usize,
    clock: f64,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element with an intrinsic size.
    pub fn create_sized(&mut self, tag: &str, attrs: &[(&str, &str)], size: Size) -> NodeId {
        let id = self.create_element(tag, attrs);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.size = size;
        }
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&MemoryNode> {
        self.nodes.get(&id)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Inline style value.
    pub fn style(&self, id: NodeId, prop: &str) -> Option<&str> {
        self.nodes.get(&id)?.style.get(prop).map(String::as_str)
    }

    /// Set the intrinsic size of an element.
    pub fn set_size(&mut self, id: NodeId, size: Size) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.size = size;
        }
    }

    /// Set the page position of an element.
    pub fn set_page_origin(&mut self, id: NodeId, origin: Point) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.origin = origin;
        }
    }

    /// Document scroll offset added to every page origin.
    pub fn set_scroll(&mut self, scroll: Point) {
        self.scroll = scroll;
    }

    /// Number of document-level drag bindings currently active.
    pub fn document_listeners(&self) -> usize {
        self.document_listeners
    }

    /// Notifications published through [`Surface::dispatch`].
    pub fn dispatched(&self) -> &[(NodeId, CropEvent)] {
        &self.dispatched
    }

    pub fn frames_requested(&self) -> usize {
        self.frames_requested
    }

    pub fn set_now(&mut self, ms: f64) {
        self.clock = ms;
    }

    pub fn advance(&mut self, ms: f64) {
        self.clock += ms;
    }

    /// Elements carrying `class`, in creation order.
    pub fn find_by_class(&self, class: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.classes.iter().any(|c| c == class))
            .map(|(id, _)| *id)
            .collect()
    }

    fn detach(&mut self, node: NodeId) {
        let parent = self.nodes.get_mut(&node).and_then(|n| n.parent.take());
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != node);
        }
    }
}

impl Surface for MemorySurface {
    fn query(&self, selector: &str) -> Option<NodeId> {
        let matches = |n: &MemoryNode| {
            if let Some(id) = selector.strip_prefix('#') {
                n.attributes.get("id").is_some_and(|v| v == id)
            } else if let Some(class) = selector.strip_prefix('.') {
                n.classes.iter().any(|c| c == class)
            } else {
                n.tag == selector
            }
        };
        self.nodes
            .iter()
            .find(|(_, n)| matches(n))
            .map(|(id, _)| *id)
    }

    fn create_element(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        self.next_id += 1;
        let id = NodeId(self.next_id);
        let mut node = MemoryNode {
            tag: tag.to_string(),
            ..Default::default()
        };
        for (name, value) in attrs {
            if *name == "class" {
                node.classes = value.split_whitespace().map(str::to_string).collect();
            } else {
                node.attributes.insert(name.to_string(), value.to_string());
            }
        }
        self.nodes.insert(id, node);
        id
    }

    fn append(&mut self, parent: NodeId, child: NodeId) {
        if !self.nodes.contains_key(&parent) || !self.nodes.contains_key(&child) {
            return;
        }
        self.detach(child);
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(&child) {
            c.parent = Some(parent);
        }
    }

    fn insert_before(&mut self, reference: NodeId, node: NodeId) {
        let Some(parent) = self.parent(reference) else {
            return;
        };
        self.detach(node);
        if let Some(p) = self.nodes.get_mut(&parent) {
            let index = p
                .children
                .iter()
                .position(|c| *c == reference)
                .unwrap_or(p.children.len());
            p.children.insert(index, node);
        }
        if let Some(n) = self.nodes.get_mut(&node) {
            n.parent = Some(parent);
        }
    }

    fn remove(&mut self, node: NodeId) {
        self.detach(node);
        if self.focused.is_some_and(|f| self.contains(node, f)) {
            self.focused = None;
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node)?.parent
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.nodes.get_mut(&node) {
            for c in class.split_whitespace() {
                if !n.classes.iter().any(|existing| existing == c) {
                    n.classes.push(c.to_string());
                }
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.nodes.get_mut(&node) {
            let names: Vec<&str> = class.split_whitespace().collect();
            n.classes.retain(|c| !names.contains(&c.as_str()));
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes.get(&node).is_some_and(|n| {
            class
                .split_whitespace()
                .all(|c| n.classes.iter().any(|existing| existing == c))
        })
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.nodes.get(&node)?.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: Option<&str>) {
        if let Some(n) = self.nodes.get_mut(&node) {
            match value {
                Some(v) => {
                    n.attributes.insert(name.to_string(), v.to_string());
                }
                None => {
                    n.attributes.remove(name);
                }
            }
        }
    }

    fn set_style(&mut self, node: NodeId, props: &[(&str, String)]) {
        if let Some(n) = self.nodes.get_mut(&node) {
            for (prop, value) in props {
                n.style.insert(prop.to_string(), value.clone());
            }
        }
    }

    fn size(&self, node: NodeId) -> Size {
        self.nodes
            .get(&node)
            .map(|n| {
                Size::new(
                    n.style_px("width").unwrap_or(n.size.width),
                    n.style_px("height").unwrap_or(n.size.height),
                )
            })
            .unwrap_or_default()
    }

    fn page_origin(&self, node: NodeId) -> Point {
        let origin = self.nodes.get(&node).map(|n| n.origin).unwrap_or_default();
        Point::new(origin.x + self.scroll.x, origin.y + self.scroll.y)
    }

    fn focus(&mut self, node: NodeId) {
        if self.nodes.contains_key(&node) {
            self.focused = Some(node);
        }
    }

    fn blur(&mut self, node: NodeId) {
        if self.focused == Some(node) {
            self.focused = None;
        }
    }

    fn active_element(&self) -> Option<NodeId> {
        self.focused
    }

    fn bind_document_drag(&mut self) {
        self.document_listeners += 1;
    }

    fn unbind_document_drag(&mut self) {
        self.document_listeners = self.document_listeners.saturating_sub(1);
    }

    fn dispatch(&mut self, node: NodeId, event: &CropEvent) {
        self.dispatched.push((node, event.clone()));
    }

    fn now(&self) -> f64 {
        self.clock
    }

    fn request_frame(&mut self) {
        self.frames_requested += 1;
    }
}
