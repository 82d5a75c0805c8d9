//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestCropperBuilder` - Builder for a controller on a headless surface
//! - `EventLog` - Records every notification a controller emits
//! - Gesture helpers like `drag()`, `handle()` and `frame()`

use cropwidget::{
    CropEvent, Cropper, Direction, EventKind, MemorySurface, NodeId, Options, Point,
    PointerInput, Rect, SelectionId, Size, Surface,
};
use std::cell::RefCell;
use std::rc::Rc;

pub type TestCropper = Cropper<MemorySurface>;

// ============================================================================
// TestCropperBuilder - Builder pattern for creating test controllers
// ============================================================================

/// Builder for a controller attached to a `#target` div on a
/// [`MemorySurface`].
///
/// # Example
/// ```ignore
/// let mut cropper = TestCropperBuilder::new()
///     .with_size(400.0, 300.0)
///     .with_options(|o| o.multi = true)
///     .build();
/// ```
pub struct TestCropperBuilder {
    size: Size,
    origin: Point,
    options: Options,
}

impl Default for TestCropperBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCropperBuilder {
    /// A 500x500 container at the page origin with default options.
    pub fn new() -> Self {
        Self {
            size: Size::new(500.0, 500.0),
            origin: Point::default(),
            options: Options::default(),
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Size::new(width, height);
        self
    }

    /// Place the container at a page position.
    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.origin = Point::new(x, y);
        self
    }

    pub fn with_options(mut self, f: impl FnOnce(&mut Options)) -> Self {
        f(&mut self.options);
        self
    }

    pub fn build(self) -> TestCropper {
        let mut surface = MemorySurface::new();
        let root = surface.create_sized("div", &[("id", "target")], self.size);
        surface.set_page_origin(root, self.origin);
        Cropper::attach(surface, "#target", self.options).expect("controller builds")
    }

    /// Build and create one selection at a true-scale `[x, y, w, h]`.
    pub fn build_with_selection(self, values: [f64; 4]) -> (TestCropper, SelectionId) {
        let mut cropper = self.build();
        let id = cropper.new_selection();
        cropper.set_select(&values).expect("four values");
        (cropper, id)
    }
}

// ============================================================================
// EventLog - Notification recorder
// ============================================================================

/// Every notification emitted after [`EventLog::attach`], in order.
#[derive(Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<CropEvent>>>);

impl EventLog {
    pub fn attach(cropper: &mut TestCropper) -> Self {
        let log = Self::default();
        let sink = Rc::clone(&log.0);
        cropper.on_any(move |event| {
            sink.borrow_mut().push(event.clone());
            Ok(())
        });
        log
    }

    pub fn events(&self) -> Vec<CropEvent> {
        self.0.borrow().clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.0.borrow().iter().map(CropEvent::name).collect()
    }

    pub fn of(&self, kind: EventKind) -> Vec<CropEvent> {
        self.0
            .borrow()
            .iter()
            .filter(|e| e.kind() == kind)
            .cloned()
            .collect()
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.of(kind).len()
    }
}

// ============================================================================
// Gesture Helpers
// ============================================================================

/// Control of `id` carrying `class` and the given direction token.
pub fn control(cropper: &TestCropper, id: SelectionId, class: &str, direction: Direction) -> NodeId {
    let surface = cropper.surface();
    cropper
        .selection(id)
        .expect("selection exists")
        .controls()
        .iter()
        .copied()
        .find(|c| {
            surface.has_class(*c, class)
                && surface.attribute(*c, "data-ord").as_deref() == Some(direction.as_str())
        })
        .expect("control exists")
}

/// Resize handle of `id` in `direction`.
pub fn handle(cropper: &TestCropper, id: SelectionId, direction: Direction) -> NodeId {
    control(cropper, id, "jcrop-handle", direction)
}

/// Body button of `id`, which drags the whole selection.
pub fn frame(cropper: &TestCropper, id: SelectionId) -> NodeId {
    cropper
        .selection(id)
        .and_then(|s| s.frame())
        .expect("selection has a frame")
}

/// Mouse down on `target` at `from`, one move to `to`, release at `to`.
/// Returns whether the gesture started.
pub fn drag(cropper: &mut TestCropper, target: NodeId, from: (f64, f64), to: (f64, f64)) -> bool {
    let started = cropper.pointer_down(target, &PointerInput::mouse(from.0, from.1));
    cropper.pointer_move(&PointerInput::mouse(to.0, to.1));
    cropper.pointer_up(&PointerInput::mouse(to.0, to.1));
    started
}

/// Committed display rect of `id`.
pub fn committed(cropper: &TestCropper, id: SelectionId) -> Rect {
    cropper.selection(id).expect("selection exists").get()
}

/// Asserts that the committed rect of `id` is consistent and equals `expected`.
pub fn assert_committed(cropper: &TestCropper, id: SelectionId, expected: Rect) {
    let rect = committed(cropper, id);
    assert!(rect.is_consistent(1e-9), "inconsistent rect {rect:?}");
    assert_eq!(rect, expected);
}
