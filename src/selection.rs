//! A single crop rectangle: its elements, filters, capabilities and focus.
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized -> Active      (init: elements created, filters copied, options applied)
//! Active        -> Removed     (remove: elements detached, cropremove emitted)
//! ```
//!
//! The committed rect is held in `last` and is the only source of truth for
//! the selection's geometry; the surface only renders it.

use crate::constants::{ORD_ATTRIBUTE, SELECTION_ATTRIBUTE};
use crate::context::Core;
use crate::events::CropEvent;
use crate::filters::{self, SharedFilter};
use crate::geometry::Rect;
use crate::input::{Direction, DragMode, InputState};
use crate::options::{Edge, Options};
use crate::stage::px;
use crate::surface::NodeId;
use serde::Serialize;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Stable handle to a selection owned by a [`Cropper`](crate::Cropper).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SelectionId(pub u64);

impl fmt::Display for SelectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Active,
    Removed,
}

/// Per-selection options copied from the controller's [`Options`].
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSettings {
    pub can_delete: bool,
    pub can_drag: bool,
    pub can_resize: bool,
    pub can_select: bool,
    /// Width / height; 0 disables the ratio lock
    pub aspect_ratio: f64,
    pub min_size: [f64; 2],
    /// 0 on an axis means unbounded
    pub max_size: [f64; 2],
    pub edge: Edge,
}

impl SelectionSettings {
    pub fn from_options(options: &Options) -> Self {
        Self {
            can_delete: options.can_delete,
            can_drag: options.can_drag,
            can_resize: options.can_resize,
            can_select: options.can_select,
            aspect_ratio: options.aspect_ratio,
            min_size: options.min_size,
            max_size: options.max_size,
            edge: options.edge,
        }
    }
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self::from_options(&Options::default())
    }
}

pub struct Selection {
    id: SelectionId,
    lifecycle: Lifecycle,
    element: Option<NodeId>,
    frame: Option<NodeId>,
    controls: Vec<NodeId>,
    filters: Vec<SharedFilter>,
    settings: SelectionSettings,
    linked: bool,
    active: bool,
    focused: bool,
    last: Option<Rect>,
    pub(crate) input: InputState,
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("id", &self.id)
            .field("lifecycle", &self.lifecycle)
            .field("filters", &self.filter_tags())
            .field("active", &self.active)
            .field("last", &self.last)
            .field("input", &self.input)
            .finish()
    }
}

impl Selection {
    pub fn new(id: SelectionId) -> Self {
        Self {
            id,
            lifecycle: Lifecycle::Uninitialized,
            element: None,
            frame: None,
            controls: Vec::new(),
            filters: Vec::new(),
            settings: SelectionSettings::default(),
            linked: true,
            active: false,
            focused: false,
            last: None,
            input: InputState::Idle,
        }
    }

    pub fn id(&self) -> SelectionId {
        self.id
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Root element, once initialized.
    pub fn element(&self) -> Option<NodeId> {
        self.element
    }

    /// Focusable body button, once initialized.
    pub fn frame(&self) -> Option<NodeId> {
        self.frame
    }

    /// Drag bars, handles and borders, in creation order.
    pub fn controls(&self) -> &[NodeId] {
        &self.controls
    }

    pub fn settings(&self) -> &SelectionSettings {
        &self.settings
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn linked(&self) -> bool {
        self.linked
    }

    pub fn is_dragging(&self) -> bool {
        self.input.is_dragging()
    }

    /// Last committed rect in display scale.
    pub fn last(&self) -> Option<Rect> {
        self.last
    }

    /// Current rect in display scale; all zero before the first commit.
    pub fn get(&self) -> Rect {
        self.last.unwrap_or_default()
    }

    /// Rect the current change is measured against: the rect at drag start
    /// while adjusting, otherwise the last committed rect.
    pub fn reference_rect(&self) -> Option<Rect> {
        match self.input.drag() {
            Some(drag) if drag.mode == DragMode::Adjust => Some(drag.origin),
            _ => self.last,
        }
    }

    pub fn filters(&self) -> &[SharedFilter] {
        &self.filters
    }

    pub fn filter_tags(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.tag()).collect()
    }

    #[cfg(test)]
    pub(crate) fn set_settings_for_test(&mut self, settings: SelectionSettings) {
        self.settings = settings;
    }

    #[cfg(test)]
    pub(crate) fn set_last_for_test(&mut self, rect: Rect) {
        self.last = Some(rect);
    }

    #[cfg(test)]
    pub(crate) fn set_active_for_test(&mut self, active: bool) {
        self.active = active;
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    pub(crate) fn init(&mut self, core: &mut Core<'_>, filters: Vec<SharedFilter>) {
        if self.lifecycle != Lifecycle::Uninitialized {
            return;
        }
        self.filters = filters;
        filters::sort(&mut self.filters);

        let options = core.options;
        let css = &options.css;
        let element = core.surface.create_element(
            "div",
            &[("class", css.selection.as_str()), (SELECTION_ATTRIBUTE, "true")],
        );
        let frame = core.surface.create_element(
            "button",
            &[
                ("class", css.button.as_str()),
                ("type", "button"),
                (ORD_ATTRIBUTE, Direction::Move.as_str()),
            ],
        );
        core.surface.append(element, frame);
        core.surface.append(core.container, element);

        let groups = [
            (&css.drag_bars, &options.dragbars),
            (&css.handles, &options.handles),
            (&css.borders, &options.borders),
        ];
        for (class, directions) in groups {
            for dir in directions {
                let class = format!("{class} ord-{dir}");
                let control = core.surface.create_element(
                    "div",
                    &[("class", class.as_str()), (ORD_ATTRIBUTE, dir.as_str())],
                );
                core.surface.append(element, control);
                self.controls.push(control);
            }
        }

        self.element = Some(element);
        self.frame = Some(frame);
        self.lifecycle = Lifecycle::Active;
        self.linked = options.linked;
        debug!(selection = %self.id, "selection initialized");

        self.set_options(core, options);
        core.emit(element, CropEvent::Create { selection: self.id });
    }

    /// Detach from the surface. Further updates are ignored.
    pub(crate) fn remove(&mut self, core: &mut Core<'_>) {
        if self.lifecycle != Lifecycle::Active {
            return;
        }
        if self.input.is_dragging() {
            core.surface.unbind_document_drag();
            self.input.reset();
        }
        let Some(element) = self.element else { return };
        core.emit(element, CropEvent::Remove { selection: self.id });
        core.surface.remove(element);
        self.lifecycle = Lifecycle::Removed;
        self.active = false;
        self.focused = false;
        debug!(selection = %self.id, "selection removed");
    }

    // ========================================================================
    // Options & Capabilities
    // ========================================================================

    pub(crate) fn set_options(&mut self, core: &mut Core<'_>, options: &Options) {
        self.settings = SelectionSettings::from_options(options);
        self.linked = options.linked;
        self.refresh(core);
    }

    pub(crate) fn apply_settings(&mut self, core: &mut Core<'_>, settings: SelectionSettings) {
        self.settings = settings;
        self.refresh(core);
    }

    /// Re-apply capability affordances and filter refresh hooks, then
    /// re-commit the current rect. Nothing is committed before the first
    /// update.
    pub(crate) fn refresh(&mut self, core: &mut Core<'_>) {
        if self.lifecycle != Lifecycle::Active {
            return;
        }
        self.allow_resize(core, self.settings.can_resize);
        self.allow_drag(core, self.settings.can_drag);
        self.allow_select(core, self.settings.can_select);
        self.refresh_filters(core);
        if let Some(rect) = self.last {
            self.update_raw(core, rect, Direction::SE);
        }
    }

    pub(crate) fn allow_resize(&self, core: &mut Core<'_>, allowed: bool) {
        if let Some(element) = self.element {
            let on = !(allowed && self.settings.can_resize);
            core.surface
                .toggle_class(element, &core.options.css.no_resize, on);
        }
    }

    pub(crate) fn allow_drag(&self, core: &mut Core<'_>, allowed: bool) {
        if let Some(element) = self.element {
            let on = !(allowed && self.settings.can_drag);
            core.surface.toggle_class(element, &core.options.css.no_drag, on);
        }
    }

    pub(crate) fn allow_select(&self, core: &mut Core<'_>, allowed: bool) {
        if let Some(frame) = self.frame {
            let disabled = !(allowed && self.settings.can_select);
            core.surface
                .set_attribute(frame, "disabled", disabled.then_some("disabled"));
        }
    }

    // ========================================================================
    // Filters
    // ========================================================================

    pub fn has_filter(&self, filter: &SharedFilter) -> bool {
        self.filters.iter().any(|f| Rc::ptr_eq(f, filter))
    }

    /// Add a filter unless this instance is already present.
    pub(crate) fn add_filter(&mut self, core: &mut Core<'_>, filter: SharedFilter) -> bool {
        if self.has_filter(&filter) {
            return false;
        }
        filter.init();
        self.filters.push(filter);
        filters::sort(&mut self.filters);
        self.refresh(core);
        true
    }

    /// Remove every filter with the given tag.
    pub(crate) fn remove_filter_tag(&mut self, tag: &str) -> usize {
        self.remove_filters_where(|f| f.tag() == tag)
    }

    /// Remove one filter instance.
    pub(crate) fn remove_filter(&mut self, filter: &SharedFilter) -> bool {
        self.remove_filters_where(|f| Rc::ptr_eq(f, filter)) > 0
    }

    pub(crate) fn clear_filters(&mut self) {
        for filter in self.filters.drain(..) {
            filter.destroy();
        }
    }

    fn remove_filters_where(&mut self, mut pred: impl FnMut(&SharedFilter) -> bool) -> usize {
        let before = self.filters.len();
        self.filters.retain(|f| {
            if pred(f) {
                f.destroy();
                false
            } else {
                true
            }
        });
        before - self.filters.len()
    }

    fn refresh_filters(&self, core: &mut Core<'_>) {
        let mut ctx = core.filter_context(self);
        for filter in &self.filters {
            filter.refresh(&mut ctx);
        }
    }

    /// Run the filter pipeline over a candidate rect.
    pub(crate) fn run_filters(&self, core: &mut Core<'_>, rect: Rect, direction: Direction) -> Rect {
        let mut ctx = core.filter_context(self);
        filters::run(&self.filters, rect, direction, &mut ctx)
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    /// Commit a true-scale rect.
    pub(crate) fn update(&mut self, core: &mut Core<'_>, rect: Rect) -> Rect {
        let display = core.scale().scale(&rect);
        self.update_raw(core, display, Direction::SE)
    }

    /// Filter and commit a display-scale rect, then emit `cropmove` with its
    /// true-scale equivalent. Returns the committed rect.
    pub(crate) fn update_raw(&mut self, core: &mut Core<'_>, rect: Rect, direction: Direction) -> Rect {
        if self.lifecycle != Lifecycle::Active {
            debug!(selection = %self.id, "update ignored, selection not active");
            return self.get();
        }
        let filtered = self.run_filters(core, rect.rederive(), direction).rederive();
        self.redraw(core, filtered);

        if let Some(element) = self.element {
            let rect = core.scale().unscale(&filtered);
            core.emit(element, CropEvent::Move { selection: self.id, rect });
        }
        filtered
    }

    /// Write `rect` to the surface and record it as committed.
    fn redraw(&mut self, core: &mut Core<'_>, rect: Rect) {
        if let Some(element) = self.element {
            core.surface.set_style(
                element,
                &[
                    ("left", px(rect.x)),
                    ("top", px(rect.y)),
                    ("width", px(rect.w)),
                    ("height", px(rect.h)),
                ],
            );
        }
        self.last = Some(rect);
    }

    // ========================================================================
    // Stacking & Focus
    // ========================================================================

    pub(crate) fn to_front(&mut self, core: &mut Core<'_>) {
        self.active = true;
        if let Some(element) = self.element {
            core.surface.add_class(element, &core.options.css.current);
        }
        self.refresh(core);
    }

    pub(crate) fn to_back(&mut self, core: &mut Core<'_>) {
        self.active = false;
        if let Some(element) = self.element {
            core.surface.remove_class(element, &core.options.css.current);
            core.surface.remove_class(element, &core.options.css.focus);
        }
    }

    pub(crate) fn focus(&mut self, core: &mut Core<'_>) {
        let (Some(element), Some(frame)) = (self.element, self.frame) else {
            return;
        };
        core.surface.focus(frame);
        core.surface.add_class(element, &core.options.css.focus);
        if !self.focused {
            self.focused = true;
            core.emit(element, CropEvent::Focus { selection: self.id });
        }
    }

    pub(crate) fn blur(&mut self, core: &mut Core<'_>) {
        let (Some(element), Some(frame)) = (self.element, self.frame) else {
            return;
        };
        core.surface.blur(frame);
        core.surface.remove_class(element, &core.options.css.focus);
        if self.focused {
            self.focused = false;
            core.emit(element, CropEvent::Blur { selection: self.id });
        }
    }
}
