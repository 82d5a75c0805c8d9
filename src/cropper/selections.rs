//! Selection set management - activation order, creation, removal, filters.

use super::Cropper;
use crate::filters::SharedFilter;
use crate::geometry::{Point, Rect};
use crate::selection::{Selection, SelectionId, SelectionSettings};
use crate::surface::Surface;
use tracing::debug;

impl<S: Surface> Cropper<S> {
    /// Make `id` the active selection and move it to the front of the set.
    ///
    /// Every other selection is sent to the back. Returns false for an unknown
    /// id.
    pub fn set_selection(&mut self, id: SelectionId) -> bool {
        let Some(index) = self.ui.index_of(id) else {
            debug!(selection = %id, "set_selection ignored, unknown selection");
            return false;
        };
        let selection = self.ui.multi.remove(index);
        self.ui.multi.insert(0, selection);
        self.ui.selection = Some(id);

        let (mut core, multi) = self.split();
        for other in multi.iter_mut().skip(1) {
            other.to_back(&mut core);
        }
        multi[0].to_front(&mut core);
        true
    }

    /// Create, initialize and activate a selection.
    pub fn new_selection(&mut self) -> SelectionId {
        let id = self.allocate_id();
        self.add_selection(Selection::new(id))
    }

    /// Initialize a caller-built selection against this controller and
    /// activate it. A selection whose id is already present is not added again.
    pub fn add_selection(&mut self, mut selection: Selection) -> SelectionId {
        let id = selection.id();
        if self.ui.index_of(id).is_some() {
            debug!(selection = %id, "selection already present");
            return id;
        }
        self.next_id = self.next_id.max(id.0);

        let filters = self.default_filters();
        let (mut core, multi) = self.split();
        selection.init(&mut core, filters);
        multi.push(selection);

        self.set_selection(id);
        debug!(selection = %id, count = self.ui.len(), "selection added");
        id
    }

    pub fn has_selection(&self, id: SelectionId) -> bool {
        self.ui.index_of(id).is_some()
    }

    /// Remove a selection from the set and detach it.
    ///
    /// If it was active, the next selection in order becomes active. The shade
    /// overlay is hidden once no selection is left.
    pub fn remove_selection(&mut self, id: SelectionId) -> Option<Selection> {
        let index = self.ui.index_of(id)?;
        if self.animation.as_ref().is_some_and(|a| a.target() == id) {
            self.animation = None;
        }

        let mut selection = self.ui.multi.remove(index);
        {
            let (mut core, _) = self.split();
            selection.remove(&mut core);
        }

        if self.ui.selection == Some(id) {
            self.ui.selection = None;
            if let Some(next) = self.ui.multi.first().map(Selection::id) {
                self.set_selection(next);
            }
        }
        if self.ui.multi.is_empty() {
            self.stage.hide(&mut self.surface);
        }
        debug!(selection = %id, remaining = self.ui.len(), "selection removed from set");
        Some(selection)
    }

    /// Delete the active selection if more than one selection exists and it
    /// may be deleted. Returns whether anything was deleted.
    pub fn request_delete(&mut self) -> bool {
        let deletable = self.active().is_some_and(|s| s.settings().can_delete);
        if self.ui.len() > 1 && deletable {
            self.delete_selection().is_some()
        } else {
            debug!(count = self.ui.len(), deletable, "delete request refused");
            false
        }
    }

    /// Remove the active selection unconditionally.
    pub fn delete_selection(&mut self) -> Option<SelectionId> {
        let id = self.ui.selection?;
        self.remove_selection(id)?;
        Some(id)
    }

    // ========================================================================
    // Focus & Refresh
    // ========================================================================

    /// Focus the active selection.
    pub fn focus(&mut self) {
        if let Some(id) = self.ui.selection {
            self.with_selection(id, |s, core| s.focus(core));
        }
    }

    /// Blur the active selection.
    pub fn blur(&mut self) {
        if let Some(id) = self.ui.selection {
            self.with_selection(id, |s, core| s.blur(core));
        }
    }

    /// Send every selection to the back.
    pub fn blur_all(&mut self) {
        self.for_each_selection(|s, core| s.to_back(core));
    }

    /// Re-apply options and re-commit every selection.
    pub fn refresh(&mut self) {
        self.for_each_selection(|s, core| s.refresh(core));
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// Add a filter instance to every selection.
    pub fn add_filter(&mut self, filter: SharedFilter) {
        self.for_each_selection(|s, core| {
            s.add_filter(core, filter.clone());
        });
    }

    /// Remove every filter tagged `tag` from every selection. Returns how many
    /// were removed.
    pub fn remove_filter(&mut self, tag: &str) -> usize {
        let mut removed = 0;
        self.for_each_selection(|s, core| {
            let n = s.remove_filter_tag(tag);
            if n > 0 {
                s.refresh(core);
            }
            removed += n;
        });
        removed
    }

    /// Add a filter to one selection.
    pub fn add_selection_filter(&mut self, id: SelectionId, filter: SharedFilter) -> bool {
        self.with_selection(id, |s, core| s.add_filter(core, filter))
            .unwrap_or(false)
    }

    /// Remove one filter instance from one selection.
    pub fn remove_selection_filter(&mut self, id: SelectionId, filter: &SharedFilter) -> bool {
        self.with_selection(id, |s, core| {
            let removed = s.remove_filter(filter);
            if removed {
                s.refresh(core);
            }
            removed
        })
        .unwrap_or(false)
    }

    /// Drop every filter of one selection.
    pub fn clear_selection_filters(&mut self, id: SelectionId) -> bool {
        self.with_selection(id, |s, core| {
            s.clear_filters();
            s.refresh(core);
        })
        .is_some()
    }

    /// Edit one selection's capabilities and constraints, then refresh it.
    pub fn update_selection_settings(
        &mut self,
        id: SelectionId,
        f: impl FnOnce(&mut SelectionSettings),
    ) -> bool {
        self.with_selection(id, |s, core| {
            let mut settings = s.settings().clone();
            f(&mut settings);
            s.apply_settings(core, settings);
        })
        .is_some()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Active selection's rect in display scale, or all zero without one.
    pub fn get_selection(&self) -> Rect {
        self.active().map(Selection::get).unwrap_or_default()
    }

    /// Active selection's rect in true scale.
    pub fn true_selection(&self) -> Rect {
        self.unscale(&self.get_selection())
    }

    /// Front-most selection whose rect contains a container-local point.
    pub fn selection_at(&self, point: Point) -> Option<SelectionId> {
        self.ui
            .multi
            .iter()
            .find(|s| s.last().is_some_and(|r| r.contains(point)))
            .map(Selection::id)
    }
}
