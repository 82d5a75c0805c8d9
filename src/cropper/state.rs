//! Controller struct definition and borrow helpers.

use crate::animation::Animation;
use crate::context::Core;
use crate::events::Emitter;
use crate::filters::SharedFilter;
use crate::geometry::{Rect, Scale, Size};
use crate::options::Options;
use crate::perf::OperationStats;
use crate::selection::{Selection, SelectionId};
use crate::stage::Stage;
use crate::surface::{NodeId, Surface};

/// Selection set and active pointer.
///
/// `multi[0]` is the active selection whenever `selection` is `Some`.
#[derive(Debug, Default)]
pub struct UiState {
    pub(crate) multi: Vec<Selection>,
    pub(crate) selection: Option<SelectionId>,
}

impl UiState {
    /// Selections, most recently activated first.
    pub fn multi(&self) -> &[Selection] {
        &self.multi
    }

    /// The active selection.
    pub fn selection(&self) -> Option<SelectionId> {
        self.selection
    }

    pub fn len(&self) -> usize {
        self.multi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.multi.is_empty()
    }

    pub fn ids(&self) -> Vec<SelectionId> {
        self.multi.iter().map(Selection::id).collect()
    }

    pub(crate) fn index_of(&self, id: SelectionId) -> Option<usize> {
        self.multi.iter().position(|s| s.id() == id)
    }
}

/// Image the controller was built around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageInfo {
    pub node: Option<NodeId>,
    /// Natural pixel size of the image
    pub natural: Size,
    /// Size the image is displayed at
    pub display: Size,
    /// The container was created around the image and is removed on destroy
    pub(crate) owns_container: bool,
}

/// Interactive cropping controller.
///
/// Owns every [`Selection`], the shade overlay, the listener registry and the
/// options. Selections are addressed by [`SelectionId`].
pub struct Cropper<S: Surface> {
    pub(crate) surface: S,
    pub(crate) container: NodeId,
    pub(crate) options: Options,
    pub(crate) ui: UiState,
    /// Controller-scoped filter instances by registered name
    pub(crate) filters: Vec<(String, SharedFilter)>,
    pub(crate) stage: Stage,
    pub(crate) emitter: Emitter,
    pub(crate) animation: Option<Animation>,
    pub(crate) image: Option<ImageInfo>,
    /// Keyboard watcher enabled
    pub(crate) keyboard: bool,
    pub(crate) next_id: u64,
    pub(crate) destroyed: bool,
    pub(crate) move_stats: OperationStats,
}

impl<S: Surface> std::fmt::Debug for Cropper<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cropper")
            .field("container", &self.container)
            .field("ui", &self.ui)
            .field("filters", &self.filter_names())
            .field("animation", &self.animation)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

impl<S: Surface> Cropper<S> {
    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn image(&self) -> Option<&ImageInfo> {
        self.image.as_ref()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn keyboard_enabled(&self) -> bool {
        self.keyboard
    }

    /// Timing of recent pointer-move handling.
    pub fn move_stats(&self) -> &OperationStats {
        &self.move_stats
    }

    pub fn selection(&self, id: SelectionId) -> Option<&Selection> {
        self.ui.multi.iter().find(|s| s.id() == id)
    }

    pub fn active(&self) -> Option<&Selection> {
        self.ui.selection.and_then(|id| self.selection(id))
    }

    /// Names of the controller-scoped filters, in `applyFilters` order.
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn container_size(&self) -> Size {
        self.surface.size(self.container)
    }

    /// Rect covering the whole container, display scale.
    pub fn container_rect(&self) -> Rect {
        let size = self.container_size();
        Rect::from_xywh(0.0, 0.0, size.width, size.height)
    }

    pub fn scale_factors(&self) -> Scale {
        self.options.scale()
    }

    // ========================================================================
    // Borrow helpers
    // ========================================================================

    /// Split into a selection context and the selection list.
    pub(crate) fn split(&mut self) -> (Core<'_>, &mut Vec<Selection>) {
        let Self {
            surface,
            options,
            container,
            stage,
            emitter,
            ui,
            ..
        } = self;
        let core = Core {
            surface,
            options,
            container: *container,
            stage,
            emitter,
        };
        (core, &mut ui.multi)
    }

    /// Run `f` on one selection with a borrowed context. `None` if the id is
    /// unknown.
    pub(crate) fn with_selection<R>(
        &mut self,
        id: SelectionId,
        f: impl FnOnce(&mut Selection, &mut Core<'_>) -> R,
    ) -> Option<R> {
        let index = self.ui.index_of(id)?;
        let (mut core, multi) = self.split();
        Some(f(&mut multi[index], &mut core))
    }

    /// Run `f` on every selection, front first.
    pub(crate) fn for_each_selection(&mut self, mut f: impl FnMut(&mut Selection, &mut Core<'_>)) {
        let (mut core, multi) = self.split();
        for selection in multi.iter_mut() {
            f(selection, &mut core);
        }
    }

    pub(crate) fn allocate_id(&mut self) -> SelectionId {
        self.next_id += 1;
        SelectionId(self.next_id)
    }
}
