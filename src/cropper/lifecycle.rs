//! Controller lifecycle - construction, image sizing and teardown.

use super::{Cropper, ImageInfo, UiState};
use crate::error::{CropError, CropResult};
use crate::events::{CropEvent, EventKind, ListenerId};
use crate::filters::{filter_constructor, SharedFilter};
use crate::geometry::{largest_box, Size};
use crate::options::Options;
use crate::perf::OperationStats;
use crate::stage::{px, Stage};
use crate::surface::{NodeId, Surface};
use tracing::{debug, info, trace};

impl<S: Surface> Cropper<S> {
    /// Build a controller on an existing container element.
    pub fn new(surface: S, container: NodeId, options: Options) -> CropResult<Self> {
        Self::build(surface, container, options, None)
    }

    /// Build a controller on the first element matching `selector`.
    pub fn attach(surface: S, selector: &str, options: Options) -> CropResult<Self> {
        let container = surface
            .query(selector)
            .ok_or_else(|| CropError::TargetNotFound(selector.to_string()))?;
        Self::new(surface, container, options)
    }

    /// Wrap `image` in a new container and build a controller on it.
    ///
    /// `natural` is the image's pixel size; `boxWidth`/`boxHeight` and
    /// `trueSize` derive the scale factors from it.
    pub fn from_image(
        mut surface: S,
        image: NodeId,
        natural: Size,
        options: Options,
    ) -> CropResult<Self> {
        let display = surface.size(image);
        let container = surface.create_element("div", &[]);
        surface.insert_before(image, container);
        surface.append(container, image);
        surface.set_style(image, &[("display", "block".into())]);
        surface.set_style(
            container,
            &[
                ("position", "relative".into()),
                ("width", px(display.width)),
                ("height", px(display.height)),
            ],
        );
        let info = ImageInfo {
            node: Some(image),
            natural,
            display,
            owns_container: true,
        };
        Self::build(surface, container, options, Some(info))
    }

    fn build(
        mut surface: S,
        container: NodeId,
        options: Options,
        image: Option<ImageInfo>,
    ) -> CropResult<Self> {
        surface.add_class(container, &options.css.container);
        let stage = Stage::new(
            &mut surface,
            container,
            &options.css.shades,
            &options.bg_color,
            options.bg_opacity,
        );

        let mut initial = options.clone();
        initial.set_select = None;
        let mut cropper = Self {
            surface,
            container,
            options: initial,
            ui: UiState::default(),
            filters: Vec::new(),
            stage,
            emitter: Default::default(),
            animation: None,
            image,
            keyboard: true,
            next_id: 0,
            destroyed: false,
            move_stats: OperationStats::default(),
        };

        cropper.instantiate_filters();
        cropper.set_options(options)?;
        cropper.emit(CropEvent::Init);

        info!(
            container = ?container,
            filters = ?cropper.filter_names(),
            "cropper initialized"
        );
        Ok(cropper)
    }

    /// Create one instance per registered name in `applyFilters`.
    fn instantiate_filters(&mut self) {
        for name in &self.options.apply_filters {
            match filter_constructor(name) {
                Some(constructor) => {
                    let filter = constructor();
                    filter.init();
                    self.filters.push((name.clone(), filter));
                }
                None => debug!(filter = %name, "unregistered filter skipped"),
            }
        }
    }

    /// Controller filters a new selection starts with.
    pub(crate) fn default_filters(&self) -> Vec<SharedFilter> {
        self.options
            .apply_filters
            .iter()
            .filter_map(|name| {
                self.filters
                    .iter()
                    .find(|(n, _)| n == name)
                    .map(|(_, f)| f.clone())
            })
            .collect()
    }

    /// Controller-scoped filter instance by name.
    pub fn filter(&self, name: &str) -> Option<SharedFilter> {
        self.filters
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, f)| f.clone())
    }

    // ========================================================================
    // Image Sizing
    // ========================================================================

    /// Fit an oversized image into `boxWidth` x `boxHeight`, then derive the
    /// scale factors from `trueSize` if set. Returns true when the container
    /// was resized (and the selections refreshed).
    pub(crate) fn apply_size_constraints(&mut self) -> bool {
        let mut resized = false;
        if let Some(mut image) = self.image {
            let Size {
                width: iw,
                height: ih,
            } = image.natural;
            let bw = self.options.box_width.filter(|v| *v > 0.0).unwrap_or(iw);
            let bh = self.options.box_height.filter(|v| *v > 0.0).unwrap_or(ih);

            if iw > 0.0 && ih > 0.0 && (iw > bw || ih > bh) {
                let (w, h) = largest_box(iw / ih, bw, bh);
                debug!(natural_w = iw, natural_h = ih, w, h, "fitting image into box");
                if let Some(node) = image.node {
                    self.surface
                        .set_style(node, &[("width", px(w)), ("height", px(h))]);
                }
                image.display = Size::new(w, h);
                self.image = Some(image);
                self.options.xscale = iw / w;
                self.options.yscale = ih / h;
                self.resize_container(w, h);
                resized = true;
            }
        }

        if let Some([tw, th]) = self.options.true_size {
            let size = self.container_size();
            if size.width > 0.0 && size.height > 0.0 {
                self.options.xscale = tw / size.width;
                self.options.yscale = th / size.height;
                trace!(xscale = self.options.xscale, yscale = self.options.yscale, "scale from trueSize");
            }
        }
        resized
    }

    /// Set the container's size and refresh every selection.
    pub fn resize_container(&mut self, width: f64, height: f64) {
        self.surface
            .set_style(self.container, &[("width", px(width)), ("height", px(height))]);
        self.refresh();
    }

    /// Associate an image element with the controller and size around it.
    pub fn attach_image(&mut self, image: NodeId, natural: Size) {
        let owns_container = self.image.is_some_and(|i| i.owns_container);
        self.image = Some(ImageInfo {
            node: Some(image),
            natural,
            display: natural,
            owns_container,
        });
        self.set_image(natural.width, natural.height);
    }

    /// Replace the current image's natural size, re-deriving the display size
    /// and scale. Returns false when no image is attached.
    pub fn set_image(&mut self, width: f64, height: f64) -> bool {
        let Some(mut image) = self.image else {
            debug!("set_image ignored, no image attached");
            return false;
        };
        image.natural = Size::new(width, height);
        image.display = image.natural;
        self.image = Some(image);
        if let Some(node) = image.node {
            self.surface
                .set_style(node, &[("width", px(width)), ("height", px(height))]);
        }

        self.options.xscale = 1.0;
        self.options.yscale = 1.0;
        self.surface
            .set_style(self.container, &[("width", px(width)), ("height", px(height))]);
        if !self.apply_size_constraints() {
            self.refresh();
        }

        self.emit(CropEvent::Image {
            image: image.node,
            width,
            height,
        });
        true
    }

    // ========================================================================
    // Listeners
    // ========================================================================

    /// Subscribe to one notification type.
    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> ListenerId
    where
        F: FnMut(&CropEvent) -> anyhow::Result<()> + 'static,
    {
        self.emitter.on(kind, handler)
    }

    /// Subscribe to every notification.
    pub fn on_any<F>(&mut self, handler: F) -> ListenerId
    where
        F: FnMut(&CropEvent) -> anyhow::Result<()> + 'static,
    {
        self.emitter.on_any(handler)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.emitter.off(id)
    }

    /// Emit a controller-level notification on the container.
    pub(crate) fn emit(&mut self, event: CropEvent) {
        let container = self.container;
        let (mut core, _) = self.split();
        core.emit(container, event);
    }

    // ========================================================================
    // Teardown
    // ========================================================================

    /// Remove every generated element and detach from the host.
    ///
    /// Unbinds document-level drag listeners even mid-drag. When the controller
    /// built its own container around an image, the image is put back in its
    /// place and the container removed; a caller-supplied container stays.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.animation = None;
        self.keyboard = false;

        self.for_each_selection(|selection, core| selection.remove(core));
        self.ui.multi.clear();
        self.ui.selection = None;
        for (_, filter) in self.filters.drain(..) {
            filter.destroy();
        }

        self.stage.destroy(&mut self.surface);
        self.surface
            .remove_class(self.container, &self.options.css.container);

        if let Some(image) = self.image {
            if let Some(node) = image.node {
                if image.owns_container {
                    self.surface.insert_before(self.container, node);
                }
                self.surface.set_style(node, &[("display", String::new())]);
            }
            if image.owns_container {
                self.surface.remove(self.container);
            }
        }

        self.destroyed = true;
        debug!(container = ?self.container, "cropper destroyed");
    }
}
