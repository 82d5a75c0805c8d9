//! Option replacement and partial updates.

use super::Cropper;
use crate::error::CropResult;
use crate::events::CropEvent;
use crate::geometry::Rect;
use crate::options::Options;
use crate::surface::Surface;
use serde_json::Value;
use tracing::debug;

impl<S: Surface> Cropper<S> {
    /// Replace the options and push the per-selection ones to every
    /// selection.
    ///
    /// The scale factors are re-derived from `boxWidth`/`boxHeight` and
    /// `trueSize` before any rect is applied. A `setSelect` value is consumed:
    /// a selection is created if none exists and the rect applied to the
    /// active one. Emits `configupdate`.
    pub fn set_options(&mut self, mut options: Options) -> CropResult<()> {
        let select = options
            .set_select
            .take()
            .map(|values| Rect::wrap_from_xywh(&values))
            .transpose()?;

        let restyle = options.bg_color != self.options.bg_color
            || options.bg_opacity != self.options.bg_opacity;
        self.options = options;
        if restyle {
            self.stage
                .set_color(&mut self.surface, &self.options.bg_color, self.options.bg_opacity);
        }
        self.apply_size_constraints();

        let (mut core, multi) = self.split();
        let options = core.options;
        for selection in multi.iter_mut() {
            selection.set_options(&mut core, options);
        }

        if let Some(rect) = select {
            if self.ui.is_empty() {
                self.new_selection();
            }
            self.update(rect);
        }

        debug!("options updated");
        self.emit(CropEvent::ConfigUpdate);
        Ok(())
    }

    /// Deep-merge a partial JSON object (camelCase keys) over the current
    /// options, then apply them as [`set_options`](Self::set_options) does.
    pub fn update_options(&mut self, patch: Value) -> CropResult<()> {
        let merged = self.options.merged(patch)?;
        self.set_options(merged)
    }
}
