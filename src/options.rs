//! Widget options.
//!
//! Field names serialize in camelCase so a host can pass the same JSON object
//! it would give the browser widget. Every field has a default, so partial
//! objects deserialize.

use crate::constants::{DEFAULT_ANIM_DURATION_MS, DEFAULT_MAX_SIZE, DEFAULT_MIN_SIZE};
use crate::error::CropResult;
use crate::geometry::Scale;
use crate::input::Direction;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inset of the permitted selection area from each container edge.
///
/// Negative values let a selection extend past the container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Edge {
    pub n: f64,
    pub s: f64,
    pub e: f64,
    pub w: f64,
}

/// Class names written on generated elements.
///
/// Values may hold several space-separated classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CssClasses {
    pub container: String,
    pub selection: String,
    pub button: String,
    /// Marks elements a pointer-down may start a drag on
    pub drag: String,
    pub no_drag: String,
    pub no_resize: String,
    pub handles: String,
    pub borders: String,
    pub drag_bars: String,
    pub shades: String,
    pub current: String,
    pub focus: String,
}

impl Default for CssClasses {
    fn default() -> Self {
        Self {
            container: "jcrop-active".into(),
            selection: "jcrop-selection".into(),
            button: "jcrop-box jcrop-drag".into(),
            drag: "jcrop-drag".into(),
            no_drag: "jcrop-nodrag".into(),
            no_resize: "jcrop-noresize".into(),
            handles: "jcrop-handle jcrop-drag".into(),
            borders: "jcrop-border".into(),
            drag_bars: "jcrop-dragbar jcrop-drag".into(),
            shades: "jcrop-shades".into(),
            current: "jcrop-current".into(),
            focus: "jcrop-focus".into(),
        }
    }
}

/// Controller and per-selection options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    // Selection behavior
    pub edge: Edge,
    /// Initial selection `[x, y, w, h]` in true scale, consumed when applied
    pub set_select: Option<Vec<f64>>,
    /// Whether the shade overlay follows the active selection
    pub linked: bool,
    pub can_delete: bool,
    pub can_select: bool,
    pub can_drag: bool,
    pub can_resize: bool,
    pub aspect_ratio: f64,
    pub min_size: [f64; 2],
    pub max_size: [f64; 2],

    // Stage behavior
    /// Pointer-down on the empty stage draws a selection
    pub allow_select: bool,
    pub multi: bool,
    /// Upper bound on selections created by drawing; `None` is unbounded
    pub multi_max: Option<usize>,
    pub animation: bool,
    pub anim_duration: f64,
    pub bg_color: String,
    pub bg_opacity: f64,

    // Startup
    /// Registered filter names instantiated for new selections
    pub apply_filters: Vec<String>,
    pub borders: Vec<Direction>,
    pub handles: Vec<Direction>,
    pub dragbars: Vec<Direction>,

    // Scaling
    pub xscale: f64,
    pub yscale: f64,
    pub box_width: Option<f64>,
    pub box_height: Option<f64>,
    pub true_size: Option<[f64; 2]>,

    pub css: CssClasses,
}

impl Default for Options {
    fn default() -> Self {
        use Direction::*;
        Self {
            edge: Edge::default(),
            set_select: None,
            linked: true,
            can_delete: true,
            can_select: true,
            can_drag: true,
            can_resize: true,
            aspect_ratio: 0.0,
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            allow_select: true,
            multi: false,
            multi_max: None,
            animation: true,
            anim_duration: DEFAULT_ANIM_DURATION_MS,
            bg_color: "black".into(),
            bg_opacity: 0.5,
            apply_filters: ["constrain", "extent", "backoff", "ratio", "shader", "round"]
                .map(String::from)
                .to_vec(),
            borders: vec![E, W, S, N],
            handles: vec![N, S, E, W, SW, NE, NW, SE],
            dragbars: vec![N, E, W, S],
            xscale: 1.0,
            yscale: 1.0,
            box_width: None,
            box_height: None,
            true_size: None,
            css: CssClasses::default(),
        }
    }
}

impl Options {
    /// Display/true scale factors.
    pub fn scale(&self) -> Scale {
        Scale::new(self.xscale, self.yscale)
    }

    /// Deep-merge a partial JSON object over these options.
    ///
    /// Objects merge key by key; any other value replaces the old one.
    pub fn merged(&self, patch: Value) -> CropResult<Self> {
        let mut current = serde_json::to_value(self)?;
        merge_json(&mut current, patch);
        Ok(serde_json::from_value(current)?)
    }
}

fn merge_json(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, patch) => *base = patch,
    }
}
