//! Selection geometry and interaction engine for an interactive image-cropping
//! widget.
//!
//! A [`Cropper`] owns a container element on a [`Surface`] and manages one or
//! more rectangular [`Selection`]s on it. Input handlers turn pointer, touch
//! and keyboard events into candidate rects; every candidate runs through the
//! selection's [filter pipeline](filters) before it is committed, rendered
//! and reported through [`CropEvent`] notifications in true (image) scale.
//!
//! ```ignore
//! use cropwidget::{Cropper, MemorySurface, Options, Size};
//!
//! let mut surface = MemorySurface::new();
//! let root = surface.create_sized("div", &[("id", "crop")], Size::new(500.0, 500.0));
//! let mut cropper = Cropper::attach(surface, "#crop", Options::default())?;
//! cropper.new_selection();
//! cropper.set_select(&[10.0, 10.0, 200.0, 100.0])?;
//! ```

pub mod animation;
pub mod constants;
mod context;
pub mod cropper;
pub mod error;
pub mod events;
pub mod filters;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod options;
pub mod perf;
pub mod selection;
pub mod stage;
pub mod surface;

pub use animation::{Animation, AnimationCallback};
pub use cropper::{Cropper, ImageInfo, UiState};
pub use error::{CropError, CropResult};
pub use events::{CropEvent, EventKind, ListenerId};
pub use filters::{Filter, FilterContext, SharedFilter};
pub use geometry::{largest_box, Point, Rect, Scale, Size};
pub use input::{Direction, Key, MouseButton, PointerInput};
pub use options::{CssClasses, Edge, Options};
pub use selection::{Lifecycle, Selection, SelectionId, SelectionSettings};
pub use stage::Stage;
pub use surface::{MemorySurface, NodeId, Surface};
#[cfg(feature = "web")]
pub use surface::WebSurface;
