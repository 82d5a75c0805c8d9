//! Controller module - the [`Cropper`] and its operations.
//!
//! Organized like a small application:
//! - `state` - the Cropper struct, selection set and borrow helpers
//! - `lifecycle` - construction, image sizing, listeners and teardown
//! - `selections` - activation order, creation, removal and filters
//! - `commands` - nudge, set/max select, animation and centering
//! - `settings_handlers` - option replacement and partial updates
//!
//! Pointer, touch and keyboard handlers live in [`crate::input`] as further
//! `impl Cropper` blocks.

mod commands;
mod lifecycle;
mod selections;
mod settings_handlers;
mod state;

pub use state::{Cropper, ImageInfo, UiState};
