//! Pointer, touch and keyboard input handling for the cropper.
//!
//! This module turns host input events into selection gestures: dragging a
//! selection body, resizing from a handle or border, drawing a new selection
//! on the stage, and keyboard nudges.
//!
//! ## Architecture
//!
//! Each selection carries an explicit state machine ([`InputState`]) that is
//! `Idle` or `Dragging`; the drag anchors live inside the `Dragging` variant
//! and are dropped on release. Handlers are `impl Cropper` blocks, one file
//! per phase.
//!
//! ## Modules
//!
//! - `direction` - Drag direction tokens and edge predicates
//! - `state` - Input state machine enum and helper methods
//! - `coords` - Page to container-local coordinate conversion
//! - `event` - Host input event types
//! - `pointer_down` - Pointer/touch down (drag or draw start)
//! - `drag` - Pointer move (candidate rect geometry)
//! - `pointer_up` - Pointer/touch up (gesture end)
//! - `keys` - Keyboard nudge, delete and escape

pub mod coords;
mod direction;
mod drag;
mod event;
mod keys;
mod pointer_down;
mod pointer_up;
mod state;

pub use coords::CoordinateConverter;
pub use direction::Direction;
pub use drag::{clamp_move, drag_rect};
pub use event::{Key, MouseButton, PointerInput};
pub use state::{DragMode, DragState, InputState};
