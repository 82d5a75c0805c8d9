//! Crate-wide constants.
//!
//! Centralizes magic numbers that are not user options so filter stages,
//! input adapters and the controller agree on them.

// ============================================================================
// Filter Priorities
// ============================================================================

/// Boundary clamp runs first
pub const CONSTRAIN_PRIORITY: i32 = 10;

/// Minimum/maximum size enforcement
pub const EXTENT_PRIORITY: i32 = 12;

/// Aspect-ratio lock
pub const RATIO_PRIORITY: i32 = 20;

/// Revert to the last committed rect when the ratio lock undershoots the minimum
pub const BACKOFF_PRIORITY: i32 = 22;

/// Integer rounding, just before the overlay sees the rect
pub const ROUND_PRIORITY: i32 = 90;

/// Shade overlay consumer, always last
pub const SHADE_PRIORITY: i32 = 100;

/// Relative tolerance used by the ratio lock to decide which dimension drives
pub const RATIO_EPSILON: f64 = 1e-9;

// ============================================================================
// Selection Defaults
// ============================================================================

/// Default minimum selection size `[w, h]` in display units
pub const DEFAULT_MIN_SIZE: [f64; 2] = [8.0, 8.0];

/// Default maximum selection size (0 = unbounded)
pub const DEFAULT_MAX_SIZE: [f64; 2] = [0.0, 0.0];

/// Side of the selection created by a tap on an empty stage
pub const TOUCH_SELECTION_SIZE: f64 = 100.0;

// ============================================================================
// Keyboard
// ============================================================================

/// Nudge distance for a plain arrow key
pub const NUDGE_STEP: f64 = 1.0;

/// Nudge distance for shift + arrow key
pub const NUDGE_STEP_LARGE: f64 = 10.0;

// ============================================================================
// Animation & Timing
// ============================================================================

/// Default animation duration in milliseconds
pub const DEFAULT_ANIM_DURATION_MS: f64 = 400.0;

/// Pointer-move handling slower than this is reported as a slow operation
pub const SLOW_MOVE_MS: f64 = 4.0;

// ============================================================================
// DOM Attributes
// ============================================================================

/// Attribute carrying a control's direction token
pub const ORD_ATTRIBUTE: &str = "data-ord";

/// Attribute marking a selection root element
pub const SELECTION_ATTRIBUTE: &str = "data-selection";
