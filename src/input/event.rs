//! Host-supplied input events.

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Primary,
    Middle,
    Secondary,
    Other(u16),
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` value.
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Middle,
            2 => Self::Secondary,
            n => Self::Other(n.unsigned_abs()),
        }
    }
}

/// A pointer event in page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    Mouse { page: Point, button: MouseButton },
    /// Active touch points, first one drives the gesture
    Touch { touches: Vec<Point> },
}

impl PointerInput {
    pub fn mouse(x: f64, y: f64) -> Self {
        Self::Mouse {
            page: Point::new(x, y),
            button: MouseButton::Primary,
        }
    }

    pub fn touch(x: f64, y: f64) -> Self {
        Self::Touch {
            touches: vec![Point::new(x, y)],
        }
    }

    /// Touch end with no remaining touch points.
    pub fn touch_end() -> Self {
        Self::Touch {
            touches: Vec::new(),
        }
    }

    /// Page position, or `None` for a touch event without touches.
    pub fn page_position(&self) -> Option<Point> {
        match self {
            Self::Mouse { page, .. } => Some(*page),
            Self::Touch { touches } => touches.first().copied(),
        }
    }

    /// Touches always count as primary.
    pub fn is_primary(&self) -> bool {
        match self {
            Self::Mouse { button, .. } => *button == MouseButton::Primary,
            Self::Touch { .. } => true,
        }
    }

    pub fn touch_count(&self) -> usize {
        match self {
            Self::Mouse { .. } => 0,
            Self::Touch { touches } => touches.len(),
        }
    }
}

/// Keys the keyboard adapter reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Delete,
    Backspace,
    Escape,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Delete" => Self::Delete,
            "Backspace" => Self::Backspace,
            "Escape" => Self::Escape,
            _ => Self::Other,
        }
    }

    /// Unit nudge vector for arrow keys.
    pub fn arrow_vector(&self) -> Option<(f64, f64)> {
        match self {
            Self::ArrowUp => Some((0.0, -1.0)),
            Self::ArrowDown => Some((0.0, 1.0)),
            Self::ArrowLeft => Some((-1.0, 0.0)),
            Self::ArrowRight => Some((1.0, 0.0)),
            _ => None,
        }
    }
}
