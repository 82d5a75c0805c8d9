//! Drag direction tokens.
//!
//! Every drag-enabled control declares a direction token in its `data-ord`
//! attribute. `move` drags the whole selection; the compass tokens drag the
//! named edge or corner while the opposite side stays anchored.

use crate::error::CropError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which part of a selection a drag moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Translate the whole rect
    #[default]
    Move,
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl Direction {
    pub const ALL: [Direction; 9] = [
        Direction::Move,
        Direction::N,
        Direction::S,
        Direction::E,
        Direction::W,
        Direction::NE,
        Direction::NW,
        Direction::SE,
        Direction::SW,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::N => "n",
            Self::S => "s",
            Self::E => "e",
            Self::W => "w",
            Self::NE => "ne",
            Self::NW => "nw",
            Self::SE => "se",
            Self::SW => "sw",
        }
    }

    /// Parse an optional token, defaulting to `move` when absent or unknown.
    pub fn from_token(token: Option<&str>) -> Self {
        token.and_then(|t| t.parse().ok()).unwrap_or_default()
    }

    /// Top edge moves
    pub fn moves_north(&self) -> bool {
        matches!(self, Self::N | Self::NE | Self::NW)
    }

    /// Bottom edge moves
    pub fn moves_south(&self) -> bool {
        matches!(self, Self::S | Self::SE | Self::SW)
    }

    /// Right edge moves
    pub fn moves_east(&self) -> bool {
        matches!(self, Self::E | Self::NE | Self::SE)
    }

    /// Left edge moves
    pub fn moves_west(&self) -> bool {
        matches!(self, Self::W | Self::NW | Self::SW)
    }

    /// `n` or `s`
    pub fn is_vertical_edge(&self) -> bool {
        matches!(self, Self::N | Self::S)
    }

    /// `e` or `w`
    pub fn is_horizontal_edge(&self) -> bool {
        matches!(self, Self::E | Self::W)
    }

    pub fn is_corner(&self) -> bool {
        matches!(self, Self::NE | Self::NW | Self::SE | Self::SW)
    }

    /// Any direction that changes size rather than position.
    pub fn is_resize(&self) -> bool {
        !matches!(self, Self::Move)
    }

    /// Corner pointing from `anchor` towards `pos`; used while drawing.
    pub fn quadrant(dx: f64, dy: f64) -> Self {
        match (dx < 0.0, dy < 0.0) {
            (false, false) => Self::SE,
            (true, false) => Self::SW,
            (false, true) => Self::NE,
            (true, true) => Self::NW,
        }
    }
}

impl FromStr for Direction {
    type Err = CropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| CropError::UnknownDirection(s.to_string()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
