//! Error types for the cropping engine.
//!
//! Only precondition violations and construction failures are errors. State
//! dependent no-ops (nudging without a selection, deleting the last selection)
//! return normally.

use thiserror::Error;

/// Errors raised by the cropping engine
#[derive(Error, Debug)]
pub enum CropError {
    /// Coordinate array did not have exactly four elements
    #[error("coordinate array must have 4 values, got {len}")]
    InvalidCoordinates { len: usize },

    /// Selector did not match any element on the surface
    #[error("element not found: {0}")]
    TargetNotFound(String),

    /// Direction token is not one of move, n, s, e, w, ne, nw, se, sw
    #[error("unknown drag direction: {0:?}")]
    UnknownDirection(String),

    /// Options patch could not be merged into the current options
    #[error("invalid options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

/// Result type alias for cropping operations
pub type CropResult<T> = Result<T, CropError>;
