//! Startup error types.
//!
//! The simulation itself never fails; these cover the preconditions checked
//! before a session starts.

use thiserror::Error;

use crate::assets::SpriteKind;

/// Errors that can occur while preparing assets or settings.
#[derive(Debug, Error)]
pub enum GameError {
    /// The asset source has no sprite for a required logical name.
    #[error("Missing sprite: {0:?}")]
    MissingSprite(SpriteKind),

    /// A sprite was supplied with zero width or height.
    #[error("Sprite {kind:?} has invalid size {width}x{height}")]
    EmptySprite {
        kind: SpriteKind,
        width: u32,
        height: u32,
    },

    /// Mask data does not match the declared sprite dimensions.
    #[error("Mask for {kind:?} has {actual} cells, expected {expected}")]
    MaskSizeMismatch {
        kind: SpriteKind,
        expected: usize,
        actual: usize,
    },

    /// Settings file could not be read.
    #[error("Failed to read settings '{path}': {details}")]
    ReadError { path: String, details: String },

    /// Settings JSON could not be parsed.
    #[error("Settings parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    /// A setting holds a value the simulation cannot run with.
    #[error("Invalid setting '{field}': {reason}")]
    InvalidSetting { field: &'static str, reason: String },
}
