//! Rendering module
//!
//! Knows what to draw and in which order; the pixels are pushed by whatever
//! implements [`RenderSurface`].

pub mod frame;
pub mod recording;
pub mod surface;

pub use frame::{
    BANNER_COLOR, HEALTH_BAR_BACKGROUND_COLOR, HEALTH_BAR_COLOR, LABELS_COLOR, draw_frame,
};
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::{Color, Rect, RenderSurface};
