//! A surface that records draw calls instead of rasterizing them.
//!
//! Drives the headless binary and lets tests assert on draw order.

use glam::Vec2;

use super::surface::{Color, Rect, RenderSurface};
use crate::assets::{FontRole, Sprite, SpriteKind};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite { kind: SpriteKind, pos: Vec2 },
    Rect { rect: Rect, color: Color },
    Text { text: String, font: FontRole, color: Color, pos: Vec2 },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pending: Vec<DrawCommand>,
    /// Commands of the last presented frame
    pub last_frame: Vec<DrawCommand>,
    pub frames_presented: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text lines drawn in the last presented frame
    pub fn texts(&self) -> Vec<&str> {
        self.last_frame
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl RenderSurface for RecordingSurface {
    fn draw_sprite(&mut self, sprite: &Sprite, pos: Vec2) {
        self.pending.push(DrawCommand::Sprite {
            kind: sprite.kind,
            pos,
        });
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.pending.push(DrawCommand::Rect { rect, color });
    }

    fn draw_text(&mut self, text: &str, font: FontRole, color: Color, pos: Vec2) {
        self.pending.push(DrawCommand::Text {
            text: text.to_string(),
            font,
            color,
            pos,
        });
    }

    /// Half the point size per character, one point size tall
    fn text_size(&self, text: &str, font: FontRole) -> Vec2 {
        let size = font.point_size();
        Vec2::new(text.chars().count() as f32 * size * 0.5, size)
    }

    fn present(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
    }
}
