//! Render surface abstraction
//!
//! The actual drawing backend lives outside the crate; the game only needs
//! sprite blits, filled rectangles, text and a present call.

use glam::Vec2;

use crate::assets::{FontRole, Sprite};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }
}

/// Drawing target for one frame
pub trait RenderSurface {
    /// Blit a sprite with its top-left corner at `pos`
    fn draw_sprite(&mut self, sprite: &Sprite, pos: Vec2);
    fn draw_rect(&mut self, rect: Rect, color: Color);
    /// Draw text with its top-left corner at `pos`
    fn draw_text(&mut self, text: &str, font: FontRole, color: Color, pos: Vec2);
    /// Rendered size of `text`, used for centring and right alignment
    fn text_size(&self, text: &str, font: FontRole) -> Vec2;
    /// Show the finished frame
    fn present(&mut self);
}
