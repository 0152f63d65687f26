//! Per-frame draw order
//!
//! background -> enemies -> player lasers -> enemy lasers -> player + health
//! bar -> HUD labels -> banner -> present

use glam::Vec2;

use super::surface::{Color, Rect, RenderSurface};
use crate::assets::{FontRole, SpriteKind};
use crate::consts::{HEALTH_BAR_HEIGHT, HEALTH_BAR_OFFSET, LABELS_OFFSET};
use crate::sim::{Drawable, GamePhase, GameState, PlayerShip};

pub const LABELS_COLOR: Color = Color::WHITE;
pub const BANNER_COLOR: Color = Color::WHITE;
pub const HEALTH_BAR_BACKGROUND_COLOR: Color = Color::RED;
pub const HEALTH_BAR_COLOR: Color = Color::GREEN;

fn draw_entity<S: RenderSurface + ?Sized, D: Drawable>(surface: &mut S, entity: &D) {
    surface.draw_sprite(entity.sprite(), entity.position());
}

/// Player ship with its health bar underneath
fn draw_player<S: RenderSurface + ?Sized>(surface: &mut S, player: &PlayerShip) {
    draw_entity(surface, player);

    let x = player.pos.x.trunc();
    let y = player.pos.y + player.height() + HEALTH_BAR_OFFSET;
    let width = player.width();
    surface.draw_rect(
        Rect::new(x, y, width, HEALTH_BAR_HEIGHT),
        HEALTH_BAR_BACKGROUND_COLOR,
    );
    surface.draw_rect(
        Rect::new(x, y, (width * player.hull.health_fraction()).trunc(), HEALTH_BAR_HEIGHT),
        HEALTH_BAR_COLOR,
    );
}

fn draw_hud<S: RenderSurface + ?Sized>(surface: &mut S, state: &GameState) {
    let lives = format!("lives: {}", state.lives);
    let level = format!("level: {}", state.level);

    surface.draw_text(
        &lives,
        FontRole::Hud,
        LABELS_COLOR,
        Vec2::splat(LABELS_OFFSET),
    );

    let level_width = surface.text_size(&level, FontRole::Hud).x;
    surface.draw_text(
        &level,
        FontRole::Hud,
        LABELS_COLOR,
        Vec2::new(
            state.settings.screen_width - level_width - LABELS_OFFSET,
            LABELS_OFFSET,
        ),
    );
}

fn draw_banner<S: RenderSurface + ?Sized>(surface: &mut S, state: &GameState) {
    let Some(banner) = state.banner else {
        return;
    };
    if state.phase() == GamePhase::Playing {
        return;
    }
    let text = banner.text();
    let size = surface.text_size(text, banner.font());
    let pos = ((state.screen() - size) / 2.0).trunc();
    surface.draw_text(text, banner.font(), BANNER_COLOR, pos);
}

/// Draw one full frame of the session and present it
pub fn draw_frame<S: RenderSurface + ?Sized>(surface: &mut S, state: &GameState) {
    surface.draw_sprite(state.sheet().get(SpriteKind::Background), Vec2::ZERO);

    for enemy in &state.enemies {
        draw_entity(surface, enemy);
    }
    for laser in &state.player_lasers {
        draw_entity(surface, laser);
    }
    for laser in &state.enemy_lasers {
        draw_entity(surface, laser);
    }

    // Drawn under the labels
    draw_player(surface, &state.player);
    draw_hud(surface, state);
    draw_banner(surface, state);

    surface.present();
}
