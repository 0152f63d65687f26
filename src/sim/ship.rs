//! Player and enemy ships

use std::sync::Arc;

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::entity::{Damageable, Drawable, Hull, Mobile};
use super::projectile::{LaserSpec, Projectile};
use crate::assets::{Sprite, SpriteKind};

/// Directional movement intents for one tick (combinable)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct PlayerShip {
    pub pos: Vec2,
    pub hull: Hull,
    pub sprite: Sprite,
    /// Available laser types; only the first is fired
    pub lasers: Vec<LaserSpec>,
}

impl PlayerShip {
    pub fn new(pos: Vec2, health: i32, sprite: Sprite, lasers: Vec<LaserSpec>) -> Self {
        Self {
            pos,
            hull: Hull::new(health),
            sprite,
            lasers,
        }
    }

    /// Move horizontally, keeping at least half the ship on screen
    pub fn move_x(&mut self, delta: f32, screen_width: f32) {
        let half = self.width() / 2.0;
        self.pos.x = (self.pos.x + delta).clamp(-half, screen_width - half);
    }

    /// Move vertically, keeping the whole ship on screen
    pub fn move_y(&mut self, delta: f32, screen_height: f32) {
        let max_y = (screen_height - self.height()).max(0.0);
        self.pos.y = (self.pos.y + delta).clamp(0.0, max_y);
    }

    /// Apply keyboard intents. Diagonals are a plain vector sum (not normalized).
    pub fn apply_intent(&mut self, intent: MoveIntent, velocity: f32, screen: Vec2) {
        if intent.left {
            self.move_x(-velocity, screen.x);
        }
        if intent.right {
            self.move_x(velocity, screen.x);
        }
        if intent.down {
            self.move_y(velocity, screen.y);
        }
        if intent.up {
            self.move_y(-velocity, screen.y);
        }
    }

    /// Apply analog stick input.
    ///
    /// Each axis moves `trunc(axis * velocity * boost)` whole pixels. Axis values
    /// with magnitude under `deadzone` count as zero.
    pub fn apply_axis(&mut self, axis: Vec2, velocity: f32, boost: f32, deadzone: f32, screen: Vec2) {
        let filter = |v: f32| if v.abs() < deadzone { 0.0 } else { v };
        let dx = (filter(axis.x) * velocity * boost).trunc();
        let dy = (filter(axis.y) * velocity * boost).trunc();
        self.move_x(dx, screen.x);
        self.move_y(dy, screen.y);
    }

    /// Fire the primary laser if the cooldown has elapsed
    pub fn try_shoot(&mut self, now: u64, cooldown: u64, laser_velocity: f32) -> Option<Projectile> {
        let spec = self.lasers.first()?;
        if !self.hull.ready_to_fire(now, cooldown) {
            return None;
        }
        let laser = Projectile::new(spec, self.pos, laser_velocity);
        self.hull.mark_fired(now);
        Some(laser)
    }
}

impl Drawable for PlayerShip {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn sprite(&self) -> &Sprite {
        &self.sprite
    }
}

impl Damageable for PlayerShip {
    fn hull(&self) -> &Hull {
        &self.hull
    }

    fn hull_mut(&mut self) -> &mut Hull {
        &mut self.hull
    }
}

/// Enemy colour variant. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyVariant {
    Red,
    Green,
    Blue,
}

impl EnemyVariant {
    pub const ALL: [EnemyVariant; 3] = [EnemyVariant::Red, EnemyVariant::Green, EnemyVariant::Blue];

    pub fn sprite_kind(&self) -> SpriteKind {
        match self {
            EnemyVariant::Red => SpriteKind::RedShip,
            EnemyVariant::Green => SpriteKind::GreenShip,
            EnemyVariant::Blue => SpriteKind::BlueShip,
        }
    }
}

/// An enemy ship drifting down the screen
#[derive(Debug, Clone)]
pub struct EnemyShip {
    pub pos: Vec2,
    pub hull: Hull,
    pub variant: EnemyVariant,
    pub sprite: Sprite,
    /// Downward speed, fixed at spawn
    pub velocity: f32,
    pub lasers: Arc<[LaserSpec]>,
}

impl EnemyShip {
    pub fn new(
        pos: Vec2,
        health: i32,
        variant: EnemyVariant,
        sprite: Sprite,
        velocity: f32,
        lasers: Arc<[LaserSpec]>,
    ) -> Self {
        Self {
            pos,
            hull: Hull::new(health),
            variant,
            sprite,
            velocity,
            lasers,
        }
    }

    /// Pick a random laser type and fire it, centred, if the cooldown has elapsed
    pub fn try_shoot<R: Rng>(
        &mut self,
        now: u64,
        cooldown: u64,
        laser_velocity: f32,
        rng: &mut R,
    ) -> Option<Projectile> {
        let spec = self.lasers.choose(rng)?;
        if !self.hull.ready_to_fire(now, cooldown) {
            return None;
        }
        let x = self.pos.x - (spec.sprite.width() / 2.0).trunc() + (self.width() / 2.0).trunc();
        let laser = Projectile::new(spec, Vec2::new(x, self.pos.y), laser_velocity);
        self.hull.mark_fired(now);
        Some(laser)
    }
}

impl Drawable for EnemyShip {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn sprite(&self) -> &Sprite {
        &self.sprite
    }
}

impl Damageable for EnemyShip {
    fn hull(&self) -> &Hull {
        &self.hull
    }

    fn hull_mut(&mut self) -> &mut Hull {
        &mut self.hull
    }
}

impl Mobile for EnemyShip {
    fn advance(&mut self) {
        self.pos.y += self.velocity;
    }
}
