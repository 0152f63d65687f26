//! Lasers fired by ships

use glam::Vec2;

use super::entity::{Drawable, Mobile};
use crate::assets::{Sprite, SpriteKind, SpriteSheet};

/// A laser type a ship can fire: sprite plus damage
#[derive(Debug, Clone)]
pub struct LaserSpec {
    pub sprite: Sprite,
    pub damage: i32,
}

impl LaserSpec {
    /// The player's single laser type
    pub fn player_arsenal(sheet: &SpriteSheet) -> Vec<LaserSpec> {
        vec![LaserSpec {
            sprite: sheet.get(SpriteKind::YellowLaser).clone(),
            damage: 100,
        }]
    }

    /// The enemy palette; one is picked at random for every shot
    pub fn enemy_arsenal(sheet: &SpriteSheet) -> Vec<LaserSpec> {
        [
            (SpriteKind::RedLaser, 10),
            (SpriteKind::GreenLaser, 20),
            (SpriteKind::BlueLaser, 30),
        ]
        .into_iter()
        .map(|(kind, damage)| LaserSpec {
            sprite: sheet.get(kind).clone(),
            damage,
        })
        .collect()
    }
}

/// A laser in flight. Moves vertically only.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    /// Pixels per tick; negative travels up
    pub velocity: f32,
    pub damage: i32,
    pub sprite: Sprite,
}

impl Projectile {
    pub fn new(spec: &LaserSpec, pos: Vec2, velocity: f32) -> Self {
        Self {
            pos,
            velocity,
            damage: spec.damage,
            sprite: spec.sprite.clone(),
        }
    }

    /// Still within the vertical range `[-height, screen_height]`
    pub fn in_bounds(&self, screen_height: f32) -> bool {
        (-self.sprite.height()..=screen_height).contains(&self.pos.y)
    }
}

impl Drawable for Projectile {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn sprite(&self) -> &Sprite {
        &self.sprite
    }
}

impl Mobile for Projectile {
    fn advance(&mut self) {
        self.pos.y += self.velocity;
    }
}

/// Advance every laser and drop those that left the screen
pub fn advance_all(lasers: &mut Vec<Projectile>, screen_height: f32) {
    lasers.retain_mut(|laser| {
        laser.advance();
        laser.in_bounds(screen_height)
    });
}
