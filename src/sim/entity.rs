//! Shared entity behaviour
//!
//! Ships and lasers share no base type. Instead each concrete struct
//! implements the small capability traits it needs, and ships embed a
//! [`Hull`] for health and shot timing.

use glam::Vec2;

use crate::assets::Sprite;

/// Anything with a sprite at a top-left position
pub trait Drawable {
    fn position(&self) -> Vec2;
    fn sprite(&self) -> &Sprite;

    fn width(&self) -> f32 {
        self.sprite().width()
    }

    fn height(&self) -> f32 {
        self.sprite().height()
    }
}

/// Anything that loses health
pub trait Damageable {
    fn hull(&self) -> &Hull;
    fn hull_mut(&mut self) -> &mut Hull;

    fn take_damage(&mut self, amount: i32) {
        self.hull_mut().damage(amount);
    }

    fn is_destroyed(&self) -> bool {
        self.hull().health <= 0
    }
}

/// Anything that moves on its own each tick
pub trait Mobile {
    fn advance(&mut self);
}

/// Health and shot timing shared by every ship
#[derive(Debug, Clone, PartialEq)]
pub struct Hull {
    /// May drop below zero within a frame; callers resolve it before the frame ends
    pub health: i32,
    pub max_health: i32,
    /// Tick of the last successful shot
    pub last_shot_tick: Option<u64>,
}

impl Hull {
    pub fn new(health: i32) -> Self {
        Self {
            health,
            max_health: health,
            last_shot_tick: None,
        }
    }

    pub fn damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    /// Restore health to full
    pub fn replenish(&mut self) {
        self.health = self.max_health;
    }

    /// Fraction of health left, clamped to [0, 1]
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    /// True if `cooldown` ticks have passed since the last shot
    pub fn ready_to_fire(&self, now: u64, cooldown: u64) -> bool {
        match self.last_shot_tick {
            None => true,
            Some(last) => now.saturating_sub(last) >= cooldown,
        }
    }

    pub fn mark_fired(&mut self, now: u64) {
        self.last_shot_tick = Some(now);
    }
}
