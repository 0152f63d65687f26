//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or device dependencies

pub mod collision;
pub mod entity;
pub mod mask;
pub mod projectile;
pub mod ship;
pub mod state;
pub mod tick;

pub use collision::{collided, take_hits};
pub use entity::{Damageable, Drawable, Hull, Mobile};
pub use mask::CollisionMask;
pub use projectile::{LaserSpec, Projectile};
pub use ship::{EnemyShip, EnemyVariant, MoveIntent, PlayerShip};
pub use state::{Banner, GameEvent, GamePhase, GameState};
pub use tick::{PauseCommand, TickInput, level_up, tick};
