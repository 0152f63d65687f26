//! Pixel Invaders - a wave-based arcade space shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, session state)
//! - `renderer`: Draw-order logic over an abstract render surface
//! - `platform`: Keyboard/gamepad abstraction
//! - `assets`: Sprite handles, collision masks and font roles
//! - `settings`: Data-driven game balance
//! - `session`: Outer restart loop

pub mod assets;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (frames per second)
    pub const TICK_RATE: u32 = 60;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 750.0;
    pub const SCREEN_HEIGHT: f32 = 750.0;

    /// Session defaults
    pub const START_LEVEL: u32 = 1;
    pub const START_LIVES: u32 = 5;
    pub const INIT_HEALTH: i32 = 100;
    pub const INIT_ENEMY_COUNT: u32 = 10;
    pub const INIT_ENEMY_VELOCITY: f32 = 1.0;

    /// Per-level escalation
    pub const ENEMY_INCREMENT_COUNT: u32 = INIT_ENEMY_COUNT / 2;
    pub const ENEMY_VELOCITY_INCREMENT: f32 = 0.5;

    /// Laser velocities (pixels per tick, negative = upward)
    pub const PLAYER_LASER_VELOCITY: f32 = -5.0;
    pub const ENEMY_LASER_VELOCITY: f32 = 5.0;

    /// Shoot cooldowns in seconds
    pub const PLAYER_COOLDOWN_SECS: f32 = 4.0;
    pub const ENEMY_COOLDOWN_SECS: f32 = 2.0;

    /// Damage the player takes when an enemy ship rams it
    pub const SHIPS_COLLISION_DAMAGE: i32 = 50;

    /// Player movement
    pub const SHIP_VELOCITY: f32 = 5.0;
    pub const CONTROLLER_SPEED_FACTOR: f32 = 1.25;

    /// An eligible enemy fires on average once every `RANDOM_SHOOT_FACTOR` seconds
    pub const RANDOM_SHOOT_FACTOR: u32 = 5;
    /// Larger values pack a wave's spawn band tighter
    pub const CROWD_FACTOR: u32 = 2;

    /// Banner durations in seconds
    pub const LEVEL_UP_WAIT_SECS: f32 = 3.0;
    pub const LOST_WAIT_SECS: f32 = 0.0;

    /// Layout
    pub const PLAYER_SHIP_OFFSET: f32 = 30.0;
    pub const HEALTH_BAR_OFFSET: f32 = 10.0;
    pub const HEALTH_BAR_HEIGHT: f32 = 10.0;
    pub const LABELS_OFFSET: f32 = 10.0;
}

/// Convert a duration in seconds to a whole number of simulation ticks
#[inline]
pub fn seconds_to_ticks(seconds: f32, tick_rate: u32) -> u32 {
    (seconds * tick_rate as f32).round().max(0.0) as u32
}
