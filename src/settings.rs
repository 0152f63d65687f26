//! Game settings and balance tuning
//!
//! Every gameplay constant lives here so a run can be re-tuned from a JSON
//! file without recompiling. Defaults reproduce the classic game.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;
use crate::seconds_to_ticks;

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Simulation frames per second
    pub tick_rate: u32,

    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Session ===
    pub start_level: u32,
    pub start_lives: u32,
    /// Health of every ship at spawn (player max health too)
    pub init_health: i32,
    pub init_enemy_count: u32,
    pub init_enemy_velocity: f32,
    pub enemy_count_increment: u32,
    pub enemy_velocity_increment: f32,

    // === Combat ===
    pub player_laser_velocity: f32,
    pub enemy_laser_velocity: f32,
    pub player_cooldown_secs: f32,
    pub enemy_cooldown_secs: f32,
    pub ships_collision_damage: i32,
    /// Average seconds between shots of an eligible enemy
    pub enemy_shoot_random_factor: u32,
    /// Spawn band height divisor; higher packs waves tighter
    pub crowd_factor: u32,

    // === Movement ===
    pub ship_velocity: f32,
    pub controller_speed_factor: f32,
    /// Axis magnitude below which controller input is ignored (0 = off)
    pub controller_deadzone: f32,

    // === Banners ===
    pub level_up_wait_secs: f32,
    /// 0 waits for the player to resume after a loss
    pub lost_wait_secs: f32,

    // === Layout ===
    pub player_ship_offset: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,

            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            start_level: START_LEVEL,
            start_lives: START_LIVES,
            init_health: INIT_HEALTH,
            init_enemy_count: INIT_ENEMY_COUNT,
            init_enemy_velocity: INIT_ENEMY_VELOCITY,
            enemy_count_increment: ENEMY_INCREMENT_COUNT,
            enemy_velocity_increment: ENEMY_VELOCITY_INCREMENT,

            player_laser_velocity: PLAYER_LASER_VELOCITY,
            enemy_laser_velocity: ENEMY_LASER_VELOCITY,
            player_cooldown_secs: PLAYER_COOLDOWN_SECS,
            enemy_cooldown_secs: ENEMY_COOLDOWN_SECS,
            ships_collision_damage: SHIPS_COLLISION_DAMAGE,
            enemy_shoot_random_factor: RANDOM_SHOOT_FACTOR,
            crowd_factor: CROWD_FACTOR,

            ship_velocity: SHIP_VELOCITY,
            controller_speed_factor: CONTROLLER_SPEED_FACTOR,
            controller_deadzone: 0.0,

            level_up_wait_secs: LEVEL_UP_WAIT_SECS,
            lost_wait_secs: LOST_WAIT_SECS,

            player_ship_offset: PLAYER_SHIP_OFFSET,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path).map_err(|e| GameError::ReadError {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults (with a warning) on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |field: &'static str, reason: &str| -> Result<(), GameError> {
            Err(GameError::InvalidSetting {
                field,
                reason: reason.to_string(),
            })
        };

        if self.tick_rate == 0 {
            return invalid("tick_rate", "must be positive");
        }
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return invalid("screen_width/screen_height", "must be positive");
        }
        if self.start_lives == 0 {
            return invalid("start_lives", "must be at least 1");
        }
        if self.init_health <= 0 {
            return invalid("init_health", "must be positive");
        }
        if self.init_enemy_count == 0 {
            return invalid("init_enemy_count", "must be at least 1");
        }
        if self.enemy_shoot_random_factor == 0 {
            return invalid("enemy_shoot_random_factor", "must be positive");
        }
        if self.crowd_factor == 0 {
            return invalid("crowd_factor", "must be positive");
        }
        if !(0.0..1.0).contains(&self.controller_deadzone) {
            return invalid("controller_deadzone", "must be in [0, 1)");
        }
        Ok(())
    }

    /// Frames between player shots
    pub fn player_cooldown_ticks(&self) -> u64 {
        seconds_to_ticks(self.player_cooldown_secs, self.tick_rate) as u64
    }

    /// Frames between shots of a single enemy
    pub fn enemy_cooldown_ticks(&self) -> u64 {
        seconds_to_ticks(self.enemy_cooldown_secs, self.tick_rate) as u64
    }

    /// Length of the "Level Up" freeze in frames
    pub fn level_up_freeze_ticks(&self) -> u32 {
        seconds_to_ticks(self.level_up_wait_secs, self.tick_rate)
    }

    /// Length of the "You Lost" freeze in frames (0 = wait for resume)
    pub fn lost_freeze_ticks(&self) -> u32 {
        seconds_to_ticks(self.lost_wait_secs, self.tick_rate)
    }

    /// Size of the per-frame enemy shot lottery; one draw in this many fires
    pub fn enemy_shoot_range(&self) -> u32 {
        self.enemy_shoot_random_factor * self.tick_rate
    }

    /// Wall-clock length of one frame
    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.tick_rate as f64)
    }
}
