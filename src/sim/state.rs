//! Session state and core simulation types
//!
//! Everything one play session mutates lives in [`GameState`]; nothing is
//! global. A fresh `GameState` is built for every restart.

use std::sync::Arc;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;

use super::projectile::{LaserSpec, Projectile};
use super::ship::{EnemyShip, EnemyVariant, PlayerShip};
use crate::assets::{FontRole, SpriteKind, SpriteSheet};
use crate::settings::Settings;

/// Externally visible phase, derived from the session flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Banner shown, updates skipped until the countdown ends
    Frozen,
    /// Updates halted until explicitly resumed
    Paused,
    /// Lives ran out; terminal for this session
    Lost,
    /// Quit requested; the restart loop stops
    Quit,
}

/// Centred message shown while gameplay is suspended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    LevelUp,
    Paused,
    Lost,
}

impl Banner {
    pub fn text(&self) -> &'static str {
        match self {
            Banner::LevelUp => "Level Up!",
            Banner::Paused => "Paused",
            Banner::Lost => "You Lost...",
        }
    }

    pub fn font(&self) -> FontRole {
        match self {
            Banner::LevelUp => FontRole::Banner,
            Banner::Paused | Banner::Lost => FontRole::Overlay,
        }
    }
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PlayerFired,
    EnemyFired,
    EnemyDestroyed,
    /// An enemy rammed the player
    EnemyRammed,
    /// An enemy slipped past the bottom edge
    EnemyEscaped,
    LifeLost { lives_left: u32 },
    LevelUp { level: u32 },
    Paused,
    Resumed,
    Lost,
    Quit,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    sheet: Arc<SpriteSheet>,
    enemy_lasers_spec: Arc<[LaserSpec]>,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,

    /// Current level (starts at 1)
    pub level: u32,
    pub lives: u32,
    /// Size of the current wave
    pub enemy_count: u32,
    /// Downward speed given to newly spawned enemies
    pub enemy_velocity: f32,

    /// Frames left of the current freeze
    pub freeze_ticks: u32,
    pub paused: bool,
    /// False once the session is lost or quit
    pub active: bool,
    pub quit_requested: bool,
    pub banner: Option<Banner>,

    /// Active simulation frames elapsed (excludes frozen/paused frames)
    pub time_ticks: u64,

    pub player: PlayerShip,
    pub enemies: Vec<EnemyShip>,
    pub player_lasers: Vec<Projectile>,
    pub enemy_lasers: Vec<Projectile>,

    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session and spawn the first wave
    pub fn new(settings: Settings, sheet: Arc<SpriteSheet>, seed: u64) -> Self {
        let player_sprite = sheet.get(SpriteKind::PlayerShip).clone();
        let spawn = Vec2::new(
            ((settings.screen_width - player_sprite.width()) / 2.0).trunc(),
            settings.screen_height - player_sprite.height() - settings.player_ship_offset,
        );
        let player = PlayerShip::new(
            spawn,
            settings.init_health,
            player_sprite,
            LaserSpec::player_arsenal(&sheet),
        );

        let mut state = Self {
            level: settings.start_level,
            lives: settings.start_lives,
            enemy_count: settings.init_enemy_count,
            enemy_velocity: settings.init_enemy_velocity,
            enemy_lasers_spec: LaserSpec::enemy_arsenal(&sheet).into(),
            settings,
            sheet,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            freeze_ticks: 0,
            paused: false,
            active: true,
            quit_requested: false,
            banner: None,
            time_ticks: 0,
            player,
            enemies: Vec::new(),
            player_lasers: Vec::new(),
            enemy_lasers: Vec::new(),
            events: Vec::new(),
        };

        state.spawn_wave();
        state
    }

    /// Sprites available to this session
    pub fn sheet(&self) -> &SpriteSheet {
        &self.sheet
    }

    pub fn screen(&self) -> Vec2 {
        Vec2::new(self.settings.screen_width, self.settings.screen_height)
    }

    pub fn phase(&self) -> GamePhase {
        if self.quit_requested {
            GamePhase::Quit
        } else if !self.active {
            GamePhase::Lost
        } else if self.paused {
            GamePhase::Paused
        } else if self.freeze_ticks > 0 {
            GamePhase::Frozen
        } else {
            GamePhase::Playing
        }
    }

    /// True once nothing more will happen in this session: quit, or lost and
    /// the loss banner has been acknowledged or has timed out.
    pub fn is_finished(&self) -> bool {
        self.quit_requested || (!self.active && !self.paused && self.freeze_ticks == 0)
    }

    /// Spawn `enemy_count` enemies above the visible area.
    ///
    /// Vertical offsets are spread over a band proportional to the wave size so
    /// larger waves trickle in over a longer time.
    pub fn spawn_wave(&mut self) {
        let count = self.enemy_count;
        for _ in 0..count {
            let variant = *EnemyVariant::ALL
                .choose(&mut self.rng)
                .unwrap_or(&EnemyVariant::Red);
            let sprite = self.sheet.get(variant.sprite_kind()).clone();

            let max_x = (self.settings.screen_width - sprite.width()).max(1.0) as u32;
            let x = self.rng.random_range(0..max_x) as f32;

            let band = (count as f32 * sprite.height() / self.settings.crowd_factor as f32) as u32;
            let lift = if band > 0 {
                self.rng.random_range(0..band) as f32
            } else {
                0.0
            };
            let y = -sprite.height() - lift;

            self.enemies.push(EnemyShip::new(
                Vec2::new(x, y),
                self.settings.init_health,
                variant,
                sprite,
                self.enemy_velocity,
                self.enemy_lasers_spec.clone(),
            ));
        }
        log::info!(
            "Level {}: spawned {} enemies at speed {}",
            self.level,
            count,
            self.enemy_velocity
        );
    }

    /// Show a banner and halt updates until resumed
    pub fn pause_with_message(&mut self) {
        self.paused = true;
        self.banner = Some(Banner::Paused);
        self.events.push(GameEvent::Paused);
        log::info!("Paused");
    }

    pub fn unpause(&mut self) {
        if self.paused {
            self.paused = false;
            self.events.push(GameEvent::Resumed);
            log::info!("Resumed");
        }
    }

    /// Show a banner for `ticks` frames
    pub fn freeze(&mut self, banner: Banner, ticks: u32) {
        self.banner = Some(banner);
        self.freeze_ticks = ticks;
    }
}
