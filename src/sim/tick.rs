//! Fixed timestep simulation tick
//!
//! One call advances the session by one frame:
//! events -> freeze/pause gating -> shooting -> movement -> collisions ->
//! life accounting -> lose / level-up transitions.

use glam::Vec2;
use rand::Rng;

use super::collision::{collided, take_hits};
use super::entity::{Damageable, Mobile};
use super::projectile::advance_all;
use super::ship::MoveIntent;
use super::state::{Banner, GameEvent, GameState};

/// Pause-related commands, applied in the order they arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseCommand {
    /// Space / shoot button: leave pause if paused
    Resume,
    /// P / pause button
    Toggle,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Window closed / quit requested
    pub quit: bool,
    /// Any key or button went down this frame (skips an active freeze)
    pub cancel_freeze: bool,
    /// Resume / pause-toggle presses this frame, oldest first
    pub pause_commands: Vec<PauseCommand>,
    /// Held direction keys
    pub movement: MoveIntent,
    /// Analog stick, roughly [-1, 1] per axis
    pub axis: Vec2,
    /// Fire held
    pub shoot: bool,
}

impl TickInput {
    /// Input carrying a single pause command and nothing else
    pub fn with_pause(command: PauseCommand) -> Self {
        Self {
            pause_commands: vec![command],
            ..Default::default()
        }
    }

    pub fn resumes(&self) -> bool {
        self.pause_commands.contains(&PauseCommand::Resume)
    }

    pub fn toggles_pause(&self) -> bool {
        self.pause_commands.contains(&PauseCommand::Toggle)
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    handle_events(state, input);

    if !state.active {
        // Lost (or quit): only the loss banner countdown keeps running
        if state.freeze_ticks > 0 {
            state.freeze_ticks -= 1;
        }
        return;
    }

    if state.freeze_ticks > 0 {
        state.freeze_ticks -= 1;
        return;
    }
    if state.paused {
        return;
    }

    state.banner = None;
    state.time_ticks += 1;

    shoot_player(state, input);
    shoot_enemies(state);
    move_player(state, input);
    move_enemies(state);
    settle_player_health(state);
    advance_all(&mut state.player_lasers, state.settings.screen_height);
    advance_all(&mut state.enemy_lasers, state.settings.screen_height);

    check_lost(state);
    check_level_up(state);
}

/// Discrete inputs; processed even while frozen or paused
fn handle_events(state: &mut GameState, input: &TickInput) {
    if input.quit {
        state.unpause();
        state.active = false;
        state.quit_requested = true;
        state.freeze_ticks = 0;
        state.events.push(GameEvent::Quit);
        log::info!("Quit requested");
        return;
    }

    if input.cancel_freeze {
        state.freeze_ticks = 0;
    }

    for command in &input.pause_commands {
        match command {
            PauseCommand::Resume => state.unpause(),
            PauseCommand::Toggle => {
                if state.paused {
                    state.unpause();
                } else if state.active {
                    state.pause_with_message();
                }
            }
        }
    }
}

fn shoot_player(state: &mut GameState, input: &TickInput) {
    if !input.shoot {
        return;
    }
    let cooldown = state.settings.player_cooldown_ticks();
    let velocity = state.settings.player_laser_velocity;
    if let Some(laser) = state.player.try_shoot(state.time_ticks, cooldown, velocity) {
        log::debug!("Player fired at tick {}", state.time_ticks);
        state.player_lasers.push(laser);
        state.events.push(GameEvent::PlayerFired);
    }
}

/// Each enemy draws a lottery ticket every frame; winners fire if off cooldown
fn shoot_enemies(state: &mut GameState) {
    let range = state.settings.enemy_shoot_range();
    let cooldown = state.settings.enemy_cooldown_ticks();
    let velocity = state.settings.enemy_laser_velocity;
    let now = state.time_ticks;

    for enemy in &mut state.enemies {
        if state.rng.random_range(0..range) != 0 {
            continue;
        }
        if let Some(laser) = enemy.try_shoot(now, cooldown, velocity, &mut state.rng) {
            log::debug!("Enemy fired {} damage laser at tick {}", laser.damage, now);
            state.enemy_lasers.push(laser);
            state.events.push(GameEvent::EnemyFired);
        }
    }
}

/// Keyboard then controller movement, then enemy lasers against the new position
fn move_player(state: &mut GameState, input: &TickInput) {
    let screen = state.screen();
    let velocity = state.settings.ship_velocity;

    state.player.apply_intent(input.movement, velocity, screen);
    state.player.apply_axis(
        input.axis,
        velocity,
        state.settings.controller_speed_factor,
        state.settings.controller_deadzone,
        screen,
    );

    let damage = take_hits(&mut state.enemy_lasers, &state.player);
    state.player.take_damage(damage);
}

/// Move every enemy, then resolve escapes, laser hits and rams.
///
/// Each enemy is removed at most once even if several rules would remove it.
fn move_enemies(state: &mut GameState) {
    let screen_height = state.settings.screen_height;
    let ram_damage = state.settings.ships_collision_damage;
    let player = &mut state.player;
    let player_lasers = &mut state.player_lasers;
    let mut escaped = 0u32;
    let mut destroyed = 0u32;
    let mut rammed = 0u32;

    state.enemies.retain_mut(|enemy| {
        enemy.advance();

        if enemy.pos.y > screen_height {
            escaped += 1;
            return false;
        }

        let damage = take_hits(player_lasers, &*enemy);
        enemy.take_damage(damage);
        if enemy.is_destroyed() {
            destroyed += 1;
            return false;
        }

        if collided(&*enemy, &*player) {
            player.take_damage(ram_damage);
            rammed += 1;
            return false;
        }

        true
    });

    for _ in 0..destroyed {
        state.events.push(GameEvent::EnemyDestroyed);
    }
    for _ in 0..rammed {
        state.events.push(GameEvent::EnemyRammed);
    }
    for _ in 0..escaped {
        state.lives = state.lives.saturating_sub(1);
        state.events.push(GameEvent::EnemyEscaped);
        state.events.push(GameEvent::LifeLost {
            lives_left: state.lives,
        });
        log::info!("Enemy escaped, {} lives left", state.lives);
    }
}

/// Resolve the player's health once per frame.
///
/// However many hits landed this frame, exhausting health costs one life
/// and restores full health.
fn settle_player_health(state: &mut GameState) {
    if !state.player.is_destroyed() {
        return;
    }
    state.player.hull.replenish();
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost {
        lives_left: state.lives,
    });
    log::info!("Player destroyed, {} lives left", state.lives);
}

fn check_lost(state: &mut GameState) {
    if state.lives > 0 {
        return;
    }
    state.active = false;
    let wait = state.settings.lost_freeze_ticks();
    if wait == 0 {
        // Hold the banner until the player resumes
        state.paused = true;
        state.banner = Some(Banner::Lost);
    } else {
        state.freeze(Banner::Lost, wait);
    }
    state.events.push(GameEvent::Lost);
    log::info!("Lost at level {} (seed {})", state.level, state.seed);
}

/// Next wave once the current one is gone, unless the session was just lost
fn check_level_up(state: &mut GameState) {
    if !state.active || !state.enemies.is_empty() {
        return;
    }
    level_up(state);
}

pub fn level_up(state: &mut GameState) {
    state.enemy_count += state.settings.enemy_count_increment;
    state.enemy_velocity += state.settings.enemy_velocity_increment;
    state.level += 1;
    state.player_lasers.clear();
    state.enemy_lasers.clear();

    let freeze = state.settings.level_up_freeze_ticks();
    state.freeze(Banner::LevelUp, freeze);
    state.events.push(GameEvent::LevelUp { level: state.level });
    log::info!("Level up! Now level {}", state.level);

    // Spawned now, but nothing moves until the freeze ends
    state.spawn_wave();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{ProceduralAssets, SpriteSheet};
    use crate::settings::Settings;
    use crate::sim::projectile::{LaserSpec, Projectile};
    use crate::sim::state::GamePhase;
    use std::sync::Arc;

    fn new_state(seed: u64) -> GameState {
        let settings = Settings::default();
        let sheet = SpriteSheet::load(&ProceduralAssets::new(
            settings.screen_width,
            settings.screen_height,
        ))
        .unwrap();
        GameState::new(settings, Arc::new(sheet), seed)
    }

    #[test]
    fn test_tick_advances_time_and_enemies() {
        let mut state = new_state(12345);
        let before: Vec<f32> = state.enemies.iter().map(|e| e.pos.y).collect();

        tick(&mut state, &TickInput::default());

        assert_eq!(state.time_ticks, 1);
        for (enemy, y) in state.enemies.iter().zip(before) {
            assert_eq!(enemy.pos.y, y + 1.0);
        }
    }

    #[test]
    fn test_tick_pause() {
        let mut state = new_state(12345);
        let toggle = TickInput::with_pause(PauseCommand::Toggle);

        tick(&mut state, &toggle);
        assert_eq!(state.phase(), GamePhase::Paused);
        assert_eq!(state.banner, Some(Banner::Paused));
        let frozen_ticks = state.time_ticks;

        // Paused: nothing advances
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.time_ticks, frozen_ticks);

        // Unpause
        tick(&mut state, &toggle);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.time_ticks, frozen_ticks + 1);
        assert_eq!(state.banner, None);
    }

    #[test]
    fn test_resume_only_unpauses() {
        let mut state = new_state(1);
        let resume = TickInput::with_pause(PauseCommand::Resume);
        tick(&mut state, &resume);
        assert_eq!(state.phase(), GamePhase::Playing);

        state.pause_with_message();
        tick(&mut state, &resume);
        assert_eq!(state.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_pause_commands_apply_in_order() {
        let mut state = new_state(1);
        state.pause_with_message();

        // Resume then pause again: still paused
        let input = TickInput {
            pause_commands: vec![PauseCommand::Resume, PauseCommand::Toggle],
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase(), GamePhase::Paused);
        assert_eq!(state.time_ticks, 0);

        // Toggle out, then a resume that has nothing left to do
        let input = TickInput {
            pause_commands: vec![PauseCommand::Toggle, PauseCommand::Resume],
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_quit_ends_session() {
        let mut state = new_state(1);
        state.pause_with_message();
        tick(
            &mut state,
            &TickInput {
                quit: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase(), GamePhase::Quit);
        assert!(!state.paused);
        assert!(state.is_finished());
    }

    #[test]
    fn test_freeze_counts_down_and_can_be_cancelled() {
        let mut state = new_state(1);
        state.freeze(Banner::LevelUp, 3);

        tick(&mut state, &TickInput::default());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.freeze_ticks, 1);
        assert_eq!(state.time_ticks, 0);

        let key = TickInput {
            cancel_freeze: true,
            ..Default::default()
        };
        tick(&mut state, &key);
        assert_eq!(state.freeze_ticks, 0);
        // The cancelling frame is already an active one
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_shoot_respects_cooldown() {
        let mut state = new_state(1);
        state.enemies.clear();
        let shoot = TickInput {
            shoot: true,
            ..Default::default()
        };
        let mut fired_at = Vec::new();
        for _ in 0..500 {
            // One parked enemy keeps the wave from clearing
            if state.enemies.is_empty() {
                state.enemy_count = 1;
                state.spawn_wave();
                state.enemies[0].pos.y = -10_000.0;
                state.enemies[0].velocity = 0.0;
            }
            tick(&mut state, &shoot);
            if state.events.contains(&GameEvent::PlayerFired) {
                fired_at.push(state.time_ticks);
            }
        }
        assert_eq!(fired_at, vec![1, 241, 481]);
    }

    #[test]
    fn test_enemy_fire_needs_lottery_and_cooldown() {
        let mut state = new_state(77);
        state.enemies.truncate(1);
        // On screen but well clear of the player's column
        state.enemies[0].pos = Vec2::new(0.0, 100.0);
        state.enemies[0].velocity = 0.0;
        let cooldown = state.settings.enemy_cooldown_ticks();

        let mut fired_at = Vec::new();
        for _ in 0..30_000 {
            tick(&mut state, &TickInput::default());
            if state.events.contains(&GameEvent::EnemyFired) {
                fired_at.push(state.time_ticks);
            }
        }

        let gaps: Vec<u64> = fired_at.windows(2).map(|w| w[1] - w[0]).collect();
        assert!(gaps.len() > 10, "only {} shots", fired_at.len());
        assert!(gaps.iter().all(|&gap| gap >= cooldown));
        // Cooldown plus about one lottery period (300 frames) on average
        let mean = gaps.iter().sum::<u64>() as f64 / gaps.len() as f64;
        assert!(mean > cooldown as f64 + 150.0, "mean gap {mean}");
        assert_eq!(state.player.hull.health, 100);
    }

    #[test]
    fn test_enemy_lasers_checked_at_final_position() {
        let mut state = new_state(1);
        state.enemies.truncate(1);
        state.enemies[0].pos = Vec2::new(0.0, -10_000.0);
        state.enemies[0].velocity = 0.0;

        // Laser's bottom row just above the ship's nose
        let spec = LaserSpec::enemy_arsenal(state.sheet()).remove(0);
        let start = state.player.pos;
        state
            .enemy_lasers
            .push(Projectile::new(&spec, start + Vec2::new(25.0, -39.0), 0.0));

        // Keyboard up 5 would touch it; the stick then moves down 6
        let input = TickInput {
            movement: MoveIntent {
                up: true,
                ..Default::default()
            },
            axis: Vec2::new(0.0, 1.0),
            ..Default::default()
        };
        tick(&mut state, &input);

        assert_eq!(state.player.pos, start + Vec2::new(0.0, 1.0));
        assert_eq!(state.player.hull.health, 100);
        assert_eq!(state.enemy_lasers.len(), 1);
    }

    #[test]
    fn test_escaped_enemy_costs_a_life() {
        let mut state = new_state(1);
        state.enemies.truncate(2);
        state.enemies[0].pos = Vec2::new(0.0, 750.0);
        state.enemies[1].pos = Vec2::new(0.0, -5000.0);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, 4);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.player.hull.health, 100);
        assert!(state.events.contains(&GameEvent::EnemyEscaped));
    }

    #[test]
    fn test_ram_damages_player_and_destroys_enemy() {
        let mut state = new_state(1);
        state.enemies.truncate(2);
        let player_pos = state.player.pos;
        state.enemies[0].pos = player_pos + Vec2::new(25.0, 20.0);
        state.enemies[0].velocity = 0.0;
        // Just fired, so it can't add laser damage this frame
        state.enemies[0].hull.last_shot_tick = Some(0);
        state.enemies[1].pos = Vec2::new(0.0, -5000.0);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.player.hull.health, 50);
        assert_eq!(state.lives, 5);
        assert_eq!(state.enemies.len(), 1);
        assert!(state.events.contains(&GameEvent::EnemyRammed));
    }

    #[test]
    fn test_lost_stops_updates() {
        let mut state = new_state(1);
        state.lives = 1;
        state.enemies.truncate(1);
        state.enemies[0].pos = Vec2::new(0.0, 750.0);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase(), GamePhase::Lost);
        assert_eq!(state.banner, Some(Banner::Lost));
        assert!(state.paused);
        // No level-up even though the wave is empty
        assert_eq!(state.level, 1);
        assert!(state.enemies.is_empty());

        let ticks = state.time_ticks;
        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.time_ticks, ticks);
        assert!(!state.is_finished());

        // Acknowledge the loss
        tick(&mut state, &TickInput::with_pause(PauseCommand::Resume));
        assert!(state.is_finished());
    }

    #[test]
    fn test_lost_with_wait_times_out() {
        let settings = Settings {
            lost_wait_secs: 0.05,
            ..Default::default()
        };
        let sheet = SpriteSheet::load(&ProceduralAssets::new(750.0, 750.0)).unwrap();
        let mut state = GameState::new(settings, Arc::new(sheet), 1);
        state.lives = 1;
        state.enemies.truncate(1);
        state.enemies[0].pos = Vec2::new(0.0, 750.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase(), GamePhase::Lost);
        assert_eq!(state.freeze_ticks, 3);
        assert!(!state.is_finished());

        for _ in 0..3 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.is_finished());
    }

    #[test]
    fn test_determinism() {
        let mut state1 = new_state(99999);
        let mut state2 = new_state(99999);

        let inputs = [
            TickInput {
                shoot: true,
                ..Default::default()
            },
            TickInput {
                axis: Vec2::new(0.8, 0.0),
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..200 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.enemy_lasers.len(), state2.enemy_lasers.len());
        assert_eq!(state1.player.pos, state2.player.pos);
    }
}
