//! Autopilot input for headless/demo runs
//!
//! Tracks the enemy closest to the bottom of the screen, keeps the fire button
//! held, and acknowledges the loss banner after a short linger.

use super::InputSource;
use crate::sim::{Drawable, GamePhase, GameState, MoveIntent, PauseCommand, TickInput};

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Frames to keep the loss banner up before resuming
    pub linger_ticks: u32,
    waited: u32,
}

impl Autopilot {
    pub fn new(linger_ticks: u32) -> Self {
        Self {
            linger_ticks,
            waited: 0,
        }
    }
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(60)
    }
}

impl InputSource for Autopilot {
    fn next_input(&mut self, state: &GameState) -> TickInput {
        match state.phase() {
            GamePhase::Lost | GamePhase::Paused => {
                self.waited += 1;
                if self.waited >= self.linger_ticks {
                    self.waited = 0;
                    return TickInput {
                        pause_commands: vec![PauseCommand::Resume],
                        cancel_freeze: true,
                        ..Default::default()
                    };
                }
                return TickInput::default();
            }
            GamePhase::Quit => return TickInput::default(),
            GamePhase::Playing | GamePhase::Frozen => {}
        }
        self.waited = 0;

        let player = &state.player;
        let player_centre = player.pos.x + player.width() / 2.0;
        let target = state
            .enemies
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|e| e.pos.x + e.width() / 2.0);

        let mut movement = MoveIntent::default();
        if let Some(target_x) = target {
            let dx = target_x - player_centre;
            let step = state.settings.ship_velocity;
            movement.right = dx > step;
            movement.left = dx < -step;
        }

        TickInput {
            movement,
            shoot: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{ProceduralAssets, SpriteSheet};
    use crate::settings::Settings;
    use glam::Vec2;
    use std::sync::Arc;

    fn new_state() -> GameState {
        let sheet = SpriteSheet::load(&ProceduralAssets::new(750.0, 750.0)).unwrap();
        GameState::new(Settings::default(), Arc::new(sheet), 5)
    }

    #[test]
    fn test_tracks_lowest_enemy() {
        let mut state = new_state();
        state.enemies.truncate(2);
        state.enemies[0].pos = Vec2::new(600.0, -100.0);
        state.enemies[1].pos = Vec2::new(0.0, -300.0);

        let input = Autopilot::default().next_input(&state);
        assert!(input.movement.right);
        assert!(!input.movement.left);
        assert!(input.shoot);
    }

    #[test]
    fn test_acknowledges_loss_after_linger() {
        let mut state = new_state();
        state.active = false;
        state.paused = true;
        let mut pilot = Autopilot::new(3);

        assert!(!pilot.next_input(&state).resumes());
        assert!(!pilot.next_input(&state).resumes());
        assert!(pilot.next_input(&state).resumes());
    }
}
