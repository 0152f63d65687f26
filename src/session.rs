//! Outer game loop
//!
//! Runs sessions back to back: a lost session is torn down and replaced by a
//! fresh one, and only an explicit quit (or the frame budget) stops the loop.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::assets::SpriteSheet;
use crate::platform::InputSource;
use crate::renderer::{RenderSurface, draw_frame};
use crate::settings::Settings;
use crate::sim::{GameState, tick};

/// Totals for a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sessions: u32,
    pub frames: u64,
    pub best_level: u32,
    pub quit: bool,
}

/// Drives sessions at a fixed tick rate
pub struct Runner {
    settings: Settings,
    sheet: Arc<SpriteSheet>,
    seed: u64,
    /// Sleep to hold the tick rate; off for headless runs
    pub realtime: bool,
    /// Stop after this many frames in total
    pub max_frames: Option<u64>,
}

impl Runner {
    pub fn new(settings: Settings, sheet: Arc<SpriteSheet>, seed: u64) -> Self {
        Self {
            settings,
            sheet,
            seed,
            realtime: false,
            max_frames: None,
        }
    }

    /// Seed for the n-th session; successive sessions differ but stay reproducible
    fn session_seed(&self, session: u32) -> u64 {
        self.seed.wrapping_add((session as u64).wrapping_mul(2654435761))
    }

    fn budget_spent(&self, frames: u64) -> bool {
        self.max_frames.is_some_and(|max| frames >= max)
    }

    pub fn run<S, I>(&self, surface: &mut S, input: &mut I) -> RunSummary
    where
        S: RenderSurface + ?Sized,
        I: InputSource + ?Sized,
    {
        let frame_time = self.settings.frame_duration();
        let mut summary = RunSummary::default();

        'sessions: loop {
            let seed = self.session_seed(summary.sessions);
            let mut state = GameState::new(self.settings.clone(), self.sheet.clone(), seed);
            summary.sessions += 1;
            log::info!("Session {} started (seed {})", summary.sessions, seed);

            loop {
                if self.budget_spent(summary.frames) {
                    summary.best_level = summary.best_level.max(state.level);
                    break 'sessions;
                }
                let started = Instant::now();

                let frame_input = input.next_input(&state);
                tick(&mut state, &frame_input);
                draw_frame(surface, &state);
                summary.frames += 1;

                if state.quit_requested {
                    summary.quit = true;
                    summary.best_level = summary.best_level.max(state.level);
                    break 'sessions;
                }
                if state.is_finished() {
                    break;
                }

                if self.realtime {
                    pace(started, frame_time);
                }
            }

            summary.best_level = summary.best_level.max(state.level);
            log::info!(
                "Session {} (seed {}) over at level {} after {} frames",
                summary.sessions,
                state.seed,
                state.level,
                state.time_ticks
            );
        }

        summary
    }
}

/// Sleep out the rest of the frame
fn pace(started: Instant, frame_time: Duration) {
    let elapsed = started.elapsed();
    if elapsed < frame_time {
        std::thread::sleep(frame_time - elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ProceduralAssets;
    use crate::platform::{Autopilot, DeviceInput, Key, VirtualDevice};
    use crate::renderer::RecordingSurface;

    fn runner() -> Runner {
        let settings = Settings::default();
        let sheet =
            SpriteSheet::load(&ProceduralAssets::new(settings.screen_width, settings.screen_height))
                .unwrap();
        Runner::new(settings, Arc::new(sheet), 7)
    }

    #[test]
    fn test_quit_stops_the_loop() {
        let runner = runner();
        let mut device = VirtualDevice::new();
        device.quit();
        let mut input = DeviceInput::new(device);
        let mut surface = RecordingSurface::new();

        let summary = runner.run(&mut surface, &mut input);
        assert!(summary.quit);
        assert_eq!(summary.sessions, 1);
        assert_eq!(summary.frames, 1);
        assert_eq!(surface.frames_presented, 1);
    }

    #[test]
    fn test_frame_budget() {
        let mut runner = runner();
        runner.max_frames = Some(30);
        let mut device = VirtualDevice::new();
        device.held.insert(Key::Left);
        let mut input = DeviceInput::new(device);
        let mut surface = RecordingSurface::new();

        let summary = runner.run(&mut surface, &mut input);
        assert!(!summary.quit);
        assert_eq!(summary.frames, 30);
        assert_eq!(summary.sessions, 1);
    }

    #[test]
    fn test_sessions_restart_after_loss() {
        let settings = Settings {
            start_lives: 1,
            init_enemy_velocity: 40.0,
            ..Default::default()
        };
        let sheet = SpriteSheet::load(&ProceduralAssets::new(750.0, 750.0)).unwrap();
        let mut runner = Runner::new(settings, Arc::new(sheet), 3);
        runner.max_frames = Some(600);
        let mut surface = RecordingSurface::new();
        let mut pilot = Autopilot::new(5);

        let summary = runner.run(&mut surface, &mut pilot);
        assert!(summary.sessions > 1);
        assert_eq!(summary.frames, 600);
    }
}
