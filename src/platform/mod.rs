//! Platform abstraction layer
//!
//! Handles device differences for:
//! - Keyboard events and held-key queries
//! - Optional gamepad (buttons + analog stick)
//! - Scripted/autopilot input for headless runs

pub mod autopilot;
pub mod input;

pub use autopilot::Autopilot;
pub use input::{
    DeviceInput, Gamepad, GamepadState, InputController, InputDevice, InputEvent, Key,
    VirtualDevice, VirtualGamepad,
};

use crate::sim::{GameState, TickInput};

/// Produces the input for the next frame
pub trait InputSource {
    fn next_input(&mut self, state: &GameState) -> TickInput;
}
