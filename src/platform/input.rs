//! Keyboard and gamepad input
//!
//! Devices are polled once per frame. Discrete presses (key-down events and
//! gamepad button edges) drive pause/resume/freeze-skip; held state drives
//! movement and firing.

use std::collections::{HashSet, VecDeque};

use glam::Vec2;

use super::InputSource;
use crate::sim::{GameState, MoveIntent, PauseCommand, TickInput};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    Space,
    P,
    /// Any other key; still skips a freeze
    Other,
}

/// Discrete device event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
}

/// Raw gamepad queries
pub trait Gamepad {
    fn button(&self, index: usize) -> bool;
    /// Axis value, roughly [-1, 1]
    fn axis(&self, index: usize) -> f32;
}

/// Keyboard (plus optional gamepad) device
pub trait InputDevice {
    /// Drain events since the last poll
    fn poll_events(&mut self) -> Vec<InputEvent>;
    fn is_key_down(&self, key: Key) -> bool;
    /// Connected gamepad, if any
    fn gamepad(&self) -> Option<&dyn Gamepad> {
        None
    }
}

/// Number of buttons read from an Xbox-style pad
pub const GAMEPAD_BUTTONS: usize = 11;
/// Button 0 toggles pause; every other button fires
pub const PAUSE_BUTTON: usize = 0;

/// Snapshot of a gamepad for one frame.
///
/// The default value stands in for a disconnected pad: no buttons, centred stick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GamepadState {
    pub buttons: [bool; GAMEPAD_BUTTONS],
    pub axes: Vec2,
}

impl GamepadState {
    pub fn capture(pad: Option<&dyn Gamepad>) -> Self {
        let Some(pad) = pad else {
            return Self::default();
        };
        let mut buttons = [false; GAMEPAD_BUTTONS];
        for (i, pressed) in buttons.iter_mut().enumerate() {
            *pressed = pad.button(i);
        }
        Self {
            buttons,
            axes: Vec2::new(pad.axis(0), pad.axis(1)),
        }
    }

    pub fn any_button_pressed(&self) -> bool {
        self.buttons.iter().any(|&b| b)
    }

    pub fn shoot_pressed(&self) -> bool {
        self.buttons
            .iter()
            .enumerate()
            .any(|(i, &b)| i != PAUSE_BUTTON && b)
    }

    pub fn pause_pressed(&self) -> bool {
        self.buttons[PAUSE_BUTTON]
    }

    pub fn x_value(&self) -> f32 {
        self.axes.x
    }

    pub fn y_value(&self) -> f32 {
        self.axes.y
    }

    /// Buttons down now that were up in `previous`
    fn newly_pressed(&self, previous: &GamepadState) -> GamepadState {
        let mut buttons = [false; GAMEPAD_BUTTONS];
        for (i, b) in buttons.iter_mut().enumerate() {
            *b = self.buttons[i] && !previous.buttons[i];
        }
        GamepadState {
            buttons,
            axes: self.axes,
        }
    }
}

/// Folds keyboard and gamepad state into one [`TickInput`] per frame
#[derive(Debug, Clone, Default)]
pub struct InputController {
    previous_pad: GamepadState,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poll(&mut self, device: &mut dyn InputDevice) -> TickInput {
        let mut input = TickInput::default();

        for event in device.poll_events() {
            match event {
                InputEvent::Quit => input.quit = true,
                InputEvent::KeyDown(key) => {
                    input.cancel_freeze = true;
                    match key {
                        Key::Space => input.pause_commands.push(PauseCommand::Resume),
                        Key::P => input.pause_commands.push(PauseCommand::Toggle),
                        _ => {}
                    }
                }
            }
        }

        let pad = GamepadState::capture(device.gamepad());
        let pressed = pad.newly_pressed(&self.previous_pad);
        self.previous_pad = pad;

        if pressed.any_button_pressed() {
            input.cancel_freeze = true;
            if pressed.shoot_pressed() {
                input.pause_commands.push(PauseCommand::Resume);
            } else if pressed.pause_pressed() {
                input.pause_commands.push(PauseCommand::Toggle);
            }
        }

        let held = |keys: [Key; 2]| keys.iter().any(|&k| device.is_key_down(k));
        input.movement = MoveIntent {
            up: held([Key::W, Key::Up]),
            down: held([Key::S, Key::Down]),
            left: held([Key::A, Key::Left]),
            right: held([Key::D, Key::Right]),
        };
        input.axis = Vec2::new(pad.x_value(), pad.y_value());
        input.shoot = device.is_key_down(Key::Space) || pad.shoot_pressed();

        input
    }
}

/// A device plus its controller, usable as an [`InputSource`]
pub struct DeviceInput<D: InputDevice> {
    pub device: D,
    controller: InputController,
}

impl<D: InputDevice> DeviceInput<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            controller: InputController::new(),
        }
    }
}

impl<D: InputDevice> InputSource for DeviceInput<D> {
    fn next_input(&mut self, _state: &GameState) -> TickInput {
        self.controller.poll(&mut self.device)
    }
}

/// In-memory gamepad
#[derive(Debug, Clone, Default)]
pub struct VirtualGamepad {
    pub buttons: [bool; GAMEPAD_BUTTONS],
    pub axes: [f32; 2],
}

impl Gamepad for VirtualGamepad {
    fn button(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }

    fn axis(&self, index: usize) -> f32 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }
}

/// In-memory device: queued events and a set of held keys
#[derive(Debug, Clone, Default)]
pub struct VirtualDevice {
    pub events: VecDeque<InputEvent>,
    pub held: HashSet<Key>,
    pub pad: Option<VirtualGamepad>,
}

impl VirtualDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a key press and mark the key held
    pub fn press(&mut self, key: Key) {
        self.events.push_back(InputEvent::KeyDown(key));
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn quit(&mut self) {
        self.events.push_back(InputEvent::Quit);
    }
}

impl InputDevice for VirtualDevice {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.events.drain(..).collect()
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn gamepad(&self) -> Option<&dyn Gamepad> {
        self.pad.as_ref().map(|p| p as &dyn Gamepad)
    }
}
