//! Input handling
//!
//! Raw key and click events arrive from the platform layer. Keys are mapped
//! to `Command`s here; what a command means depends on the active screen and
//! is decided by `Game`.

use serde::{Deserialize, Serialize};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Enter,
    Space,
    A,
    S,
    Up,
    Down,
    Left,
    Right,
    /// Any other key, by platform key code
    Other(u32),
}

/// What happened to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    Pressed,
    Released,
    /// Auto-repeat while held
    Repeated,
}

/// A key event from the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub action: KeyAction,
}

impl KeyEvent {
    pub const fn new(key: Key, action: KeyAction) -> Self {
        Self { key, action }
    }

    pub const fn pressed(key: Key) -> Self {
        Self::new(key, KeyAction::Pressed)
    }

    pub const fn released(key: Key) -> Self {
        Self::new(key, KeyAction::Released)
    }
}

/// A mouse click with the cursor position at the time of the click
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub button: u32,
    pub x: f64,
    pub y: f64,
}

/// Screen-independent action derived from a key event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Quit immediately
    Exit,
    /// Set the paddle's horizontal velocity
    SteerPaddle(f32),
    StopPaddle,
    FireLaser,
    /// Menu up, or next letter
    Up,
    /// Menu down, or previous letter
    Down,
    /// Previous initials cursor position
    Left,
    /// Next initials cursor position
    Right,
    Confirm,
}

/// Map a key event to a command, if the key does anything
pub fn map_key(event: KeyEvent) -> Option<Command> {
    use KeyAction::*;

    let command = match (event.key, event.action) {
        (Key::Escape, _) => Command::Exit,
        (Key::A, Pressed | Repeated) => Command::SteerPaddle(-1.0),
        (Key::S, Pressed | Repeated) => Command::SteerPaddle(1.0),
        (Key::A | Key::S, Released) => Command::StopPaddle,
        (Key::Space, Pressed) => Command::FireLaser,
        (Key::Up, Released) => Command::Up,
        (Key::Down, Released) => Command::Down,
        (Key::Left, Pressed) => Command::Left,
        (Key::Right, Pressed) => Command::Right,
        (Key::Enter, Released) => Command::Confirm,
        _ => return None,
    };
    Some(command)
}
