//! Keyboard dispatch: which keys move the caret, and how.

use core_types::{Direction, Modifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    /// Anything navigation does not react to.
    Other,
}

impl Key {
    /// Parse a key name as hosts and test tables spell it.
    pub fn from_name(name: &str) -> Key {
        match name.to_ascii_lowercase().as_str() {
            "left" | "arrowleft" => Key::Left,
            "right" | "arrowright" => Key::Right,
            "up" | "arrowup" => Key::Up,
            "down" | "arrowdown" => Key::Down,
            "pageup" => Key::PageUp,
            "pagedown" => Key::PageDown,
            "home" => Key::Home,
            "end" => Key::End,
            _ => Key::Other,
        }
    }
}

/// A caret movement requested from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    /// Horizontal step, by word when [`Modifiers::word_wise`].
    Step(Direction),
    /// One line up or down.
    Climb(Direction),
    /// To the start or end of the editing host.
    Jump(Direction),
    /// To the start of the current line.
    Home,
    /// To the end of the current line.
    End,
}

/// The movement bound to `key` under `modifiers`, if any.
///
/// Meta turns the arrows into jumps (up, down) and line ends (left, right).
/// Shift never changes the movement, only whether it extends.
pub fn movement(key: Key, modifiers: Modifiers) -> Option<Movement> {
    if modifiers.meta {
        match key {
            Key::Up => return Some(Movement::Jump(Direction::Up)),
            Key::Down => return Some(Movement::Jump(Direction::Down)),
            Key::Left => return Some(Movement::Home),
            Key::Right => return Some(Movement::End),
            _ => {}
        }
    }
    match key {
        Key::Left => Some(Movement::Step(Direction::Left)),
        Key::Right => Some(Movement::Step(Direction::Right)),
        Key::Up => Some(Movement::Climb(Direction::Up)),
        Key::Down => Some(Movement::Climb(Direction::Down)),
        Key::PageUp => Some(Movement::Jump(Direction::Up)),
        Key::PageDown => Some(Movement::Jump(Direction::Down)),
        Key::Home => Some(Movement::Home),
        Key::End => Some(Movement::End),
        Key::Other => None,
    }
}
