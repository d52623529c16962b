//! Input event values
//!
//! These are the events the GUI core consumes. They are produced by an
//! external source (see [`super::terminal`] for the crossterm adapter) and
//! by other threads posting [`ControlEvent`]s through an
//! [`EventSender`](super::channel::EventSender).

use crossterm::event::KeyModifiers;
use ratatui::layout::Position;

/// Pointer button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

impl PointerButton {
    pub(crate) fn index(self) -> usize {
        match self {
            PointerButton::Left => 0,
            PointerButton::Right => 1,
            PointerButton::Middle => 2,
        }
    }
}

/// A key on the keyboard
///
/// Keypad keys are kept apart from their main-block twins so screens can
/// treat the numeric keypad as a direction pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    /// Keypad key: `'0'..='9'`, `'.'`, `'/'`, `'*'`, `'-'`, `'+'`
    Keypad(char),
    KeypadEnter,
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    F(u8),
}

/// A key press or release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub pressed: bool,
    pub modifiers: KeyModifiers,
}

impl KeyInput {
    pub fn press(key: Key) -> Self {
        KeyInput {
            key,
            pressed: true,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn release(key: Key) -> Self {
        KeyInput {
            key,
            pressed: false,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Application-level lifecycle requests
///
/// Delivered through the same channel as ordinary input so that producers on
/// other threads never touch GUI state directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEvent {
    ReturnToMainMenu,
    ReturnToMenuAfterLoad,
    RestartGame,
    ToggleFullscreen,
    StartCampaignScenario,
    /// Quit without asking
    ForcedQuit,
    InterfaceChanged,
}

/// One event pulled from the event channel
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerButton {
        button: PointerButton,
        pressed: bool,
        position: Position,
        /// Milliseconds on the producer's clock
        timestamp_ms: u64,
    },
    PointerMotion {
        position: Position,
    },
    Key(KeyInput),
    Text(String),
    Wheel {
        /// Negative scrolls down
        delta: i16,
        position: Position,
    },
    Timer {
        elapsed_ms: u64,
    },
    Control(ControlEvent),
}

impl InputEvent {
    pub fn press(button: PointerButton, x: u16, y: u16, timestamp_ms: u64) -> Self {
        InputEvent::PointerButton {
            button,
            pressed: true,
            position: Position::new(x, y),
            timestamp_ms,
        }
    }

    pub fn release(button: PointerButton, x: u16, y: u16, timestamp_ms: u64) -> Self {
        InputEvent::PointerButton {
            button,
            pressed: false,
            position: Position::new(x, y),
            timestamp_ms,
        }
    }

    pub fn motion(x: u16, y: u16) -> Self {
        InputEvent::PointerMotion {
            position: Position::new(x, y),
        }
    }

    pub fn is_motion(&self) -> bool {
        matches!(self, InputEvent::PointerMotion { .. })
    }
}
