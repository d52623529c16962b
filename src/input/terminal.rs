//! crossterm input adapter
//!
//! Translates terminal events into [`InputEvent`]s and pushes them into the
//! event channel. A printable key press produces both a key event and a text
//! event, the same pair a windowing system would deliver.

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;
use std::io;
use std::time::{Duration, Instant};

use super::channel::EventSender;
use super::events::{InputEvent, Key, KeyInput, PointerButton};

/// Reads crossterm events and forwards them to an [`EventSender`]
#[derive(Debug)]
pub struct TerminalSource {
    origin: Instant,
}

impl TerminalSource {
    pub fn new() -> Self {
        TerminalSource {
            origin: Instant::now(),
        }
    }

    /// Wait up to `timeout` for terminal input, then forward everything that
    /// is ready. Returns the number of events pushed.
    pub fn pump(&mut self, sender: &EventSender, timeout: Duration) -> io::Result<usize> {
        let mut pushed = 0;
        let mut wait = timeout;
        while event::poll(wait)? {
            let raw = event::read()?;
            let timestamp_ms = self.origin.elapsed().as_millis() as u64;
            for ev in translate(raw, timestamp_ms) {
                sender.push(ev);
                pushed += 1;
            }
            wait = Duration::ZERO;
        }
        Ok(pushed)
    }
}

impl Default for TerminalSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert one crossterm event into zero or more input events
pub fn translate(raw: Event, timestamp_ms: u64) -> Vec<InputEvent> {
    match raw {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse, timestamp_ms).into_iter().collect(),
        Event::Paste(text) => vec![InputEvent::Text(text)],
        _ => Vec::new(),
    }
}

fn translate_key(key: KeyEvent) -> Vec<InputEvent> {
    let pressed = match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => true,
        KeyEventKind::Release => false,
    };
    let keypad = key.state.contains(KeyEventState::KEYPAD);

    let mapped = match key.code {
        KeyCode::Char(c) if keypad => Key::Keypad(c),
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter if keypad => Key::KeypadEnter,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Insert => Key::Insert,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::F(n) => Key::F(n),
        _ => return Vec::new(),
    };

    let mut out = vec![InputEvent::Key(KeyInput {
        key: mapped,
        pressed,
        modifiers: key.modifiers,
    })];

    let plain = !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    if let KeyCode::Char(c) = key.code {
        if pressed && plain {
            out.push(InputEvent::Text(c.to_string()));
        }
    }
    out
}

fn translate_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Left,
        MouseButton::Right => PointerButton::Right,
        MouseButton::Middle => PointerButton::Middle,
    }
}

fn translate_mouse(mouse: MouseEvent, timestamp_ms: u64) -> Option<InputEvent> {
    let position = Position::new(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(button) => Some(InputEvent::PointerButton {
            button: translate_button(button),
            pressed: true,
            position,
            timestamp_ms,
        }),
        MouseEventKind::Up(button) => Some(InputEvent::PointerButton {
            button: translate_button(button),
            pressed: false,
            position,
            timestamp_ms,
        }),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            Some(InputEvent::PointerMotion { position })
        }
        MouseEventKind::ScrollUp => Some(InputEvent::Wheel { delta: 1, position }),
        MouseEventKind::ScrollDown => Some(InputEvent::Wheel {
            delta: -1,
            position,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_key_also_produces_text() {
        let raw = Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));
        let events = translate(raw, 0);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], InputEvent::Key(k) if k.key == Key::Char('a') && k.pressed));
        assert_eq!(events[1], InputEvent::Text("a".to_string()));
    }

    #[test]
    fn test_control_chord_has_no_text() {
        let raw = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        let events = translate(raw, 0);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_keypad_state_is_kept() {
        let mut key = KeyEvent::new(KeyCode::Char('8'), KeyModifiers::NONE);
        key.state = KeyEventState::KEYPAD;
        let events = translate(Event::Key(key), 0);
        assert!(matches!(events[0], InputEvent::Key(k) if k.key == Key::Keypad('8')));
    }

    #[test]
    fn test_mouse_translation() {
        let raw = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 7,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            translate(raw, 42),
            vec![InputEvent::press(PointerButton::Left, 4, 7, 42)]
        );

        let drag = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: 5,
            row: 7,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(translate(drag, 43), vec![InputEvent::motion(5, 7)]);
    }
}
