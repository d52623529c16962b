// Keypad and arrow key helpers

use super::events::Key;

/// Map an arrow key onto the keypad digit in the same direction
pub fn arrow_to_num(key: Key) -> Option<Key> {
    match key {
        Key::Up => Some(Key::Keypad('8')),
        Key::Down => Some(Key::Keypad('2')),
        Key::Left => Some(Key::Keypad('4')),
        Key::Right => Some(Key::Keypad('6')),
        _ => None,
    }
}

/// Map a keypad key onto its main-block counterpart. Other keys pass through.
pub fn num_to_digit(key: Key) -> Key {
    match key {
        Key::Keypad(c) => Key::Char(c),
        Key::KeypadEnter => Key::Enter,
        other => other,
    }
}

/// Is `key` on the numeric keypad?
///
/// With `digits_only` only the ten digit keys count; otherwise the keypad
/// operators and decimal point count too. Keypad Enter never does.
pub fn is_num_key(key: Key, digits_only: bool) -> bool {
    match key {
        Key::Keypad(c) if c.is_ascii_digit() => true,
        Key::Keypad(c) => !digits_only && matches!(c, '.' | '/' | '*' | '-' | '+'),
        _ => false,
    }
}

pub fn is_arrow_key(key: Key) -> bool {
    matches!(key, Key::Up | Key::Down | Key::Left | Key::Right)
}
