//! Input events and the cross-thread event channel
//!
//! - [`events`]: the event values the GUI consumes
//! - [`keys`]: keypad/arrow helpers
//! - [`channel`]: the shared queue other threads post into, plus the
//!   termination handshake
//! - [`terminal`]: crossterm adapter that feeds the queue

pub mod channel;
pub mod events;
pub mod keys;
pub mod terminal;

pub use channel::{EventQueue, EventSender, TerminationSignal};
pub use events::{ControlEvent, InputEvent, Key, KeyInput, PointerButton};
