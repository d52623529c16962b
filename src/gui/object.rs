//! UI objects
//!
//! Every object is a node in the [`Gui`](super::handler::Gui) arena. The node
//! holds the bookkeeping the core needs (geometry, tree links, listener
//! masks); the behaviour lives in a boxed [`Widget`].
//!
//! # Capability and action masks
//!
//! [`Capabilities`] names the event categories an object wants while it is
//! active. [`Actions`] controls which lifecycle steps a parent forwards to a
//! child: a child built with `Actions::SHOWALL` is drawn on full redraws, one
//! built with `Actions::DISPOSE` dies with its parent, and so on.

use bitflags::bitflags;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use std::fmt;

use super::handler::Gui;
use crate::input::events::{KeyInput, PointerButton};

/// Handle to an object in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags! {
    /// Event categories an object listens to while active
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u16 {
        const LCLICK = 1;
        const RCLICK = 1 << 1;
        const HOVER = 1 << 2;
        const MOVE = 1 << 3;
        const KEYBOARD = 1 << 4;
        const TIME = 1 << 5;
        const WHEEL = 1 << 6;
        const DOUBLECLICK = 1 << 7;
        const TEXTINPUT = 1 << 8;
        const MCLICK = 1 << 9;
    }
}

bitflags! {
    /// Lifecycle steps a parent forwards to its children
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Actions: u8 {
        const ACTIVATE = 1;
        const DEACTIVATE = 1 << 1;
        /// Partial redraws reach the child
        const UPDATE = 1 << 2;
        /// Full redraws reach the child
        const SHOWALL = 1 << 3;
        /// Destroyed together with the parent
        const DISPOSE = 1 << 4;
        /// Position is relative to the parent when attached
        const SHARE_POS = 1 << 5;
    }
}

impl Default for Actions {
    fn default() -> Self {
        Actions::all()
    }
}

/// Which side of a button transition a click handler is seeing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Click {
    pub button: PointerButton,
    pub pressed: bool,
    /// Button state before this event
    pub previous: bool,
    /// False for a release that happened outside the object
    pub inside: bool,
}

/// Behaviour of a UI object. Every hook defaults to doing nothing.
///
/// Hooks receive the [`Gui`] context and the object's own id, so a handler can
/// push or pop screens, dispose itself or stop propagation of the current
/// event. While a hook runs, the widget is checked out of the arena:
/// [`Gui::widget`] returns `None` for the running object.
#[allow(unused_variables)]
pub trait Widget {
    fn click(&mut self, gui: &mut Gui, this: ObjectId, click: Click) {}

    fn double_click(&mut self, gui: &mut Gui, this: ObjectId) {}

    fn hover(&mut self, gui: &mut Gui, this: ObjectId, on: bool) {}

    fn mouse_moved(&mut self, gui: &mut Gui, this: ObjectId, position: Position) {}

    fn wheel_scrolled(&mut self, gui: &mut Gui, this: ObjectId, down: bool, inside: bool) {}

    fn key_pressed(&mut self, gui: &mut Gui, this: ObjectId, key: &KeyInput) {}

    /// Claim a key for exclusive delivery. If any listener claims a key, only
    /// claiming listeners receive it.
    fn captures_key(&self, key: &KeyInput) -> bool {
        false
    }

    fn text_input(&mut self, gui: &mut Gui, this: ObjectId, text: &str) {}

    fn tick(&mut self, gui: &mut Gui, this: ObjectId, elapsed_ms: u64) {}

    /// Draw into `buf` inside `area`. `full` is set on total redraws.
    fn render(&mut self, buf: &mut Buffer, area: Rect, full: bool) {}

    fn on_activate(&mut self, gui: &Gui, this: ObjectId) {}

    fn on_deactivate(&mut self, gui: &Gui, this: ObjectId) {}
}

/// A widget with no behaviour, useful as a pure container
#[derive(Debug, Default)]
pub struct Container;

impl Widget for Container {}

/// Arena bookkeeping for one object
#[derive(Debug, Clone)]
pub struct ObjectNode {
    pub pos: Rect,
    pub parent: Option<ObjectId>,
    pub children: Vec<ObjectId>,
    /// Categories wanted while active
    pub used: Capabilities,
    /// Categories currently registered
    pub active: Capabilities,
    /// Actions applied to children built inside this object's scope
    pub def_actions: Actions,
    /// Actions this object accepts from its parent
    pub rec_actions: Actions,
    pub hovered: bool,
    /// Receive motion events even when the pointer is outside
    pub strong_interest: bool,
    /// Receive every key, regardless of other listeners' captures
    pub capture_all_keys: bool,
    pub(crate) mouse_state: [bool; 3],
    pub(crate) timer_delay: u64,
    pub(crate) to_next_tick: i64,
    pub(crate) activated: bool,
    pub(crate) disposed: bool,
}

impl ObjectNode {
    pub(crate) fn new(pos: Rect, used: Capabilities, actions: Actions) -> Self {
        ObjectNode {
            pos,
            parent: None,
            children: Vec::new(),
            used,
            active: Capabilities::empty(),
            def_actions: actions,
            rec_actions: actions,
            hovered: false,
            strong_interest: false,
            capture_all_keys: false,
            mouse_state: [false; 3],
            timer_delay: 0,
            to_next_tick: 0,
            activated: false,
            disposed: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.activated
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn mouse_state(&self, button: PointerButton) -> bool {
        self.mouse_state[button.index()]
    }

    /// Hit test with inclusive lower and exclusive upper bounds
    pub fn contains(&self, position: Position) -> bool {
        self.pos.contains(position)
    }

    /// Hit test that also accepts the right and bottom edges
    pub fn contains_or_lower_bounds(&self, position: Position) -> bool {
        position.x >= self.pos.x
            && position.y >= self.pos.y
            && position.x <= self.pos.right()
            && position.y <= self.pos.bottom()
    }
}
