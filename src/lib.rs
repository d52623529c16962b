//! # Introduction
//!
//! screenstack is the presentation-layer core of an interactive terminal
//! application: a stack of screens (menus, dialogs, overlays), the registries
//! that route input to whichever widgets are listening, scoped construction
//! that wires child widgets into their parents, deferred disposal, and a frame
//! pacer that holds the main loop to a target rate.
//!
//! ## Frame pipeline
//!
//! ```text
//! terminal / other threads → EventQueue → dispatch → pacing
//!     → timers → render → disposal
//! ```
//!
//! 1. [`input`]: event values, the cross-thread [`input::EventQueue`], and the
//!    crossterm adapter.
//! 2. [`gui`]: the [`gui::Gui`] context. It owns the object arena, the
//!    interface stack, listener registries, construction scopes and the
//!    disposal queue.
//! 3. [`pacing`]: [`pacing::FramePacer`] over a pluggable [`pacing::Clock`].
//! 4. [`event_loop`]: [`event_loop::EventLoop`] ties the above together, one
//!    frame at a time.
//! 5. [`config`]: TOML-backed [`config::GuiConfig`].
//!
//! ## Threading
//!
//! All GUI state belongs to the thread that created the [`gui::Gui`]. Other
//! threads only push events through an [`input::EventSender`].

pub mod config;
pub mod errors;
pub mod event_loop;
pub mod gui;
pub mod input;
pub mod pacing;

pub use config::GuiConfig;
pub use errors::GuiError;
pub use event_loop::{Application, EventLoop, Frontend, HeadlessFrontend, LoopAction};
pub use gui::Gui;
