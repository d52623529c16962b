//! The interface stack manager
//!
//! - [`handler`]: the [`Gui`] context owning all GUI state
//! - [`object`]: object ids, capability/action masks, the [`Widget`] trait
//! - [`registry`]: per-category listener lists
//! - [`construction`]: scoped capture of newly built objects
//! - [`stack`]: ordered screens
//! - [`disposal`]: deferred destruction
//! - [`dispatch`] and [`render`]: the per-frame work on [`Gui`]

pub mod constants;
pub mod construction;
pub mod disposal;
pub mod dispatch;
pub mod handler;
pub mod object;
pub mod registry;
pub mod render;
pub mod stack;

pub use construction::{CaptureState, ConstructionScope};
pub use handler::Gui;
pub use object::{Actions, Capabilities, Click, Container, ObjectId, ObjectNode, Widget};
pub use registry::{Category, ListenerRegistry};
