//! Error types for the GUI core
//!
//! Most per-frame operations are defensive no-ops rather than fallible. The
//! handful that can break a caller contract (popping more screens than the
//! stack holds, popping a screen that is not in front) report a [`GuiError`]
//! and leave the stack untouched.

use crate::config::ConfigError;
use crate::gui::object::ObjectId;
use thiserror::Error;

/// Errors reported by the GUI core
#[derive(Debug, Error)]
pub enum GuiError {
    /// Tried to pop more screens than are on the stack
    #[error("cannot pop {requested} screen(s) from a stack of depth {depth}")]
    StackUnderflow { requested: usize, depth: usize },

    /// The id does not name a live object
    #[error("unknown object {0}")]
    UnknownObject(ObjectId),

    /// The screen is not the foreground screen
    #[error("object {0} is not the foreground screen")]
    NotForeground(ObjectId),

    /// The screen is already on the stack
    #[error("object {0} is already on the interface stack")]
    AlreadyOnStack(ObjectId),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}
