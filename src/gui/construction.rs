//! Scoped construction
//!
//! While a [`ConstructionScope`] is open, every object created through
//! [`Gui::create`] is attached as a child of the scope's owner. If the owner
//! is active the child is activated immediately, which registers it with the
//! listener registry for its capability mask.
//!
//! Scopes nest: a widget built while another widget is being built attaches to
//! the innermost open scope. Both guard types deref to [`Gui`] and undo their
//! changes in `Drop`, so the construction stack unwinds correctly on early
//! return or panic. Closing a scope puts back the capture flag and default
//! actions that were in force when it opened.
//!
//! ```ignore
//! let mut scope = gui.open_capturing_scope(dialog, Actions::all());
//! let ok = scope.create(Button::new("OK"), Rect::new(2, 4, 6, 1), Capabilities::LCLICK);
//! {
//!     let mut inner = scope.open_scope(ok);
//!     inner.create(Label::new("*"), Rect::new(0, 0, 1, 1), Capabilities::empty());
//! }
//! ```

use std::ops::{Deref, DerefMut};

use super::handler::Gui;
use super::object::{Actions, ObjectId};

/// One open construction scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstructionFrame {
    pub owner: ObjectId,
    /// Default actions in force when the scope opened
    pub actions: Actions,
    /// Capture flag in force when the scope opened
    pub capture: bool,
}

/// Guard for an open construction scope
pub struct ConstructionScope<'a> {
    gui: &'a mut Gui,
    owner: ObjectId,
}

impl ConstructionScope<'_> {
    pub fn owner(&self) -> ObjectId {
        self.owner
    }
}

impl Deref for ConstructionScope<'_> {
    type Target = Gui;

    fn deref(&self) -> &Gui {
        self.gui
    }
}

impl DerefMut for ConstructionScope<'_> {
    fn deref_mut(&mut self) -> &mut Gui {
        self.gui
    }
}

impl Drop for ConstructionScope<'_> {
    fn drop(&mut self) {
        let Some(frame) = self.gui.frames.pop() else {
            return;
        };
        debug_assert_eq!(frame.owner, self.owner);
        self.gui.capture_children = frame.capture;
        self.gui.default_actions = frame.actions;
    }
}

/// Guard that overrides the ambient capture flag and default actions
pub struct CaptureState<'a> {
    gui: &'a mut Gui,
    previous_capture: bool,
    previous_actions: Actions,
}

impl Deref for CaptureState<'_> {
    type Target = Gui;

    fn deref(&self) -> &Gui {
        self.gui
    }
}

impl DerefMut for CaptureState<'_> {
    fn deref_mut(&mut self) -> &mut Gui {
        self.gui
    }
}

impl Drop for CaptureState<'_> {
    fn drop(&mut self) {
        self.gui.capture_children = self.previous_capture;
        self.gui.default_actions = self.previous_actions;
    }
}

impl Gui {
    /// Open a scope capturing new objects as children of `owner`
    pub fn open_scope(&mut self, owner: ObjectId) -> ConstructionScope<'_> {
        self.frames.push(ConstructionFrame {
            owner,
            actions: self.default_actions,
            capture: self.capture_children,
        });
        self.capture_children = true;
        ConstructionScope { gui: self, owner }
    }

    /// Open a scope whose children get `actions`, restoring the ambient
    /// defaults when it closes. `owner` forwards `actions` to its children
    /// from now on.
    pub fn open_capturing_scope(
        &mut self,
        owner: ObjectId,
        actions: Actions,
    ) -> ConstructionScope<'_> {
        if let Some(node) = self.node_mut(owner) {
            node.def_actions = actions;
        }
        let mut scope = self.open_scope(owner);
        scope.default_actions = actions;
        scope
    }

    /// Override whether new objects are captured and which actions they get
    pub fn capture_state(&mut self, allow: bool, actions: Actions) -> CaptureState<'_> {
        let previous_capture = self.capture_children;
        let previous_actions = self.default_actions;
        self.capture_children = allow;
        self.default_actions = actions;
        CaptureState {
            gui: self,
            previous_capture,
            previous_actions,
        }
    }

    /// Run `f` inside a scope owned by `owner`
    pub fn construct<R>(&mut self, owner: ObjectId, f: impl FnOnce(&mut Gui) -> R) -> R {
        let mut scope = self.open_scope(owner);
        f(&mut scope)
    }

    /// Owner of the innermost open scope
    pub fn constructing(&self) -> Option<ObjectId> {
        self.frames.last().map(|f| f.owner)
    }

    pub fn construction_frames(&self) -> &[ConstructionFrame] {
        &self.frames
    }

    /// Whether new objects are currently captured
    pub fn is_capturing(&self) -> bool {
        self.capture_children
    }

    pub fn default_actions(&self) -> Actions {
        self.default_actions
    }
}
