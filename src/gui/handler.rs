//! The GUI context
//!
//! [`Gui`] owns every piece of GUI state: the object arena, the interface
//! stack, the listener registry, the construction frames and the disposal
//! queue. It is created on the GUI thread and passed explicitly to whatever
//! needs it; widget hooks receive it as their first argument.
//!
//! # Stack transitions
//!
//! Activation is two-phase. On push the old foreground is deactivated before
//! the new screen is inserted, and the new screen is activated only after it
//! is on the stack. On pop every removed screen is deactivated before it is
//! queued for disposal, and the new foreground is activated last.
//!
//! # Ownership
//!
//! A popped screen is queued for disposal only if no parent owns it. A screen
//! that was built inside another object's construction scope stays alive
//! until that parent dies, but it gets no input and is not drawn unless it is
//! pushed again.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use rustc_hash::FxHashMap;
use std::thread::{self, ThreadId};

use super::construction::ConstructionFrame;
use super::disposal::DisposalQueue;
use super::object::{Actions, Capabilities, ObjectId, ObjectNode, Widget};
use super::registry::ListenerRegistry;
use super::stack::InterfaceStack;
use crate::config::GuiConfig;
use crate::errors::GuiError;

struct Slot {
    node: ObjectNode,
    /// `None` while the widget is running one of its own hooks
    widget: Option<Box<dyn Widget>>,
}

/// Lifecycle notifications held back while a widget is checked out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notice {
    Activated,
    Deactivated,
}

/// Presentation-layer state for one GUI thread
pub struct Gui {
    pub(crate) config: GuiConfig,
    objects: FxHashMap<ObjectId, Slot>,
    next_id: u64,
    pub(crate) stack: InterfaceStack,
    pub(crate) registry: ListenerRegistry,
    pub(crate) disposal: DisposalQueue,

    pub(crate) frames: Vec<ConstructionFrame>,
    pub(crate) capture_children: bool,
    pub(crate) default_actions: Actions,

    pub(crate) continue_event_handling: bool,
    pub(crate) pointer: Position,
    pub(crate) last_click: Option<(Position, u64)>,

    pub(crate) needs_total_redraw: bool,
    pub(crate) background: Buffer,

    pending_notices: FxHashMap<ObjectId, Vec<Notice>>,
    gui_thread: ThreadId,
}

impl Gui {
    /// Create a GUI context bound to the calling thread
    pub fn new(config: GuiConfig) -> Self {
        Gui {
            config,
            objects: FxHashMap::default(),
            next_id: 1,
            stack: InterfaceStack::new(),
            registry: ListenerRegistry::new(),
            disposal: DisposalQueue::new(),
            frames: Vec::new(),
            capture_children: false,
            default_actions: Actions::all(),
            continue_event_handling: true,
            pointer: Position::new(0, 0),
            last_click: None,
            needs_total_redraw: true,
            background: Buffer::empty(Rect::ZERO),
            pending_notices: FxHashMap::default(),
            gui_thread: thread::current().id(),
        }
    }

    pub fn config(&self) -> &GuiConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Thread identity
    // ------------------------------------------------------------------

    pub fn is_gui_thread(&self) -> bool {
        thread::current().id() == self.gui_thread
    }

    /// Fatal off the GUI thread in debug builds; only logged in release builds
    pub fn assert_gui_thread(&self) {
        if self.is_gui_thread() {
            return;
        }
        log::warn!(
            "GUI state accessed from {:?}, owned by {:?}",
            thread::current().id(),
            self.gui_thread
        );
        debug_assert!(false, "GUI state accessed off the GUI thread");
    }

    // ------------------------------------------------------------------
    // Object arena
    // ------------------------------------------------------------------

    /// Create an object. If a construction scope is capturing, the new object
    /// becomes a child of the innermost scope's owner and is activated along
    /// with it.
    pub fn create(
        &mut self,
        widget: impl Widget + 'static,
        pos: Rect,
        used: Capabilities,
    ) -> ObjectId {
        let id = self.insert(Box::new(widget), pos, used);
        if self.capture_children {
            if let Some(owner) = self.frames.last().map(|f| f.owner) {
                self.add_child(owner, id, true);
            }
        }
        id
    }

    /// Create an object that is never captured by an open scope
    pub fn create_detached(
        &mut self,
        widget: impl Widget + 'static,
        pos: Rect,
        used: Capabilities,
    ) -> ObjectId {
        self.insert(Box::new(widget), pos, used)
    }

    fn insert(&mut self, widget: Box<dyn Widget>, pos: Rect, used: Capabilities) -> ObjectId {
        self.assert_gui_thread();
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        let node = ObjectNode::new(pos, used, self.default_actions);
        self.objects.insert(
            id,
            Slot {
                node,
                widget: Some(widget),
            },
        );
        log::trace!("created {} at {:?}", id, pos);
        id
    }

    /// Whether `id` names an object that has not been destroyed yet
    pub fn exists(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Live objects, including ones queued for disposal
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn node(&self, id: ObjectId) -> Option<&ObjectNode> {
        self.objects.get(&id).map(|s| &s.node)
    }

    pub fn node_mut(&mut self, id: ObjectId) -> Option<&mut ObjectNode> {
        self.objects.get_mut(&id).map(|s| &mut s.node)
    }

    /// The widget behind `id`, unless it is currently running a hook
    pub fn widget(&self, id: ObjectId) -> Option<&dyn Widget> {
        self.objects.get(&id)?.widget.as_deref()
    }

    pub fn children(&self, id: ObjectId) -> &[ObjectId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.node(id)?.parent
    }

    pub fn is_active(&self, id: ObjectId) -> bool {
        self.node(id).is_some_and(|n| n.activated)
    }

    /// Make `id` fire its timer hook every `delay_ms` milliseconds
    pub fn set_timer(&mut self, id: ObjectId, delay_ms: u64) {
        if let Some(node) = self.node_mut(id) {
            node.timer_delay = delay_ms;
            node.to_next_tick = delay_ms as i64;
        }
    }

    /// Check the widget out of its slot, run `f`, and put it back.
    ///
    /// Returns `None` if the object is gone or already checked out.
    pub(crate) fn with_widget<R>(
        &mut self,
        id: ObjectId,
        f: impl FnOnce(&mut dyn Widget, &mut Gui) -> R,
    ) -> Option<R> {
        let mut widget = self.objects.get_mut(&id)?.widget.take()?;
        let result = f(widget.as_mut(), self);
        if let Some(slot) = self.objects.get_mut(&id) {
            slot.widget = Some(widget);
        }
        self.flush_notices(id);
        Some(result)
    }

    fn notify(&mut self, id: ObjectId, notice: Notice) {
        let Some(slot) = self.objects.get_mut(&id) else {
            return;
        };
        match slot.widget.take() {
            Some(mut widget) => {
                match notice {
                    Notice::Activated => widget.on_activate(self, id),
                    Notice::Deactivated => widget.on_deactivate(self, id),
                }
                if let Some(slot) = self.objects.get_mut(&id) {
                    slot.widget = Some(widget);
                }
            }
            None => self.pending_notices.entry(id).or_default().push(notice),
        }
    }

    fn flush_notices(&mut self, id: ObjectId) {
        if let Some(notices) = self.pending_notices.remove(&id) {
            for notice in notices {
                self.notify(id, notice);
            }
        }
    }

    // ------------------------------------------------------------------
    // Parent/child tree
    // ------------------------------------------------------------------

    /// Attach `child` under `parent`, detaching it from any previous parent.
    ///
    /// With `adjust_position` set and `SHARE_POS` in the child's actions, the
    /// child's position is taken as relative to the parent. The child's
    /// activation is brought in line with the parent's.
    pub fn add_child(&mut self, parent: ObjectId, child: ObjectId, adjust_position: bool) {
        if parent == child || !self.exists(parent) || !self.exists(child) {
            return;
        }
        if self.children(parent).contains(&child) {
            return;
        }
        if let Some(old) = self.parent(child) {
            self.remove_child(old, child, adjust_position);
        }

        let parent_pos = self.objects[&parent].node.pos;
        let parent_active = self.objects[&parent].node.activated;
        if let Some(slot) = self.objects.get_mut(&parent) {
            slot.node.children.push(child);
        }
        let child_active = match self.node_mut(child) {
            Some(node) => {
                node.parent = Some(parent);
                if adjust_position && node.rec_actions.contains(Actions::SHARE_POS) {
                    node.pos.x = node.pos.x.saturating_add(parent_pos.x);
                    node.pos.y = node.pos.y.saturating_add(parent_pos.y);
                }
                node.activated
            }
            None => return,
        };

        if parent_active && !child_active {
            self.activate(child);
        } else if !parent_active && child_active {
            self.deactivate(child);
        }
    }

    /// Detach `child` from `parent`. The child keeps living on its own.
    pub fn remove_child(&mut self, parent: ObjectId, child: ObjectId, adjust_position: bool) {
        let parent_pos = match self.node_mut(parent) {
            Some(node) => {
                let Some(index) = node.children.iter().position(|c| *c == child) else {
                    return;
                };
                node.children.remove(index);
                node.pos
            }
            None => return,
        };
        if let Some(node) = self.node_mut(child) {
            node.parent = None;
            if adjust_position && node.rec_actions.contains(Actions::SHARE_POS) {
                node.pos.x = node.pos.x.saturating_sub(parent_pos.x);
                node.pos.y = node.pos.y.saturating_sub(parent_pos.y);
            }
        }
    }

    // ------------------------------------------------------------------
    // Activation
    // ------------------------------------------------------------------

    /// Register `id` for its capability mask and activate its children.
    /// Activating an active object does nothing.
    pub fn activate(&mut self, id: ObjectId) {
        let (used, forward, children) = match self.node_mut(id) {
            Some(node) if !node.activated && !node.disposed => {
                node.activated = true;
                node.active = node.used;
                (
                    node.used,
                    node.def_actions.contains(Actions::ACTIVATE),
                    node.children.clone(),
                )
            }
            _ => return,
        };
        self.registry.activate(id, used);
        self.notify(id, Notice::Activated);

        if forward {
            for child in children {
                if self
                    .node(child)
                    .is_some_and(|n| n.rec_actions.contains(Actions::ACTIVATE))
                {
                    self.activate(child);
                }
            }
        }
    }

    /// Remove `id` from every registry it is in and deactivate its children.
    /// Deactivating an inactive object does nothing.
    pub fn deactivate(&mut self, id: ObjectId) {
        let (active, forward, children) = match self.node_mut(id) {
            Some(node) if node.activated => {
                node.activated = false;
                node.hovered = false;
                let active = node.active;
                node.active = Capabilities::empty();
                (
                    active,
                    node.def_actions.contains(Actions::DEACTIVATE),
                    node.children.clone(),
                )
            }
            _ => return,
        };
        self.registry.deactivate(id, active);

        if forward {
            for child in children {
                if self
                    .node(child)
                    .is_some_and(|n| n.rec_actions.contains(Actions::DEACTIVATE))
                {
                    self.deactivate(child);
                }
            }
        }
        self.notify(id, Notice::Deactivated);
    }

    /// Start listening for more categories
    pub fn add_used_events(&mut self, id: ObjectId, mask: Capabilities) {
        let register = match self.node_mut(id) {
            Some(node) if !node.disposed => {
                node.used |= mask;
                if node.activated {
                    node.active |= mask;
                }
                node.activated
            }
            _ => return,
        };
        if register {
            self.registry.activate(id, mask);
        }
    }

    /// Stop listening for some categories
    pub fn remove_used_events(&mut self, id: ObjectId, mask: Capabilities) {
        if let Some(node) = self.node_mut(id) {
            node.used &= !mask;
            node.active &= !mask;
        }
        self.registry.deactivate(id, mask);
    }

    pub fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }

    // ------------------------------------------------------------------
    // Interface stack
    // ------------------------------------------------------------------

    pub fn stack(&self) -> &InterfaceStack {
        &self.stack
    }

    /// The foreground screen
    pub fn top(&self) -> Option<ObjectId> {
        self.stack.top()
    }

    /// Deactivate the current foreground, put `screen` in front and activate it
    pub fn push(&mut self, screen: ObjectId) -> Result<(), GuiError> {
        self.assert_gui_thread();
        if self.node(screen).map_or(true, |n| n.disposed) {
            return Err(GuiError::UnknownObject(screen));
        }
        if self.stack.contains(screen) {
            return Err(GuiError::AlreadyOnStack(screen));
        }

        if let Some(old) = self.stack.top() {
            self.deactivate(old);
        }
        self.stack.push(screen);
        self.activate(screen);
        self.total_redraw();
        log::debug!("pushed screen {} (depth {})", screen, self.stack.len());
        Ok(())
    }

    /// Create a screen outside any construction scope and push it
    pub fn push_new(
        &mut self,
        widget: impl Widget + 'static,
        pos: Rect,
        used: Capabilities,
    ) -> Result<ObjectId, GuiError> {
        let id = self.create_detached(widget, pos, used);
        self.push(id)?;
        Ok(id)
    }

    /// Pop `count` screens from the front and activate the new foreground.
    ///
    /// Popping more screens than the stack holds is reported as
    /// [`GuiError::StackUnderflow`] and leaves the stack untouched. Popping
    /// exactly every screen is allowed and leaves the stack empty.
    pub fn pop(&mut self, count: usize) -> Result<(), GuiError> {
        self.assert_gui_thread();
        if count == 0 {
            return Ok(());
        }
        let depth = self.stack.len();
        if count > depth {
            log::warn!("refusing to pop {} screen(s) from depth {}", count, depth);
            return Err(GuiError::StackUnderflow {
                requested: count,
                depth,
            });
        }

        for _ in 0..count {
            if let Some(screen) = self.stack.pop() {
                self.deactivate(screen);
                self.release_screen(screen);
                log::debug!("popped screen {}", screen);
            }
        }

        if let Some(front) = self.stack.top() {
            self.activate(front);
        }
        self.total_redraw();
        self.fake_mouse_move();
        Ok(())
    }

    /// Pop `screen`, but only if it is the foreground screen
    pub fn pop_specific(&mut self, screen: ObjectId) -> Result<(), GuiError> {
        if self.stack.top() != Some(screen) {
            log::warn!("{} is not the foreground screen, not popping", screen);
            return Err(GuiError::NotForeground(screen));
        }
        self.pop(1)
    }

    /// The stack gave `screen` up; dispose it unless a parent still owns it.
    ///
    /// A screen kept alive by its parent stays dormant: the parent no longer
    /// activates or draws it, but still takes it down on disposal.
    fn release_screen(&mut self, screen: ObjectId) {
        let owned = self
            .parent(screen)
            .and_then(|p| self.node(p))
            .is_some_and(|p| !p.disposed);
        if !owned {
            self.dispose(screen);
            return;
        }
        if let Some(node) = self.node_mut(screen) {
            node.rec_actions -= Actions::ACTIVATE | Actions::SHOWALL | Actions::UPDATE;
        }
    }

    // ------------------------------------------------------------------
    // Disposal
    // ------------------------------------------------------------------

    /// Mark `id` dead: deactivate it, drop it from the stack and every
    /// registry, and queue it for destruction at the end of the frame.
    /// Children built with `DISPOSE` die with it. Disposing twice is a no-op.
    pub fn dispose(&mut self, id: ObjectId) {
        if self.node(id).map_or(true, |n| n.disposed) {
            return;
        }
        self.deactivate(id);

        let children = match self.node_mut(id) {
            Some(node) => {
                node.disposed = true;
                node.children.clone()
            }
            None => return,
        };
        self.registry.remove_all(id);
        self.disposal.enqueue(id);
        log::trace!("{} queued for disposal", id);

        if self.stack.contains(id) {
            let was_top = self.stack.top() == Some(id);
            self.stack.remove(id);
            if was_top {
                if let Some(front) = self.stack.top() {
                    self.activate(front);
                }
            }
            self.total_redraw();
        }

        for child in children {
            let dies = self
                .node(child)
                .is_some_and(|n| n.rec_actions.contains(Actions::DISPOSE));
            if dies && !self.stack.contains(child) {
                self.dispose(child);
            }
        }
    }

    /// Whether `id` is waiting in the disposal queue
    pub fn is_pending_disposal(&self, id: ObjectId) -> bool {
        self.disposal.contains(id)
    }

    pub fn disposal_queue(&self) -> &DisposalQueue {
        &self.disposal
    }

    /// Destroy everything queued for disposal.
    ///
    /// Must run outside any dispatch or render walk; the event loop calls it
    /// once per frame after rendering. Returns the number of objects freed.
    pub fn drain_disposed(&mut self) -> usize {
        let mut freed = 0;
        loop {
            let batch = self.disposal.take();
            if batch.is_empty() {
                break;
            }
            for id in batch {
                if self.destroy(id) {
                    freed += 1;
                }
            }
        }
        if freed > 0 {
            log::trace!("destroyed {} object(s)", freed);
        }
        freed
    }

    fn destroy(&mut self, id: ObjectId) -> bool {
        let Some(slot) = self.objects.remove(&id) else {
            return false;
        };
        if let Some(parent) = slot.node.parent {
            if let Some(p) = self.node_mut(parent) {
                p.children.retain(|c| *c != id);
            }
        }
        for child in &slot.node.children {
            if let Some(node) = self.node_mut(*child) {
                node.parent = None;
            }
        }
        self.pending_notices.remove(&id);
        // Widget drop runs here, after every walk that could reach it
        drop(slot);
        true
    }
}
