//! Deferred disposal
//!
//! Objects that die mid-frame (a dialog closing itself from its own click
//! handler, say) cannot be freed while a dispatch loop or the render walk may
//! still hold their id. [`DisposalQueue`] records them until
//! [`Gui::drain_disposed`](super::handler::Gui::drain_disposed) runs between
//! frames. Deregistration happens at enqueue time, so a queued object is
//! already invisible to dispatch and rendering.

use super::object::ObjectId;

#[derive(Debug, Default, Clone)]
pub struct DisposalQueue {
    pending: Vec<ObjectId>,
}

impl DisposalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `id`. Returns false if it was already queued.
    pub fn enqueue(&mut self, id: ObjectId) -> bool {
        if self.pending.contains(&id) {
            return false;
        }
        self.pending.push(id);
        true
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.pending.contains(&id)
    }

    /// Hand over everything queued so far, oldest first
    pub fn take(&mut self) -> Vec<ObjectId> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
