//! Interface stack storage
//!
//! Ordered screens, foreground last. This type only keeps the order; the
//! activation protocol around push and pop lives on
//! [`Gui`](super::handler::Gui), which owns both the stack and the objects.

use super::object::ObjectId;

#[derive(Debug, Default, Clone)]
pub struct InterfaceStack {
    /// Back to front: index 0 is the bottom-most screen
    screens: Vec<ObjectId>,
}

impl InterfaceStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, id: ObjectId) {
        self.screens.push(id);
    }

    pub(crate) fn pop(&mut self) -> Option<ObjectId> {
        self.screens.pop()
    }

    /// Remove `id` wherever it sits. Returns whether it was present.
    pub(crate) fn remove(&mut self, id: ObjectId) -> bool {
        match self.screens.iter().position(|s| *s == id) {
            Some(index) => {
                self.screens.remove(index);
                true
            }
            None => false,
        }
    }

    /// The foreground screen
    pub fn top(&self) -> Option<ObjectId> {
        self.screens.last().copied()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.screens.contains(&id)
    }

    /// Back-to-front order, the order screens are drawn in
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = ObjectId> + '_ {
        self.screens.iter().copied()
    }

    pub fn as_slice(&self) -> &[ObjectId] {
        &self.screens
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }
}
