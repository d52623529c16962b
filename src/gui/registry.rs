//! Listener registry
//!
//! One ordered list of objects per event [`Category`]. Lists are kept newest
//! first: an object registered later is dispatched to earlier, so widgets of
//! the screen that activated last (the foreground) see input before anything
//! that was already listening.
//!
//! Adding an object that is already present and removing one that is absent
//! are both no-ops.

use super::object::{Capabilities, ObjectId};

/// Class of input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    PrimaryClick,
    SecondaryClick,
    TertiaryClick,
    Hover,
    KeyPress,
    PointerMotion,
    TimerTick,
    WheelScroll,
    DoubleClick,
    TextInput,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::PrimaryClick,
        Category::SecondaryClick,
        Category::TertiaryClick,
        Category::Hover,
        Category::KeyPress,
        Category::PointerMotion,
        Category::TimerTick,
        Category::WheelScroll,
        Category::DoubleClick,
        Category::TextInput,
    ];

    /// The capability bit that opts an object into this category
    pub fn capability(self) -> Capabilities {
        match self {
            Category::PrimaryClick => Capabilities::LCLICK,
            Category::SecondaryClick => Capabilities::RCLICK,
            Category::TertiaryClick => Capabilities::MCLICK,
            Category::Hover => Capabilities::HOVER,
            Category::KeyPress => Capabilities::KEYBOARD,
            Category::PointerMotion => Capabilities::MOVE,
            Category::TimerTick => Capabilities::TIME,
            Category::WheelScroll => Capabilities::WHEEL,
            Category::DoubleClick => Capabilities::DOUBLECLICK,
            Category::TextInput => Capabilities::TEXTINPUT,
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Categories named by `mask`
    pub fn from_mask(mask: Capabilities) -> impl Iterator<Item = Category> {
        Category::ALL
            .into_iter()
            .filter(move |c| mask.contains(c.capability()))
    }
}

/// Per-category ordered sets of listening objects
#[derive(Debug, Default, Clone)]
pub struct ListenerRegistry {
    lists: [Vec<ObjectId>; 10],
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` to every category in `mask`
    pub fn activate(&mut self, id: ObjectId, mask: Capabilities) {
        for category in Category::from_mask(mask) {
            let list = &mut self.lists[category.index()];
            if !list.contains(&id) {
                list.insert(0, id);
                log::trace!("{} listening for {:?}", id, category);
            }
        }
    }

    /// Remove `id` from every category in `mask`
    pub fn deactivate(&mut self, id: ObjectId, mask: Capabilities) {
        for category in Category::from_mask(mask) {
            let list = &mut self.lists[category.index()];
            if let Some(pos) = list.iter().position(|x| *x == id) {
                list.remove(pos);
                log::trace!("{} stopped listening for {:?}", id, category);
            }
        }
    }

    /// Remove `id` from every category
    pub fn remove_all(&mut self, id: ObjectId) {
        self.deactivate(id, Capabilities::all());
    }

    pub fn contains(&self, category: Category, id: ObjectId) -> bool {
        self.lists[category.index()].contains(&id)
    }

    pub fn listeners(&self, category: Category) -> &[ObjectId] {
        &self.lists[category.index()]
    }

    /// Copy of a category's list for iteration while the registry changes
    pub fn snapshot(&self, category: Category) -> Vec<ObjectId> {
        self.lists[category.index()].clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(|l| l.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_registration_is_single_entry() {
        let mut reg = ListenerRegistry::new();
        let id = ObjectId(1);
        reg.activate(id, Capabilities::LCLICK);
        reg.activate(id, Capabilities::LCLICK | Capabilities::HOVER);
        assert_eq!(reg.listeners(Category::PrimaryClick), &[id]);
        assert_eq!(reg.listeners(Category::Hover), &[id]);
    }

    #[test]
    fn test_removing_absent_entry_is_noop() {
        let mut reg = ListenerRegistry::new();
        reg.deactivate(ObjectId(9), Capabilities::all());
        assert!(reg.is_empty());

        reg.activate(ObjectId(1), Capabilities::KEYBOARD);
        reg.deactivate(ObjectId(1), Capabilities::KEYBOARD);
        reg.deactivate(ObjectId(1), Capabilities::KEYBOARD);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_newest_listener_first() {
        let mut reg = ListenerRegistry::new();
        reg.activate(ObjectId(1), Capabilities::WHEEL);
        reg.activate(ObjectId(2), Capabilities::WHEEL);
        assert_eq!(
            reg.listeners(Category::WheelScroll),
            &[ObjectId(2), ObjectId(1)]
        );
    }

    #[test]
    fn test_mask_selects_categories() {
        let mask = Capabilities::TIME | Capabilities::TEXTINPUT;
        let cats: Vec<_> = Category::from_mask(mask).collect();
        assert_eq!(cats, vec![Category::TimerTick, Category::TextInput]);
    }
}
