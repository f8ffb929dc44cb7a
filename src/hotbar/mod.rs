//! Hotbar: a fixed-size ordered array of item slots.
//!
//! The `Hotbar` resource owns the slot array and the selected index; slots
//! store item names (registry keys), not copies of the definition, so
//! hot-reloaded item edits show up on the next equip. The held-visual
//! invariant (exactly one in-hand entity iff the selected slot holds an
//! item) is enforced by the `sync_held_item` system in `systems`.

pub mod systems;

use bevy::prelude::*;

pub use systems::*;

/// Default number of hotbar slots.
pub const HOTBAR_SIZE: usize = 5;

#[derive(Resource)]
pub struct Hotbar {
    slots: Vec<Option<String>>,
    selected: usize,
    /// The currently spawned in-hand visual, if any. Owned by
    /// `sync_held_item`; nothing else may despawn it.
    pub held_entity: Option<Entity>,
}

impl Default for Hotbar {
    fn default() -> Self {
        Self::new(HOTBAR_SIZE)
    }
}

impl Hotbar {
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![None; size.max(1)],
            selected: 0,
            held_entity: None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Item name in `slot`, or `None` for an empty or out-of-range slot.
    #[must_use]
    pub fn item_at(&self, slot: usize) -> Option<&str> {
        self.slots.get(slot)?.as_deref()
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<&str> {
        self.item_at(self.selected)
    }

    /// Select `slot` directly. Out-of-range indices are rejected silently.
    pub fn select(&mut self, slot: usize) {
        if slot < self.slots.len() {
            self.selected = slot;
        }
    }

    /// Cycle selection forward, wrapping past the last slot.
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.slots.len();
    }

    /// Cycle selection backward, wrapping past the first slot.
    pub fn select_prev(&mut self) {
        self.selected = (self.selected + self.slots.len() - 1) % self.slots.len();
    }

    /// Assign `item` to `slot`. Out-of-range slots are a silent no-op and
    /// return false.
    pub fn equip_item(&mut self, item: &str, slot: usize) -> bool {
        match self.slots.get_mut(slot) {
            Some(s) => {
                *s = Some(item.to_string());
                true
            }
            None => false,
        }
    }

    /// Place `item` in the first empty slot. Returns false, mutating
    /// nothing, when every slot is occupied.
    pub fn equip_first_empty(&mut self, item: &str) -> bool {
        match self.slots.iter_mut().find(|s| s.is_none()) {
            Some(slot) => {
                *slot = Some(item.to_string());
                true
            }
            None => false,
        }
    }

    /// Take the item out of the selected slot. `None` when it was empty.
    pub fn clear_current(&mut self) -> Option<String> {
        self.slots[self.selected].take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_empty_on_full_hotbar_mutates_nothing() {
        let mut hb = Hotbar::new(3);
        for i in 0..3 {
            assert!(hb.equip_first_empty(&format!("item_{i}")));
        }
        assert!(hb.is_full());

        let before: Vec<Option<String>> =
            (0..3).map(|i| hb.item_at(i).map(str::to_string)).collect();
        assert!(!hb.equip_first_empty("overflow"));
        let after: Vec<Option<String>> =
            (0..3).map(|i| hb.item_at(i).map(str::to_string)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn first_empty_skips_occupied_slots() {
        let mut hb = Hotbar::new(4);
        hb.equip_item("a", 0);
        hb.equip_item("b", 2);
        assert!(hb.equip_first_empty("c"));
        assert_eq!(hb.item_at(1), Some("c"));
    }

    #[test]
    fn selection_wraps_forward() {
        let mut hb = Hotbar::new(5);
        for expected in [1, 2, 3, 4, 0, 1] {
            hb.select_next();
            assert_eq!(hb.selected_index(), expected);
        }
    }

    #[test]
    fn selection_wraps_backward() {
        let mut hb = Hotbar::new(5);
        for expected in [4, 3, 2, 1, 0, 4] {
            hb.select_prev();
            assert_eq!(hb.selected_index(), expected);
        }
    }

    #[test]
    fn clear_current_on_empty_slot_is_noop() {
        let mut hb = Hotbar::new(3);
        assert_eq!(hb.clear_current(), None);
        assert!(hb.is_empty());
        assert_eq!(hb.selected_index(), 0);
    }

    #[test]
    fn clear_current_takes_selected_item() {
        let mut hb = Hotbar::new(3);
        hb.equip_item("rope", 1);
        hb.select(1);
        assert_eq!(hb.clear_current(), Some("rope".to_string()));
        assert_eq!(hb.selected_item(), None);
    }

    #[test]
    fn out_of_range_operations_are_silent_noops() {
        let mut hb = Hotbar::new(3);
        hb.select(99);
        assert_eq!(hb.selected_index(), 0);
        assert!(!hb.equip_item("x", 99));
        assert_eq!(hb.item_at(99), None);
        assert!(hb.is_empty());
    }
}
