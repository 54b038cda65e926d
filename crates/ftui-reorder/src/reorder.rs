#![forbid(unsafe_code)]

//! The reorder event emitted once per completed drag.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The dragged item moved from `old_index` to `new_index`.
///
/// Items between the two indices shift by one towards `old_index`, which is
/// exactly a remove-then-insert on the host's list.
///
/// The event carries only the dragged item's two indices. When the drag walked
/// past a locked or still-building slot (see
/// [`CollisionOutcome::Shifted`](crate::CollisionOutcome::Shifted)), the
/// engine kept that slot's item in place while a remove-then-insert would move
/// it by one. Hosts that lock slots should rebuild their list from
/// [`Registry::keys_by_order`](crate::Registry::keys_by_order) instead of
/// replaying the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReorderEvent {
    pub old_index: usize,
    pub new_index: usize,
}

impl ReorderEvent {
    #[must_use]
    pub const fn new(old_index: usize, new_index: usize) -> Self {
        Self {
            old_index,
            new_index,
        }
    }

    /// Number of slots travelled.
    #[must_use]
    pub const fn distance(&self) -> usize {
        self.old_index.abs_diff(self.new_index)
    }
}

/// Apply `event` to a host-owned list.
///
/// Returns `false` and leaves `items` alone when either index is out of range
/// or the event does not move anything. Matches the engine's arrangement only
/// when the drag skipped no slot; see [`ReorderEvent`].
pub fn apply_reorder<T>(items: &mut Vec<T>, event: ReorderEvent) -> bool {
    let ReorderEvent {
        old_index,
        new_index,
    } = event;
    if old_index == new_index || old_index >= items.len() || new_index >= items.len() {
        return false;
    }
    let item = items.remove(old_index);
    items.insert(new_index, item);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_item_down() {
        let mut items = vec!["a", "b", "c", "d", "e"];
        assert!(apply_reorder(&mut items, ReorderEvent::new(0, 2)));
        assert_eq!(items, vec!["b", "c", "a", "d", "e"]);
    }

    #[test]
    fn moves_item_up() {
        let mut items = vec!["a", "b", "c", "d"];
        assert!(apply_reorder(&mut items, ReorderEvent::new(3, 1)));
        assert_eq!(items, vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn rejects_out_of_range_and_identity() {
        let mut items = vec![1, 2, 3];
        assert!(!apply_reorder(&mut items, ReorderEvent::new(1, 1)));
        assert!(!apply_reorder(&mut items, ReorderEvent::new(0, 3)));
        assert!(!apply_reorder(&mut items, ReorderEvent::new(5, 0)));
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(ReorderEvent::new(4, 1).distance(), 3);
        assert_eq!(ReorderEvent::new(1, 4).distance(), 3);
    }
}
