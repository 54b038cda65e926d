#![forbid(unsafe_code)]

//! Per-item reorder record.
//!
//! A [`ReorderEntity`] pairs every tracked value with an "original" and an
//! "updated" twin: the original is what was last committed, the updated is the
//! live target. Transitions never mutate in place; each one returns the next
//! value so the owning registry can swap it in atomically.
//!
//! ```text
//! create ──> updated* ──> creation_finished ──> position_updated / faded_in
//!   (new)      (swap)         (measured)              (settled)
//! ```

use crate::geometry::{ItemRect, ItemSize, Point};

/// Order/offset bookkeeping for one item.
///
/// Equality is structural over every field so hosts can skip redundant
/// animation work by comparing snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderEntity<K> {
    key: K,
    /// `None` until the entity completes its first settle.
    original_order_id: Option<usize>,
    updated_order_id: usize,
    original_offset: Point,
    updated_offset: Point,
    is_building_offset: bool,
    has_swapped_order: bool,
    size: Option<ItemSize>,
}

impl<K> ReorderEntity<K> {
    /// Create an entity for an item that was just observed.
    ///
    /// Without an offset the entity is flagged as building and both offsets
    /// sit at the origin until a layout pass reports real geometry.
    #[must_use]
    pub fn create(key: K, updated_order_id: usize, offset: Option<Point>) -> Self {
        Self {
            key,
            original_order_id: None,
            updated_order_id,
            original_offset: offset.unwrap_or(Point::ZERO),
            updated_offset: offset.unwrap_or(Point::ZERO),
            is_building_offset: offset.is_none(),
            has_swapped_order: false,
            size: None,
        }
    }

    /// Reassign the live order and offset.
    ///
    /// The previous live values only roll into the original slot when the
    /// order actually changes; reconfirming the same slot keeps the original.
    #[must_use]
    pub fn updated(self, updated_order_id: usize, updated_offset: Option<Point>) -> Self {
        let order_changed = self.updated_order_id != updated_order_id;
        let original_order_id = if order_changed {
            Some(self.updated_order_id)
        } else {
            self.original_order_id
        };
        let original_offset = if order_changed {
            self.updated_offset
        } else {
            self.original_offset
        };

        Self {
            original_order_id,
            updated_order_id,
            original_offset,
            updated_offset: updated_offset.unwrap_or(self.updated_offset),
            is_building_offset: updated_offset.is_none(),
            has_swapped_order: original_order_id != Some(updated_order_id)
                && updated_offset.is_some(),
            ..self
        }
    }

    /// Mark the first real measurement as done.
    ///
    /// Only the live offset is corrected; the original offset is left alone.
    #[must_use]
    pub fn creation_finished(self, offset: Option<Point>) -> Self {
        Self {
            updated_offset: offset.unwrap_or(self.updated_offset),
            is_building_offset: false,
            has_swapped_order: false,
            ..self
        }
    }

    /// Settle after a position animation or a committed reorder.
    #[must_use]
    pub fn position_updated(self) -> Self {
        self.settled()
    }

    /// Settle after a fade-in animation of a new item.
    #[must_use]
    pub fn faded_in(self) -> Self {
        self.settled()
    }

    /// Attach the last measured size.
    #[must_use]
    pub fn with_size(self, size: ItemSize) -> Self {
        Self {
            size: Some(size),
            ..self
        }
    }

    fn settled(self) -> Self {
        Self {
            original_order_id: Some(self.updated_order_id),
            original_offset: self.updated_offset,
            is_building_offset: false,
            has_swapped_order: false,
            ..self
        }
    }

    #[must_use]
    pub fn key(&self) -> &K {
        &self.key
    }

    #[must_use]
    pub const fn original_order_id(&self) -> Option<usize> {
        self.original_order_id
    }

    #[must_use]
    pub const fn updated_order_id(&self) -> usize {
        self.updated_order_id
    }

    #[must_use]
    pub const fn original_offset(&self) -> Point {
        self.original_offset
    }

    #[must_use]
    pub const fn updated_offset(&self) -> Point {
        self.updated_offset
    }

    #[must_use]
    pub const fn is_building_offset(&self) -> bool {
        self.is_building_offset
    }

    #[must_use]
    pub const fn has_swapped_order(&self) -> bool {
        self.has_swapped_order
    }

    #[must_use]
    pub const fn size(&self) -> Option<ItemSize> {
        self.size
    }

    /// Whether the entity has never been through a settle.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.original_order_id.is_none()
    }

    /// The live rectangle, once both offset and size are known.
    #[must_use]
    pub fn updated_rect(&self) -> Option<ItemRect> {
        if self.is_building_offset {
            return None;
        }
        self.size
            .map(|size| ItemRect::from_parts(self.updated_offset, size))
    }
}
