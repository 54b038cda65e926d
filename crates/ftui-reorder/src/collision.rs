#![forbid(unsafe_code)]

//! Collision detection and order resolution for the dragged item.
//!
//! Detection scans every other entity in ascending order-id and takes the
//! first whose live rectangle contains the drag reference point. There is no
//! closest-match tie-break, so only one collision is handled per update.
//!
//! Resolution then either swaps the dragged entity with the collision target
//! (adjacent orders) or walks every slot between them one swap at a time,
//! skipping locked slots and slots whose entity has not been measured yet:
//!
//! ```text
//! drag D (slot 0) onto c (slot 3), slot 2 locked:
//!   [D a b c] --swap 1--> [a D b c] --skip 2--> [a D b c] --swap 3--> [a c b D]
//! ```

use std::collections::BTreeSet;

use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entity::ReorderEntity;
use crate::geometry::{CollisionBounds, Point};
use crate::registry::{Registry, ReorderKey};

/// What a resolved collision did to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "outcome", rename_all = "snake_case"))]
pub enum CollisionOutcome {
    /// The target sits on a locked slot; nothing moved.
    LockedTarget { order: usize },
    /// Direct exchange with an adjacent entity.
    Swapped { from: usize, to: usize },
    /// Multi-slot walk towards a distant target. `skipped` lists the locked
    /// or still-building slots that were passed over.
    Shifted {
        from: usize,
        to: usize,
        swaps: usize,
        skipped: SmallVec<[usize; 4]>,
    },
}

impl CollisionOutcome {
    /// Whether any entity changed order.
    #[must_use]
    pub fn moved(&self) -> bool {
        !matches!(self, Self::LockedTarget { .. })
    }
}

/// First entity (ascending order) other than `dragged` whose live rectangle
/// contains `point`.
///
/// Entities still building or without a measured size never collide.
#[must_use]
pub fn find_collision<'a, K: ReorderKey>(
    registry: &'a Registry<K>,
    dragged: &K,
    point: Point,
    bounds: CollisionBounds,
) -> Option<&'a ReorderEntity<K>> {
    registry.iter_by_order().find(|entity| {
        entity.key() != dragged
            && entity
                .updated_rect()
                .is_some_and(|rect| rect.contains(point, bounds))
    })
}

/// Move `dragged` towards `collision_order`.
///
/// Returns `None` when the dragged key is unknown or no swap could be made.
pub(crate) fn resolve_collision<K: ReorderKey>(
    registry: &mut Registry<K>,
    dragged: &K,
    collision_order: usize,
    locked: &BTreeSet<usize>,
) -> Option<CollisionOutcome> {
    let dragged_order = registry.get(dragged)?.updated_order_id();
    if locked.contains(&collision_order) {
        return Some(CollisionOutcome::LockedTarget {
            order: collision_order,
        });
    }

    let distance = dragged_order.abs_diff(collision_order);
    if distance == 0 {
        return None;
    }
    if distance == 1 {
        return swap_into_slot(registry, dragged, collision_order, locked).then_some(
            CollisionOutcome::Swapped {
                from: dragged_order,
                to: collision_order,
            },
        );
    }

    let towards_front = collision_order < dragged_order;
    let mut swaps = 0;
    let mut skipped = SmallVec::new();
    for step in 1..=distance {
        let slot = if towards_front {
            dragged_order - step
        } else {
            dragged_order + step
        };
        if locked.contains(&slot) {
            tracing::trace!(message = "reorder.shift.skip", slot, reason = "locked");
            skipped.push(slot);
            continue;
        }
        if registry
            .entity_at_order(slot)
            .is_some_and(ReorderEntity::is_building_offset)
        {
            tracing::trace!(message = "reorder.shift.skip", slot, reason = "building");
            skipped.push(slot);
            continue;
        }
        if swap_into_slot(registry, dragged, slot, locked) {
            swaps += 1;
        }
    }

    if swaps == 0 {
        return None;
    }
    let to = registry.get(dragged)?.updated_order_id();
    Some(CollisionOutcome::Shifted {
        from: dragged_order,
        to,
        swaps,
        skipped,
    })
}

/// Exchange live order/offset between `dragged` and whoever holds `slot`.
///
/// The collision entity takes the dragged entity's current values; the dragged
/// entity takes the collision entity's previous values. Both must be measured.
fn swap_into_slot<K: ReorderKey>(
    registry: &mut Registry<K>,
    dragged: &K,
    slot: usize,
    locked: &BTreeSet<usize>,
) -> bool {
    if locked.contains(&slot) {
        return false;
    }
    let Some(dragged_entity) = registry.get(dragged).cloned() else {
        return false;
    };
    let Some(collision_entity) = registry.entity_at_order(slot).cloned() else {
        return false;
    };
    if collision_entity.key() == dragged
        || collision_entity.is_building_offset()
        || dragged_entity.is_building_offset()
    {
        return false;
    }

    let dragged_order = dragged_entity.updated_order_id();
    let dragged_offset = dragged_entity.updated_offset();
    let collision_offset = collision_entity.updated_offset();

    registry.replace(collision_entity.updated(dragged_order, Some(dragged_offset)));
    registry.replace(dragged_entity.updated(slot, Some(collision_offset)));
    tracing::trace!(message = "reorder.swap", from = dragged_order, to = slot);
    true
}
