#![forbid(unsafe_code)]

//! Per-item render hints.
//!
//! The engine never animates anything itself. After every state change the
//! host pulls one [`RenderHint`] per item and drives its own transitions, then
//! reports completion through `ReorderEngine::animation_finished`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entity::ReorderEntity;
use crate::geometry::{ItemSize, Point};

/// Which transition the host should run for an item.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "transition", rename_all = "snake_case"))]
pub enum ItemTransition {
    /// Real geometry not known yet; render hidden or in place.
    Measuring,
    /// First appearance of the item.
    FadeIn,
    /// Move from the committed offset to the live one.
    Slide { from: Point, to: Point },
    /// Nothing to animate.
    Still,
}

impl ItemTransition {
    /// Whether the host has to report completion for this transition.
    #[must_use]
    pub const fn is_animated(&self) -> bool {
        matches!(self, Self::FadeIn | Self::Slide { .. })
    }
}

/// Snapshot of one item's animation target.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RenderHint<K> {
    pub key: K,
    pub order: usize,
    pub offset: Point,
    pub previous_offset: Point,
    pub size: Option<ItemSize>,
    pub transition: ItemTransition,
    /// The item under the pointer; hosts usually render it above the rest.
    pub dragging: bool,
}

impl<K: Clone> RenderHint<K> {
    pub(crate) fn from_entity(entity: &ReorderEntity<K>, dragging: bool) -> Self {
        Self {
            key: entity.key().clone(),
            order: entity.updated_order_id(),
            offset: entity.updated_offset(),
            previous_offset: entity.original_offset(),
            size: entity.size(),
            transition: transition_for(entity),
            dragging,
        }
    }
}

fn transition_for<K>(entity: &ReorderEntity<K>) -> ItemTransition {
    if entity.is_building_offset() {
        ItemTransition::Measuring
    } else if entity.is_new() {
        ItemTransition::FadeIn
    } else if entity.has_swapped_order() {
        ItemTransition::Slide {
            from: entity.original_offset(),
            to: entity.updated_offset(),
        }
    } else {
        ItemTransition::Still
    }
}
