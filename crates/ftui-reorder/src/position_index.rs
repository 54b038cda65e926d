#![forbid(unsafe_code)]

//! Order-position to on-screen origin index.
//!
//! Written whenever an item reports a completed layout and after every settle;
//! read when rebuilding the registry (to decide which entities are still
//! building) and at drag end (to recover numeric indices from geometry).

use std::collections::BTreeMap;

use crate::geometry::Point;
use crate::registry::{Registry, ReorderKey};

/// Last-seen rectangle origin for each order position.
///
/// Backed by a `BTreeMap` so geometry scans always run in ascending position
/// order and "first match wins" is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionIndex {
    origins: BTreeMap<usize, Point>,
}

impl PositionIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the origin for a position, overwriting any previous value.
    pub fn record(&mut self, position: usize, origin: Point) {
        self.origins.insert(position, origin);
    }

    /// Origin last recorded for a position.
    #[must_use]
    pub fn lookup(&self, position: usize) -> Option<Point> {
        self.origins.get(&position).copied()
    }

    /// First position (ascending) whose stored origin equals `origin`.
    #[must_use]
    pub fn position_of(&self, origin: Point) -> Option<usize> {
        self.origins
            .iter()
            .find_map(|(&position, &stored)| (stored == origin).then_some(position))
    }

    /// Recover the positions of two origins in a single scan.
    ///
    /// First matches win; the scan stops as soon as both are found.
    #[must_use]
    pub fn recover_indices(
        &self,
        old_origin: Point,
        new_origin: Point,
    ) -> (Option<usize>, Option<usize>) {
        let mut old_index = None;
        let mut new_index = None;
        for (&position, &stored) in &self.origins {
            if old_index.is_none() && stored == old_origin {
                old_index = Some(position);
            }
            if new_index.is_none() && stored == new_origin {
                new_index = Some(position);
            }
            if old_index.is_some() && new_index.is_some() {
                break;
            }
        }
        (old_index, new_index)
    }

    /// Re-record every measured entity at its live order.
    pub fn refresh_from<K: ReorderKey>(&mut self, registry: &Registry<K>) {
        for entity in registry.iter_by_order() {
            if !entity.is_building_offset() {
                self.record(entity.updated_order_id(), entity.updated_offset());
            }
        }
    }

    /// Drop positions at or beyond `len`, used after the collection shrinks.
    pub fn retain_below(&mut self, len: usize) {
        self.origins.retain(|&position, _| position < len);
    }

    pub fn clear(&mut self) {
        self.origins.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// Iterate `(position, origin)` pairs in ascending position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Point)> + '_ {
        self.origins.iter().map(|(&position, &origin)| (position, origin))
    }
}
