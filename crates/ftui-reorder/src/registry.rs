#![forbid(unsafe_code)]

//! Key → entity registry.
//!
//! The registry is rebuilt from the host's ordered key list every time the
//! collection changes. Entities whose key survives are carried forward through
//! [`ReorderEntity::updated`] instead of being recreated, so in-flight
//! animation state is preserved. A secondary order → key index keeps every
//! scan deterministic (ascending order-id).

use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::entity::ReorderEntity;
use crate::error::{ReorderError, Result};
use crate::position_index::PositionIndex;

/// Bounds required of item keys.
pub trait ReorderKey: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> ReorderKey for T {}

/// Outcome counters for one registry rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncReport {
    /// Keys seen for the first time.
    pub added: usize,
    /// Keys carried over from the previous state.
    pub retained: usize,
    /// Keys that disappeared from the collection.
    pub removed: usize,
}

impl SyncReport {
    /// Whether the rebuild changed the key set.
    #[must_use]
    pub fn changed_membership(&self) -> bool {
        self.added > 0 || self.removed > 0
    }
}

/// Mapping from stable item key to its [`ReorderEntity`].
#[derive(Debug, Clone)]
pub struct Registry<K> {
    entities: FxHashMap<K, ReorderEntity<K>>,
    by_order: BTreeMap<usize, K>,
}

impl<K> Default for Registry<K> {
    fn default() -> Self {
        Self {
            entities: FxHashMap::default(),
            by_order: BTreeMap::new(),
        }
    }
}

impl<K: ReorderKey> PartialEq for Registry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.entities == other.entities && self.by_order == other.by_order
    }
}

impl<K: ReorderKey> Registry<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from the host's ordered key list.
    ///
    /// Each key's live order becomes its position in `keys`. Positions without
    /// a recorded origin in `positions` leave the entity building. On a
    /// duplicate key nothing is modified and the duplicate is reported.
    pub fn rebuild<I>(&mut self, keys: I, positions: &PositionIndex) -> Result<SyncReport>
    where
        I: IntoIterator<Item = K>,
    {
        let keys: Vec<K> = keys.into_iter().collect();

        let mut seen: FxHashMap<&K, usize> = FxHashMap::default();
        seen.reserve(keys.len());
        for (index, key) in keys.iter().enumerate() {
            if let Some(&first) = seen.get(key) {
                return Err(ReorderError::duplicate_key(key, first, index));
            }
            seen.insert(key, index);
        }
        drop(seen);

        let mut entities = FxHashMap::default();
        entities.reserve(keys.len());
        let mut by_order = BTreeMap::new();
        let mut report = SyncReport::default();

        for (index, key) in keys.into_iter().enumerate() {
            let offset = positions.lookup(index);
            let entity = match self.entities.remove(&key) {
                Some(existing) => {
                    report.retained += 1;
                    existing.updated(index, offset)
                }
                None => {
                    report.added += 1;
                    ReorderEntity::create(key.clone(), index, offset)
                }
            };
            by_order.insert(index, key.clone());
            entities.insert(key, entity);
        }

        report.removed = self.entities.len();
        self.entities = entities;
        self.by_order = by_order;
        Ok(report)
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&ReorderEntity<K>> {
        self.entities.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.entities.contains_key(key)
    }

    #[must_use]
    pub fn key_at_order(&self, order: usize) -> Option<&K> {
        self.by_order.get(&order)
    }

    #[must_use]
    pub fn entity_at_order(&self, order: usize) -> Option<&ReorderEntity<K>> {
        self.by_order
            .get(&order)
            .and_then(|key| self.entities.get(key))
    }

    /// Entities in ascending live order.
    pub fn iter_by_order(&self) -> impl Iterator<Item = &ReorderEntity<K>> + '_ {
        self.by_order
            .values()
            .filter_map(|key| self.entities.get(key))
    }

    /// Keys in ascending live order.
    #[must_use]
    pub fn keys_by_order(&self) -> Vec<K> {
        self.by_order.values().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Whether live orders form exactly `0..len`, one entity each.
    #[must_use]
    pub fn has_contiguous_orders(&self) -> bool {
        self.by_order.len() == self.entities.len()
            && self
                .by_order
                .iter()
                .enumerate()
                .all(|(expected, (&order, key))| {
                    order == expected
                        && self
                            .entities
                            .get(key)
                            .is_some_and(|entity| entity.updated_order_id() == order)
                })
    }

    /// Store a new value for an entity, keeping the order index in step.
    pub(crate) fn replace(&mut self, entity: ReorderEntity<K>) {
        let key = entity.key().clone();
        if let Some(previous) = self.entities.get(&key) {
            let previous_order = previous.updated_order_id();
            if self.by_order.get(&previous_order) == Some(&key) {
                self.by_order.remove(&previous_order);
            }
        }
        self.by_order.insert(entity.updated_order_id(), key.clone());
        self.entities.insert(key, entity);
    }

    /// Apply a pure transition to one entity. Returns `false` for unknown keys.
    pub(crate) fn update_entity(
        &mut self,
        key: &K,
        transition: impl FnOnce(ReorderEntity<K>) -> ReorderEntity<K>,
    ) -> bool {
        let Some(entity) = self.entities.get(key).cloned() else {
            return false;
        };
        self.replace(transition(entity));
        true
    }

    /// Collapse every measured entity's original fields onto its updated
    /// fields. Entities still waiting for their first layout stay building.
    pub(crate) fn settle_all(&mut self) {
        for entity in self.entities.values_mut() {
            if !entity.is_building_offset() {
                *entity = entity.clone().position_updated();
            }
        }
    }
}
