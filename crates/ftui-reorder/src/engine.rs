#![forbid(unsafe_code)]

//! Drag session controller.
//!
//! [`ReorderEngine`] owns the registry, the position index and the drag phase.
//! Every drag step returns a [`DragTransition`] carrying a monotonically
//! increasing id, the phase before and after, and what happened:
//!
//! ```text
//! Idle --start_drag--> Dragging --drag_move*--> Dragging --end_drag----> Idle
//!                                                       \--cancel_drag--> Idle
//! ```
//!
//! Steps that cannot apply in the current phase are reported as
//! [`DragEffect::Noop`] with an explicit reason rather than as errors.

use crate::collision::{CollisionOutcome, find_collision, resolve_collision};
use crate::config::ReorderConfig;
use crate::error::{ReorderError, Result};
use crate::geometry::{ItemRect, Point};
use crate::hints::RenderHint;
use crate::host::LayoutHost;
use crate::position_index::PositionIndex;
use crate::registry::{Registry, ReorderKey, SyncReport};
use crate::reorder::ReorderEvent;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coarse drag phase reported in transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DragPhaseKind {
    #[default]
    Idle,
    Dragging,
}

/// Why a drag step was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DragNoopReason {
    IdleWithoutActiveDrag,
    ActiveDragAlreadyInProgress,
    KeyMismatch,
    DraggingDisabled,
    LockedItem,
    ItemStillBuilding,
    BelowHysteresis,
    NoCollision,
    LockedTarget,
}

/// Effect emitted by one drag step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "effect", rename_all = "snake_case"))]
pub enum DragEffect {
    Started {
        order: usize,
        origin: Point,
    },
    Collided {
        outcome: CollisionOutcome,
    },
    Committed {
        reorder: Option<ReorderEvent>,
        collisions: usize,
    },
    Canceled {
        collisions: usize,
    },
    Noop {
        reason: DragNoopReason,
    },
}

/// One drag state-machine step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DragTransition {
    pub transition_id: u64,
    pub from: DragPhaseKind,
    pub to: DragPhaseKind,
    pub effect: DragEffect,
}

impl DragTransition {
    /// The reorder event committed by this step, if any.
    #[must_use]
    pub fn reorder(&self) -> Option<ReorderEvent> {
        match self.effect {
            DragEffect::Committed { reorder, .. } => reorder,
            _ => None,
        }
    }

    /// The no-op reason, if the step was ignored.
    #[must_use]
    pub fn noop_reason(&self) -> Option<DragNoopReason> {
        match self.effect {
            DragEffect::Noop { reason } => Some(reason),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct DragSession<K> {
    key: K,
    start_offset: Point,
    start_scroll: Point,
    /// Reference point of the last collision scan.
    last_scan_point: Option<Point>,
    snapshot: Registry<K>,
    /// First layout reports received mid-drag; replayed on cancel.
    first_layouts: Vec<(K, ItemRect)>,
    collisions: usize,
}

#[derive(Debug, Clone)]
enum DragPhase<K> {
    Idle,
    Dragging(DragSession<K>),
}

/// Reorder state for one grid or list.
#[derive(Debug, Clone)]
pub struct ReorderEngine<K> {
    registry: Registry<K>,
    positions: PositionIndex,
    config: ReorderConfig,
    phase: DragPhase<K>,
    transition_counter: u64,
}

impl<K: ReorderKey> Default for ReorderEngine<K> {
    fn default() -> Self {
        Self::with_config(ReorderConfig::default())
    }
}

impl<K: ReorderKey> ReorderEngine<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: ReorderConfig) -> Self {
        Self {
            registry: Registry::new(),
            positions: PositionIndex::new(),
            config,
            phase: DragPhase::Idle,
            transition_counter: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &Registry<K> {
        &self.registry
    }

    #[must_use]
    pub fn positions(&self) -> &PositionIndex {
        &self.positions
    }

    #[must_use]
    pub fn phase(&self) -> DragPhaseKind {
        match self.phase {
            DragPhase::Idle => DragPhaseKind::Idle,
            DragPhase::Dragging(_) => DragPhaseKind::Dragging,
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    /// Key of the item currently being dragged.
    #[must_use]
    pub fn dragged_key(&self) -> Option<&K> {
        match &self.phase {
            DragPhase::Idle => None,
            DragPhase::Dragging(session) => Some(&session.key),
        }
    }

    /// Id of the most recent transition; zero before the first one.
    #[must_use]
    pub const fn transition_counter(&self) -> u64 {
        self.transition_counter
    }

    /// Replace the set of positions that never take part in a swap.
    pub fn set_locked_positions(&mut self, positions: impl IntoIterator<Item = usize>) {
        self.config.locked_positions = positions.into_iter().collect();
        tracing::debug!(
            message = "reorder.locked_positions",
            locked = self.config.locked_positions.len()
        );
    }

    pub fn set_drag_enabled(&mut self, enabled: bool) {
        self.config.drag_enabled = enabled;
    }

    /// Rebuild the registry from the host's ordered key list.
    ///
    /// # Errors
    ///
    /// [`ReorderError::DragInProgress`] while a drag is active and
    /// [`ReorderError::DuplicateKey`] when `keys` repeats a key. Either way
    /// the previous state is kept.
    pub fn sync_items<I>(&mut self, keys: I) -> Result<SyncReport>
    where
        I: IntoIterator<Item = K>,
    {
        if self.is_dragging() {
            tracing::debug!(message = "reorder.sync.rejected", reason = "drag_in_progress");
            return Err(ReorderError::DragInProgress);
        }
        match self.registry.rebuild(keys, &self.positions) {
            Ok(report) => {
                self.positions.retain_below(self.registry.len());
                tracing::debug!(
                    message = "reorder.sync",
                    added = report.added,
                    retained = report.retained,
                    removed = report.removed,
                    len = self.registry.len()
                );
                Ok(report)
            }
            Err(err) => {
                tracing::warn!(message = "reorder.sync.rejected", error = %err);
                Err(err)
            }
        }
    }

    /// Feed one completed layout measurement.
    ///
    /// Returns `false` when the report was ignored: unknown key, or an already
    /// measured item while a drag is active.
    pub fn layout_completed(&mut self, key: &K, rect: ItemRect) -> bool {
        let dragging = self.is_dragging();
        let Some(entity) = self.registry.get(key) else {
            tracing::debug!(message = "reorder.layout.unknown_key", key = ?key);
            return false;
        };
        let order = entity.updated_order_id();

        if entity.is_building_offset() {
            self.finish_building(key, rect);
            tracing::trace!(message = "reorder.layout.measured", key = ?key, order);
            if let DragPhase::Dragging(session) = &mut self.phase {
                session.first_layouts.push((key.clone(), rect));
            }
        } else if dragging {
            return false;
        } else if entity.updated_offset() == rect.origin {
            self.registry
                .update_entity(key, |entity| entity.with_size(rect.size));
        } else {
            self.registry.update_entity(key, |entity| {
                entity.updated(order, Some(rect.origin)).with_size(rect.size)
            });
        }

        if !dragging {
            self.positions.record(order, rect.origin);
        }
        true
    }

    /// Ask the host for every item's geometry. Returns how many were applied.
    pub fn remeasure(&mut self, host: &impl LayoutHost<K>) -> usize {
        let mut applied = 0;
        for key in self.registry.keys_by_order() {
            if let Some(rect) = host.measure_item(&key)
                && self.layout_completed(&key, rect)
            {
                applied += 1;
            }
        }
        applied
    }

    /// Begin dragging `key`.
    ///
    /// # Errors
    ///
    /// [`ReorderError::UnknownKey`] when `key` is not tracked.
    pub fn start_drag(&mut self, key: &K, host: &impl LayoutHost<K>) -> Result<DragTransition> {
        let from = self.phase();
        if self.is_dragging() {
            return Ok(self.noop(from, DragNoopReason::ActiveDragAlreadyInProgress));
        }
        let entity = self
            .registry
            .get(key)
            .ok_or_else(|| ReorderError::unknown_key(key))?;
        let order = entity.updated_order_id();
        let origin = entity.updated_offset();

        let refusal = if !self.config.drag_enabled {
            Some(DragNoopReason::DraggingDisabled)
        } else if self.config.is_locked(order) {
            Some(DragNoopReason::LockedItem)
        } else if entity.is_building_offset() {
            Some(DragNoopReason::ItemStillBuilding)
        } else {
            None
        };
        if let Some(reason) = refusal {
            return Ok(self.noop(from, reason));
        }

        self.phase = DragPhase::Dragging(DragSession {
            key: key.clone(),
            start_offset: origin,
            start_scroll: host.scroll_offset(),
            last_scan_point: None,
            snapshot: self.registry.clone(),
            first_layouts: Vec::new(),
            collisions: 0,
        });
        tracing::debug!(
            message = "reorder.drag_start",
            key = ?key,
            order,
            x = origin.x,
            y = origin.y
        );
        Ok(self.transition(from, DragEffect::Started { order, origin }))
    }

    /// Pointer moved by `pointer_delta` since the gesture started.
    pub fn drag_move(
        &mut self,
        key: &K,
        pointer_delta: Point,
        host: &impl LayoutHost<K>,
    ) -> DragTransition {
        let from = self.phase();
        let effect = match &mut self.phase {
            DragPhase::Idle => DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutActiveDrag,
            },
            DragPhase::Dragging(session) if &session.key != key => DragEffect::Noop {
                reason: DragNoopReason::KeyMismatch,
            },
            DragPhase::Dragging(session) => {
                let scroll_shift = host.scroll_offset() - session.start_scroll;
                let point = session.start_offset + pointer_delta + scroll_shift;
                let hysteresis = self.config.drag_update_hysteresis;
                let below_hysteresis = session.last_scan_point.is_some_and(|last| {
                    last.distance_squared(point) < hysteresis * hysteresis
                });
                if below_hysteresis {
                    DragEffect::Noop {
                        reason: DragNoopReason::BelowHysteresis,
                    }
                } else {
                    session.last_scan_point = Some(point);
                    let target = find_collision(
                        &self.registry,
                        &session.key,
                        point,
                        self.config.collision_bounds,
                    )
                    .map(|entity| entity.updated_order_id());

                    match target.and_then(|order| {
                        resolve_collision(
                            &mut self.registry,
                            &session.key,
                            order,
                            &self.config.locked_positions,
                        )
                    }) {
                        None => DragEffect::Noop {
                            reason: DragNoopReason::NoCollision,
                        },
                        Some(CollisionOutcome::LockedTarget { order }) => {
                            tracing::trace!(message = "reorder.collision.locked", order);
                            DragEffect::Noop {
                                reason: DragNoopReason::LockedTarget,
                            }
                        }
                        Some(outcome) => {
                            session.collisions += 1;
                            tracing::debug!(
                                message = "reorder.collision",
                                key = ?session.key,
                                outcome = ?outcome
                            );
                            DragEffect::Collided { outcome }
                        }
                    }
                }
            }
        };
        self.transition(from, effect)
    }

    /// Finish the gesture, settle every item and report the move.
    pub fn end_drag(&mut self) -> DragTransition {
        let from = self.phase();
        let DragPhase::Dragging(session) = std::mem::replace(&mut self.phase, DragPhase::Idle)
        else {
            return self.noop(from, DragNoopReason::IdleWithoutActiveDrag);
        };
        let _span =
            tracing::debug_span!("reorder.drag_end", collisions = session.collisions).entered();

        let reorder = self.recover_reorder(&session);
        self.positions.refresh_from(&self.registry);
        self.registry.settle_all();

        match reorder {
            Some(event) => tracing::debug!(
                message = "reorder.commit",
                old_index = event.old_index,
                new_index = event.new_index
            ),
            None => tracing::debug!(message = "reorder.commit", moved = false),
        }
        self.transition(
            from,
            DragEffect::Committed {
                reorder,
                collisions: session.collisions,
            },
        )
    }

    /// Abort the gesture and restore the registry as it was at drag start.
    ///
    /// Items that received their first layout during the drag keep that
    /// measurement; the host will not report it again.
    pub fn cancel_drag(&mut self) -> DragTransition {
        let from = self.phase();
        let DragPhase::Dragging(session) = std::mem::replace(&mut self.phase, DragPhase::Idle)
        else {
            return self.noop(from, DragNoopReason::IdleWithoutActiveDrag);
        };
        self.registry = session.snapshot;
        for (key, rect) in &session.first_layouts {
            if let Some(order) = self.finish_building(key, *rect) {
                self.positions.record(order, rect.origin);
            }
        }
        tracing::debug!(
            message = "reorder.drag_cancel",
            key = ?session.key,
            collisions = session.collisions,
            replayed = session.first_layouts.len()
        );
        self.transition(
            from,
            DragEffect::Canceled {
                collisions: session.collisions,
            },
        )
    }

    /// The host finished animating `key`. Returns `false` when there was
    /// nothing to settle.
    pub fn animation_finished(&mut self, key: &K) -> bool {
        let Some(entity) = self.registry.get(key) else {
            return false;
        };
        if entity.is_building_offset() {
            return false;
        }
        if entity.is_new() {
            self.registry.update_entity(key, |entity| entity.faded_in())
        } else {
            self.registry
                .update_entity(key, |entity| entity.position_updated())
        }
    }

    /// One hint per item, in ascending live order.
    #[must_use]
    pub fn render_hints(&self) -> Vec<RenderHint<K>> {
        let dragged = self.dragged_key();
        self.registry
            .iter_by_order()
            .map(|entity| RenderHint::from_entity(entity, dragged == Some(entity.key())))
            .collect()
    }

    /// Apply a first measurement. Returns the entity's order when it applied.
    fn finish_building(&mut self, key: &K, rect: ItemRect) -> Option<usize> {
        let order = self.registry.get(key)?.updated_order_id();
        self.registry.update_entity(key, |entity| {
            entity
                .creation_finished(Some(rect.origin))
                .with_size(rect.size)
        });
        Some(order)
    }

    fn recover_reorder(&self, session: &DragSession<K>) -> Option<ReorderEvent> {
        let current = self.registry.get(&session.key)?.updated_offset();
        if current == session.start_offset {
            return None;
        }
        match self.positions.recover_indices(session.start_offset, current) {
            (Some(old_index), Some(new_index)) if old_index != new_index => {
                Some(ReorderEvent::new(old_index, new_index))
            }
            (old_index, new_index) => {
                tracing::debug!(
                    message = "reorder.commit.unresolved",
                    old_index = ?old_index,
                    new_index = ?new_index
                );
                None
            }
        }
    }

    fn noop(&mut self, from: DragPhaseKind, reason: DragNoopReason) -> DragTransition {
        self.transition(from, DragEffect::Noop { reason })
    }

    fn transition(&mut self, from: DragPhaseKind, effect: DragEffect) -> DragTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        DragTransition {
            transition_id: self.transition_counter,
            from,
            to: self.phase(),
            effect,
        }
    }
}
