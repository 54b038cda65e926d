#![forbid(unsafe_code)]

//! Drag-to-reorder engine for grids and lists.
//!
//! The host owns rendering and gesture recognition. It hands the engine its
//! ordered item keys, reports item geometry, and forwards drag start, move and
//! end. The engine tracks each item's committed and live order, swaps items as
//! the dragged one passes over them, and reports a single
//! [`ReorderEvent`] per completed drag.
//!
//! ```
//! use ftui_reorder::{ItemRect, Point, ReorderEngine, StaticHost, apply_reorder};
//!
//! let mut items = vec!["a", "b", "c"];
//! let mut engine = ReorderEngine::new();
//! engine.sync_items(items.iter().copied()).unwrap();
//! for (i, key) in items.iter().enumerate() {
//!     engine.layout_completed(key, ItemRect::new(0.0, i as f32 * 20.0, 80.0, 20.0));
//! }
//!
//! let host = StaticHost::new();
//! engine.start_drag(&"a", &host).unwrap();
//! engine.drag_move(&"a", Point::new(0.0, 25.0), &host);
//! if let Some(event) = engine.end_drag().reorder() {
//!     apply_reorder(&mut items, event);
//! }
//! assert_eq!(items, vec!["b", "a", "c"]);
//! ```

pub mod collision;
pub mod config;
pub mod engine;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod hints;
pub mod host;
pub mod position_index;
pub mod registry;
pub mod reorder;

pub use collision::{CollisionOutcome, find_collision};
#[cfg(feature = "policy-config")]
pub use config::ConfigError;
pub use config::ReorderConfig;
pub use engine::{DragEffect, DragNoopReason, DragPhaseKind, DragTransition, ReorderEngine};
pub use entity::ReorderEntity;
pub use error::{ReorderError, Result};
pub use geometry::{CollisionBounds, ItemRect, ItemSize, Point};
pub use hints::{ItemTransition, RenderHint};
pub use host::{LayoutHost, StaticHost};
pub use position_index::PositionIndex;
pub use registry::{Registry, ReorderKey, SyncReport};
pub use reorder::{ReorderEvent, apply_reorder};
