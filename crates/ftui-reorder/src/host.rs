#![forbid(unsafe_code)]

//! Capabilities the engine borrows from its host.
//!
//! The engine never walks a widget tree. Whatever renders the items implements
//! [`LayoutHost`] so the engine can ask for geometry and scroll position on
//! demand.

use crate::geometry::{ItemRect, Point};

/// Geometry provider implemented by the rendering adapter.
pub trait LayoutHost<K> {
    /// Current rectangle of an item in content coordinates, or `None` when the
    /// item has not been laid out yet.
    fn measure_item(&self, key: &K) -> Option<ItemRect>;

    /// Current scroll offset of the container holding the items.
    fn scroll_offset(&self) -> Point;
}

/// A host with fixed geometry and no scrolling.
///
/// Handy for tests and for hosts that push every measurement through
/// `layout_completed` and never scroll.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticHost {
    scroll: Point,
}

impl StaticHost {
    #[must_use]
    pub const fn new() -> Self {
        Self { scroll: Point::ZERO }
    }

    /// Report a fixed scroll offset.
    #[must_use]
    pub const fn with_scroll(scroll: Point) -> Self {
        Self { scroll }
    }
}

impl<K> LayoutHost<K> for StaticHost {
    fn measure_item(&self, _key: &K) -> Option<ItemRect> {
        None
    }

    fn scroll_offset(&self) -> Point {
        self.scroll
    }
}
