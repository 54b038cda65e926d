#![forbid(unsafe_code)]

//! Geometric primitives for reorder hit testing.
//!
//! Coordinates are host pixels (or cells) in content space, origin at the
//! top-left of the scrollable content. Values are floating point so hosts can
//! report sub-cell layout.

use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2D coordinate, used for item offsets and pointer deltas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// Measured dimensions of an item.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemSize {
    pub width: f32,
    pub height: f32,
}

impl ItemSize {
    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Check if either dimension is zero or negative.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// How the far edges of an item rectangle are treated by hit tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CollisionBounds {
    /// `[offset, offset + size]` on both axes.
    #[default]
    Closed,
    /// `[offset, offset + size)` on both axes.
    HalfOpen,
}

/// An item rectangle as reported by a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemRect {
    /// Top-left corner.
    pub origin: Point,
    pub size: ItemSize,
}

impl ItemRect {
    /// Create a rectangle from its components.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: ItemSize::new(width, height),
        }
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub const fn from_parts(origin: Point, size: ItemSize) -> Self {
        Self { origin, size }
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Check if a point falls inside the rectangle under the given bounds policy.
    #[inline]
    pub fn contains(&self, point: Point, bounds: CollisionBounds) -> bool {
        if point.x < self.origin.x || point.y < self.origin.y {
            return false;
        }
        match bounds {
            CollisionBounds::Closed => point.x <= self.right() && point.y <= self.bottom(),
            CollisionBounds::HalfOpen => point.x < self.right() && point.y < self.bottom(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, 5.0);
        assert_eq!(a + b, Point::new(4.0, 7.0));
        assert_eq!(b - a, Point::new(2.0, 3.0));
        assert!((a.distance_squared(b) - 13.0).abs() < f32::EPSILON);
    }

    #[test]
    fn closed_bounds_include_far_edges() {
        let rect = ItemRect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(Point::new(10.0, 10.0), CollisionBounds::Closed));
        assert!(rect.contains(Point::new(30.0, 30.0), CollisionBounds::Closed));
        assert!(!rect.contains(Point::new(30.1, 20.0), CollisionBounds::Closed));
        assert!(!rect.contains(Point::new(9.9, 20.0), CollisionBounds::Closed));
    }

    #[test]
    fn half_open_bounds_exclude_far_edges() {
        let rect = ItemRect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(Point::new(10.0, 10.0), CollisionBounds::HalfOpen));
        assert!(!rect.contains(Point::new(30.0, 15.0), CollisionBounds::HalfOpen));
        assert!(!rect.contains(Point::new(15.0, 30.0), CollisionBounds::HalfOpen));
    }

    #[test]
    fn empty_size() {
        assert!(ItemSize::ZERO.is_empty());
        assert!(ItemSize::new(10.0, 0.0).is_empty());
        assert!(!ItemSize::new(1.0, 1.0).is_empty());
    }
}
