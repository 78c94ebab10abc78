//! Axis-aligned rectangles and overlap testing
//!
//! Screen coordinates: origin top-left, y grows downward.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (exclusive), saturating at `i32::MAX`
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// Bottom edge (exclusive), saturating at `i32::MAX`
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Horizontal centre, rounded toward the left edge
    #[inline]
    pub const fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    /// Whether the interiors of `self` and `other` overlap
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        intersects(self, other)
    }
}

/// Strict AABB overlap test
///
/// Rectangles that only share an edge do not intersect.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}
