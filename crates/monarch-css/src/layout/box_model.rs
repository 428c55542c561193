//! Box geometry.

use serde::Serialize;

/// An axis-aligned rectangle given by its edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl Rect {
    /// Create a rectangle from its edges.
    #[must_use]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and a size.
    #[must_use]
    pub fn from_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Half-open containment: the left and top edges are inside, the right
    /// and bottom edges are not.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Whether any part of the rectangle lies within the band `[top, bottom]`.
    #[must_use]
    pub fn overlaps_vertically(&self, top: f32, bottom: f32) -> bool {
        self.bottom >= top && self.top <= bottom
    }
}
