//! Axis-aligned rectangle geometry and overlap tests
//!
//! Everything on screen is a rectangle in surface pixels, origin top-left,
//! y growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Scale the rectangle about its centre (1.0 = unchanged)
    pub fn scaled(&self, factor: f32) -> Self {
        let size = self.size * factor;
        Self {
            pos: self.center() - size * 0.5,
            size,
        }
    }

    /// Strict overlap: rectangles that only share an edge do not touch
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Overlap test with both hitboxes scaled by the forgiveness factor
pub fn hitboxes_overlap(a: &Rect, b: &Rect, hitbox_scale: f32) -> bool {
    a.scaled(hitbox_scale).overlaps(&b.scaled(hitbox_scale))
}
