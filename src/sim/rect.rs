//! Axis-aligned bounding boxes
//!
//! Screen coordinates: x grows right, y grows down. `(x, y)` is the top-left
//! corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A bounding box `{x, y, width, height}`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width * 0.5
    }

    /// Move the top-left corner
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Offset by a displacement
    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Vertical spans overlap (open interval)
    #[inline]
    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        self.top() < other.bottom() && self.bottom() > other.top()
    }

    /// Strictly inside `other` horizontally
    #[inline]
    pub fn within_horizontally(&self, other: &Rect) -> bool {
        self.left() > other.left() && self.right() < other.right()
    }
}
