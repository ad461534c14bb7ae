//! Axis-aligned rectangle geometry
//!
//! Screen coordinates: x grows right, y grows down, `pos` is the top-left
//! corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Bounding box of a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self {
            pos: center - Vec2::splat(radius),
            size: Vec2::splat(radius * 2.0),
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
        self.pos + self.size / 2.0
    }

    /// Open-interval overlap on the x axis (touching edges do not count)
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }

    /// Open-interval overlap on the y axis (touching edges do not count)
    pub fn overlaps_y(&self, other: &Aabb) -> bool {
        self.top() < other.bottom() && self.bottom() > other.top()
    }

    /// Strict overlap on both axes
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }

    /// Same box moved by `delta`
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            pos: self.pos + delta,
            size: self.size,
        }
    }
}
