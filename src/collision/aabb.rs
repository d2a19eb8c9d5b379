// Axis-aligned bounding rectangle used for shapes, items and map queries.

use crate::math::vec2::Vec2;

/// An Axis-Aligned Bounding Box defined by its bottom-left (`min`) and
/// top-right (`max`) corners. The y axis points up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AABB {
    pub min: Vec2,
    pub max: Vec2,
}

impl AABB {
    /// Creates a new AABB from two opposite corners, in any order.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        AABB {
            min: Vec2::new(min.x.min(max.x), min.y.min(max.y)),
            max: Vec2::new(min.x.max(max.x), min.y.max(max.y)),
        }
    }

    /// Creates an AABB from its bottom-left corner and its size.
    /// Negative sizes are treated as zero.
    pub fn from_bottom_left(bottom_left: Vec2, width: f64, height: f64) -> Self {
        AABB {
            min: bottom_left,
            max: bottom_left + Vec2::new(width.max(0.0), height.max(0.0)),
        }
    }

    pub fn left(&self) -> f64 {
        self.min.x
    }

    pub fn right(&self) -> f64 {
        self.max.x
    }

    pub fn bottom(&self) -> f64 {
        self.min.y
    }

    pub fn top(&self) -> f64 {
        self.max.y
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn bottom_left(&self) -> Vec2 {
        self.min
    }

    /// Closed intersection test: boxes sharing only an edge or a corner intersect.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// The common part of two boxes, or `None` if they do not intersect.
    pub fn intersection(&self, other: &AABB) -> Option<AABB> {
        if !self.intersects(other) {
            return None;
        }
        Some(AABB {
            min: Vec2::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            max: Vec2::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        })
    }

    /// Checks if the two boxes overlap on a strictly positive area.
    pub fn overlaps(&self, other: &AABB) -> bool {
        match self.intersection(other) {
            Some(inter) => inter.width() != 0.0 && inter.height() != 0.0,
            None => false,
        }
    }

    /// Checks if a point lies in the box, borders included.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}
