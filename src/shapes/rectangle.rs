use crate::collision::aabb::AABB;
use crate::math::vec2::Vec2;

/// An axis-aligned rectangle given by its bottom-left corner and its size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rectangle {
    bottom_left: Vec2,
    size: Vec2,
}

impl Rectangle {
    /// Creates a new rectangle. Negative dimensions are treated as zero.
    pub fn new(bottom_left: Vec2, size: Vec2) -> Self {
        Rectangle {
            bottom_left,
            size: Vec2::new(size.x.max(0.0), size.y.max(0.0)),
        }
    }

    pub fn left(&self) -> f64 {
        self.bottom_left.x
    }

    pub fn set_left(&mut self, pos: f64) {
        self.bottom_left.x = pos;
    }

    pub fn bottom(&self) -> f64 {
        self.bottom_left.y
    }

    pub fn set_bottom(&mut self, pos: f64) {
        self.bottom_left.y = pos;
    }

    pub fn width(&self) -> f64 {
        self.size.x
    }

    pub fn set_width(&mut self, width: f64) {
        self.size.x = width.max(0.0);
    }

    pub fn height(&self) -> f64 {
        self.size.y
    }

    pub fn set_height(&mut self, height: f64) {
        self.size.y = height.max(0.0);
    }

    pub fn bounding_box(&self) -> AABB {
        AABB::from_bottom_left(self.bottom_left, self.size.x, self.size.y)
    }

    /// Overlap on a strictly positive area. Rectangles sharing only an edge do
    /// not intersect.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.bounding_box().overlaps(&other.bounding_box())
    }
}
