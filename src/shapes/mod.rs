pub mod curve;
pub mod curved_box;
pub mod rectangle;

// Re-export the specific shape types
pub use curve::{ControlPoint, Curve, ResolvedPoint};
pub use curved_box::CurvedBox;
pub use rectangle::Rectangle;

use crate::collision::aabb::AABB;
use crate::math::vec2::Vec2;

/// Enum representing the geometric shape of a physical item.
///
/// Only `left`, `bottom`, `width` and `height` are stored by the variants;
/// every other anchor is derived from them and every other setter is
/// expressed with the four primitive setters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rectangle(Rectangle),
    CurvedBox(CurvedBox),
}

impl Default for Shape {
    fn default() -> Self {
        Shape::Rectangle(Rectangle::default())
    }
}

impl From<Rectangle> for Shape {
    fn from(r: Rectangle) -> Self {
        Shape::Rectangle(r)
    }
}

impl From<CurvedBox> for Shape {
    fn from(c: CurvedBox) -> Self {
        Shape::CurvedBox(c)
    }
}

impl Shape {
    /// Tells if this shape intersects another one.
    pub fn intersects(&self, other: &Shape) -> bool {
        match (self, other) {
            (Shape::Rectangle(a), Shape::Rectangle(b)) => a.intersects(b),
            (Shape::Rectangle(r), Shape::CurvedBox(c))
            | (Shape::CurvedBox(c), Shape::Rectangle(r)) => c.intersects_rectangle(r),
            (Shape::CurvedBox(a), Shape::CurvedBox(b)) => a.intersects_curved_box(b),
        }
    }

    /// Same as `intersects()`, ignoring the line width of this shape if it is
    /// a curved box.
    pub fn intersects_strict(&self, other: &Shape) -> bool {
        match self {
            Shape::Rectangle(_) => self.intersects(other),
            Shape::CurvedBox(c) => Shape::CurvedBox(c.strict()).intersects(other),
        }
    }

    // --- Primitive anchors --- //

    pub fn left(&self) -> f64 {
        match self {
            Shape::Rectangle(r) => r.left(),
            Shape::CurvedBox(c) => c.left(),
        }
    }

    pub fn set_left(&mut self, pos: f64) {
        match self {
            Shape::Rectangle(r) => r.set_left(pos),
            Shape::CurvedBox(c) => c.set_left(pos),
        }
    }

    pub fn bottom(&self) -> f64 {
        match self {
            Shape::Rectangle(r) => r.bottom(),
            Shape::CurvedBox(c) => c.bottom(),
        }
    }

    pub fn set_bottom(&mut self, pos: f64) {
        match self {
            Shape::Rectangle(r) => r.set_bottom(pos),
            Shape::CurvedBox(c) => c.set_bottom(pos),
        }
    }

    pub fn width(&self) -> f64 {
        match self {
            Shape::Rectangle(r) => r.width(),
            Shape::CurvedBox(c) => c.width(),
        }
    }

    pub fn set_width(&mut self, width: f64) {
        match self {
            Shape::Rectangle(r) => r.set_width(width),
            Shape::CurvedBox(c) => c.set_width(width),
        }
    }

    pub fn height(&self) -> f64 {
        match self {
            Shape::Rectangle(r) => r.height(),
            Shape::CurvedBox(c) => c.height(),
        }
    }

    pub fn set_height(&mut self, height: f64) {
        match self {
            Shape::Rectangle(r) => r.set_height(height),
            Shape::CurvedBox(c) => c.set_height(height),
        }
    }

    // --- Derived coordinates --- //

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.set_width(size.x);
        self.set_height(size.y);
    }

    pub fn top(&self) -> f64 {
        self.bottom() + self.height()
    }

    pub fn set_top(&mut self, pos: f64) {
        self.set_bottom(pos - self.height());
    }

    pub fn right(&self) -> f64 {
        self.left() + self.width()
    }

    pub fn set_right(&mut self, pos: f64) {
        self.set_left(pos - self.width());
    }

    pub fn horizontal_middle(&self) -> f64 {
        self.left() + self.width() / 2.0
    }

    pub fn set_horizontal_middle(&mut self, pos: f64) {
        self.set_left(pos - self.width() / 2.0);
    }

    pub fn vertical_middle(&self) -> f64 {
        self.bottom() + self.height() / 2.0
    }

    pub fn set_vertical_middle(&mut self, pos: f64) {
        self.set_bottom(pos - self.height() / 2.0);
    }

    // --- Reference points --- //

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.left(), self.top())
    }

    pub fn set_top_left(&mut self, pos: Vec2) {
        self.set_left(pos.x);
        self.set_top(pos.y);
    }

    pub fn top_middle(&self) -> Vec2 {
        Vec2::new(self.horizontal_middle(), self.top())
    }

    pub fn set_top_middle(&mut self, pos: Vec2) {
        self.set_horizontal_middle(pos.x);
        self.set_top(pos.y);
    }

    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.right(), self.top())
    }

    pub fn set_top_right(&mut self, pos: Vec2) {
        self.set_right(pos.x);
        self.set_top(pos.y);
    }

    pub fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.left(), self.bottom())
    }

    pub fn set_bottom_left(&mut self, pos: Vec2) {
        self.set_left(pos.x);
        self.set_bottom(pos.y);
    }

    pub fn bottom_middle(&self) -> Vec2 {
        Vec2::new(self.horizontal_middle(), self.bottom())
    }

    pub fn set_bottom_middle(&mut self, pos: Vec2) {
        self.set_horizontal_middle(pos.x);
        self.set_bottom(pos.y);
    }

    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    pub fn set_bottom_right(&mut self, pos: Vec2) {
        self.set_right(pos.x);
        self.set_bottom(pos.y);
    }

    pub fn left_middle(&self) -> Vec2 {
        Vec2::new(self.left(), self.vertical_middle())
    }

    pub fn set_left_middle(&mut self, pos: Vec2) {
        self.set_left(pos.x);
        self.set_vertical_middle(pos.y);
    }

    pub fn right_middle(&self) -> Vec2 {
        Vec2::new(self.right(), self.vertical_middle())
    }

    pub fn set_right_middle(&mut self, pos: Vec2) {
        self.set_right(pos.x);
        self.set_vertical_middle(pos.y);
    }

    pub fn center_of_mass(&self) -> Vec2 {
        self.bottom_left() + self.size() / 2.0
    }

    pub fn set_center_of_mass(&mut self, pos: Vec2) {
        self.set_bottom_left(pos - self.size() / 2.0);
    }

    pub fn bounding_box(&self) -> AABB {
        AABB::from_bottom_left(self.bottom_left(), self.width(), self.height())
    }

    /// Moves and resizes the shape to cover `rect`.
    pub fn set_bounding_box(&mut self, rect: &AABB) {
        self.set_bottom_left(rect.bottom_left());
        self.set_size(rect.size());
    }
}
