//! A box whose top edge is a cubic curve, used for slopes.

use crate::collision::aabb::AABB;
use crate::math::vec2::Vec2;
use crate::shapes::curve::{ControlPoint, Curve};
use crate::shapes::rectangle::Rectangle;

/// A rectangle with a curved top.
///
/// The curve runs between two anchors placed at `height - margin` on the left
/// and right edges. A positive `steepness` lowers the left anchor, a negative
/// one lowers the right anchor. The control vectors are relative to their
/// anchor. The reported height includes the top margin.
///
/// A box lying above the curve still intersects it while its bottom is less
/// than `line_width` above the curve. The default width is zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CurvedBox {
    bottom_left: Vec2,
    size: Vec2,
    steepness: f64,
    margin: f64,
    left_control_point: Vec2,
    right_control_point: Vec2,
    line_width: f64,
}

impl CurvedBox {
    /// Creates a flat curved box: no steepness, no margin and control points on
    /// the anchors.
    pub fn new(bottom_left: Vec2, size: Vec2) -> Self {
        CurvedBox {
            bottom_left,
            size: Vec2::new(size.x.max(0.0), size.y.max(0.0)),
            ..Default::default()
        }
    }

    pub fn with_steepness(mut self, steepness: f64) -> Self {
        self.steepness = steepness;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_control_points(mut self, left: Vec2, right: Vec2) -> Self {
        self.left_control_point = left;
        self.right_control_point = right;
        self
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width.max(0.0);
        self
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.line_width = width.max(0.0);
    }

    /// A copy of this box with no tolerance above the curve.
    pub fn strict(&self) -> CurvedBox {
        self.with_line_width(0.0)
    }

    pub fn steepness(&self) -> f64 {
        self.steepness
    }

    pub fn set_steepness(&mut self, steepness: f64) {
        self.steepness = steepness;
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn set_margin(&mut self, margin: f64) {
        self.margin = margin;
    }

    pub fn left_control_point(&self) -> Vec2 {
        self.left_control_point
    }

    pub fn set_left_control_point(&mut self, p: Vec2) {
        self.left_control_point = p;
    }

    pub fn right_control_point(&self) -> Vec2 {
        self.right_control_point
    }

    pub fn set_right_control_point(&mut self, p: Vec2) {
        self.right_control_point = p;
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
        self.size.y + self.margin
    }

    /// Sets the height, margin included. The base part never goes below zero.
    pub fn set_height(&mut self, height: f64) {
        self.size.y = (height - self.margin).max(0.0);
    }

    pub fn right(&self) -> f64 {
        self.left() + self.width()
    }

    pub fn top(&self) -> f64 {
        self.bottom() + self.height()
    }

    pub fn bounding_box(&self) -> AABB {
        AABB::from_bottom_left(self.bottom_left, self.width(), self.height())
    }

    /// The curve of the top edge, in coordinates relative to the bottom-left
    /// corner of the box.
    pub fn get_curve(&self) -> Curve {
        let mut left_anchor = Vec2::new(0.0, self.height() - self.margin);
        let mut right_anchor = Vec2::new(self.width(), self.height() - self.margin);

        if self.steepness > 0.0 {
            left_anchor.y -= self.steepness;
        } else {
            right_anchor.y += self.steepness;
        }

        let left_control = self.left_control_point + left_anchor;
        let right_control = self.right_control_point + right_anchor;

        Curve::new(
            ControlPoint::new(left_anchor, left_anchor, left_control),
            ControlPoint::new(right_anchor, right_control, right_anchor),
        )
    }

    /// World y-coordinate of the top edge at world x-coordinate `x`. Returns the
    /// bottom of the box when `x` is not covered by the curve.
    pub fn get_y_at_x(&self, x: f64) -> f64 {
        let points = self.get_curve().points_at_x(x - self.left());
        match points.first() {
            Some(p) => self.bottom() + p.position.y,
            None => self.bottom(),
        }
    }

    pub fn intersects_rectangle(&self, that: &Rectangle) -> bool {
        let other = that.bounding_box();
        if other.bottom() > self.bottom() {
            self.check_intersection_above(&other)
        } else {
            self.bounding_box().overlaps(&other)
        }
    }

    pub fn intersects_curved_box(&self, that: &CurvedBox) -> bool {
        // The lowest box holds the reference bottom.
        if that.bottom() < self.bottom() {
            return that.intersects_curved_box(self);
        }

        let other = that.bounding_box();
        if other.bottom() > self.bottom() {
            self.check_intersection_above(&other)
        } else {
            self.bounding_box().overlaps(&other)
        }
    }

    /// Intersection test for a box whose bottom is above our bottom.
    fn check_intersection_above(&self, other: &AABB) -> bool {
        if other.bottom() >= self.top() {
            return false;
        }

        let middle = (other.left() + other.right()) / 2.0;

        if middle < self.left() {
            other.right() > self.left()
        } else if middle > self.right() {
            other.left() < self.right()
        } else {
            other.bottom() < self.get_y_at_x(middle) + self.line_width
        }
    }
}
