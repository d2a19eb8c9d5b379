use std::fmt;

use log::warn;

use crate::collision::aabb::AABB;
use crate::collision::contact::{ContactInfo, ContactRange};
use crate::common::Material;
use crate::math::vec2::Vec2;
use crate::shapes::Shape;

/// Everything of a `PhysicalItemState` but the `fixed` flag, so that copies can
/// take the attributes and decide on fixing separately.
#[derive(Debug, Clone, PartialEq)]
struct PhysicalAttributes {
    // Geometry
    shape: Shape,

    // Movement
    internal_force: Vec2, // Expressed in the item's own axes
    external_force: Vec2,
    acceleration: Vec2,
    speed: Vec2,
    angular_speed: f64,
    system_angle: f64,

    // Physical properties
    mass: f64,
    material: Material,
    contact_friction: f64,

    // Flags
    free_system_angle: bool,
    can_move_items: bool,
    phantom: bool,
    artificial: bool,
    weak_collisions: bool,
    global: bool,

    // Number of active position constraints on each axis
    x_fixed: u32,
    y_fixed: u32,

    contact: ContactInfo,
}

impl Default for PhysicalAttributes {
    fn default() -> Self {
        PhysicalAttributes {
            shape: Shape::default(),
            internal_force: Vec2::ZERO,
            external_force: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            speed: Vec2::ZERO,
            angular_speed: 0.0,
            system_angle: 0.0,
            mass: f64::INFINITY,
            material: Material::default(),
            contact_friction: 1.0,
            free_system_angle: false,
            can_move_items: true,
            phantom: false,
            artificial: false,
            weak_collisions: false,
            global: false,
            x_fixed: 0,
            y_fixed: 0,
            contact: ContactInfo::default(),
        }
    }
}

/// The physical state of a simulated item: its shape, the forces applied to
/// it, its speed, its material and the contacts found during the last
/// collision pass.
///
/// Once `fix()` has been called, the position, size, speed, acceleration and
/// forces can never change again. Each axis can also be locked temporarily with
/// the position constraint counters: a setter leaves an axis untouched while
/// its counter is non-zero.
///
/// A clone is never fixed, even when cloned from a fixed state.
#[derive(Debug, PartialEq, Default)]
pub struct PhysicalItemState {
    attributes: PhysicalAttributes,
    fixed: bool,
}

impl Clone for PhysicalItemState {
    fn clone(&self) -> Self {
        PhysicalItemState {
            attributes: self.attributes.clone(),
            fixed: false,
        }
    }
}

impl PhysicalItemState {
    /// Creates a state with the default properties: infinite mass, a material
    /// that does not bounce and an empty rectangle at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state with the default properties and the given shape.
    pub fn with_shape(shape: impl Into<Shape>) -> Self {
        let mut state = Self::default();
        state.attributes.shape = shape.into();
        state
    }

    fn x_locked(&self) -> bool {
        self.fixed || self.attributes.x_fixed != 0
    }

    fn y_locked(&self) -> bool {
        self.fixed || self.attributes.y_fixed != 0
    }

    /// Writes the unlocked components of `value` into `target`.
    fn write_unlocked(&self, target: Vec2, value: Vec2) -> Vec2 {
        Vec2::new(
            if self.x_locked() { target.x } else { value.x },
            if self.y_locked() { target.y } else { value.y },
        )
    }

    // --- Shape --- //

    pub fn shape(&self) -> &Shape {
        &self.attributes.shape
    }

    /// Replaces the shape. On an axis that is fixed or constrained the previous
    /// position and size are kept.
    pub fn set_shape(&mut self, shape: impl Into<Shape>) {
        let previous = self.bounding_box();
        self.attributes.shape = shape.into();

        if self.x_locked() {
            self.attributes.shape.set_left(previous.left());
            self.attributes.shape.set_width(previous.width());
        }

        if self.y_locked() {
            self.attributes.shape.set_bottom(previous.bottom());
            self.attributes.shape.set_height(previous.height());
        }
    }

    pub fn bounding_box(&self) -> AABB {
        self.attributes.shape.bounding_box()
    }

    pub fn set_bounding_box(&mut self, rect: &AABB) {
        self.set_bottom_left(rect.bottom_left());
        self.set_size(rect.size());
    }

    // --- Primitive geometry --- //

    pub fn left(&self) -> f64 {
        self.attributes.shape.left()
    }

    pub fn set_left(&mut self, pos: f64) {
        if !self.x_locked() {
            self.attributes.shape.set_left(pos);
        }
    }

    pub fn bottom(&self) -> f64 {
        self.attributes.shape.bottom()
    }

    pub fn set_bottom(&mut self, pos: f64) {
        if !self.y_locked() {
            self.attributes.shape.set_bottom(pos);
        }
    }

    pub fn width(&self) -> f64 {
        self.attributes.shape.width()
    }

    pub fn set_width(&mut self, width: f64) {
        if !self.x_locked() {
            self.attributes.shape.set_width(width);
        }
    }

    pub fn height(&self) -> f64 {
        self.attributes.shape.height()
    }

    pub fn set_height(&mut self, height: f64) {
        if !self.y_locked() {
            self.attributes.shape.set_height(height);
        }
    }

    pub fn size(&self) -> Vec2 {
        self.attributes.shape.size()
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.set_width(size.x);
        self.set_height(size.y);
    }

    // --- Derived geometry --- //

    pub fn top(&self) -> f64 {
        self.attributes.shape.top()
    }

    pub fn set_top(&mut self, pos: f64) {
        self.set_bottom(pos - self.height());
    }

    pub fn right(&self) -> f64 {
        self.attributes.shape.right()
    }

    pub fn set_right(&mut self, pos: f64) {
        self.set_left(pos - self.width());
    }

    pub fn horizontal_middle(&self) -> f64 {
        self.attributes.shape.horizontal_middle()
    }

    pub fn set_horizontal_middle(&mut self, pos: f64) {
        self.set_left(pos - self.width() / 2.0);
    }

    pub fn vertical_middle(&self) -> f64 {
        self.attributes.shape.vertical_middle()
    }

    pub fn set_vertical_middle(&mut self, pos: f64) {
        self.set_bottom(pos - self.height() / 2.0);
    }

    pub fn top_left(&self) -> Vec2 {
        self.attributes.shape.top_left()
    }

    pub fn set_top_left(&mut self, pos: Vec2) {
        self.set_left(pos.x);
        self.set_top(pos.y);
    }

    pub fn top_middle(&self) -> Vec2 {
        self.attributes.shape.top_middle()
    }

    pub fn set_top_middle(&mut self, pos: Vec2) {
        self.set_horizontal_middle(pos.x);
        self.set_top(pos.y);
    }

    pub fn top_right(&self) -> Vec2 {
        self.attributes.shape.top_right()
    }

    pub fn set_top_right(&mut self, pos: Vec2) {
        self.set_right(pos.x);
        self.set_top(pos.y);
    }

    pub fn bottom_left(&self) -> Vec2 {
        self.attributes.shape.bottom_left()
    }

    pub fn set_bottom_left(&mut self, pos: Vec2) {
        self.set_left(pos.x);
        self.set_bottom(pos.y);
    }

    pub fn bottom_middle(&self) -> Vec2 {
        self.attributes.shape.bottom_middle()
    }

    pub fn set_bottom_middle(&mut self, pos: Vec2) {
        self.set_horizontal_middle(pos.x);
        self.set_bottom(pos.y);
    }

    pub fn bottom_right(&self) -> Vec2 {
        self.attributes.shape.bottom_right()
    }

    pub fn set_bottom_right(&mut self, pos: Vec2) {
        self.set_right(pos.x);
        self.set_bottom(pos.y);
    }

    pub fn left_middle(&self) -> Vec2 {
        self.attributes.shape.left_middle()
    }

    pub fn set_left_middle(&mut self, pos: Vec2) {
        self.set_left(pos.x);
        self.set_vertical_middle(pos.y);
    }

    pub fn right_middle(&self) -> Vec2 {
        self.attributes.shape.right_middle()
    }

    pub fn set_right_middle(&mut self, pos: Vec2) {
        self.set_right(pos.x);
        self.set_vertical_middle(pos.y);
    }

    pub fn center_of_mass(&self) -> Vec2 {
        self.attributes.shape.center_of_mass()
    }

    pub fn set_center_of_mass(&mut self, pos: Vec2) {
        self.set_bottom_left(pos - self.size() / 2.0);
    }

    /// Moves the item so that its center of mass is on the one of `that`.
    pub fn set_center_on(&mut self, that: &PhysicalItemState) {
        self.set_center_of_mass(that.center_of_mass());
    }

    // --- Forces and movement --- //

    pub fn internal_force(&self) -> Vec2 {
        self.attributes.internal_force
    }

    pub fn set_internal_force(&mut self, force: Vec2) {
        self.attributes.internal_force = self.write_unlocked(self.attributes.internal_force, force);
    }

    pub fn add_internal_force(&mut self, force: Vec2) {
        let sum = self.attributes.internal_force + force;
        self.set_internal_force(sum);
    }

    pub fn external_force(&self) -> Vec2 {
        self.attributes.external_force
    }

    pub fn set_external_force(&mut self, force: Vec2) {
        self.attributes.external_force = self.write_unlocked(self.attributes.external_force, force);
    }

    pub fn add_external_force(&mut self, force: Vec2) {
        let sum = self.attributes.external_force + force;
        self.set_external_force(sum);
    }

    /// Total force applied to the item. The internal force is expressed in the
    /// item's axes and is rotated by the system angle.
    pub fn force(&self) -> Vec2 {
        let x_axis = self.x_axis();
        self.attributes.external_force
            + self.attributes.internal_force.x * x_axis
            + self.attributes.internal_force.y * x_axis.perpendicular()
    }

    pub fn acceleration(&self) -> Vec2 {
        self.attributes.acceleration
    }

    pub fn set_acceleration(&mut self, acceleration: Vec2) {
        self.attributes.acceleration = self.write_unlocked(self.attributes.acceleration, acceleration);
    }

    pub fn speed(&self) -> Vec2 {
        self.attributes.speed
    }

    pub fn set_speed(&mut self, speed: Vec2) {
        self.attributes.speed = self.write_unlocked(self.attributes.speed, speed);
    }

    pub fn angular_speed(&self) -> f64 {
        self.attributes.angular_speed
    }

    pub fn set_angular_speed(&mut self, speed: f64) {
        self.attributes.angular_speed = speed;
    }

    pub fn add_angular_speed(&mut self, speed: f64) {
        self.attributes.angular_speed += speed;
    }

    // --- Orientation --- //

    pub fn system_angle(&self) -> f64 {
        self.attributes.system_angle
    }

    pub fn set_system_angle(&mut self, angle: f64) {
        self.attributes.system_angle = angle;
    }

    /// Aligns the system on the surface the item is touching, unless the
    /// system angle is free.
    pub fn set_contact_angle(&mut self, angle: f64) {
        if !self.attributes.free_system_angle {
            self.attributes.system_angle = angle;
        }
    }

    pub fn has_free_system(&self) -> bool {
        self.attributes.free_system_angle
    }

    pub fn set_free_system(&mut self, free: bool) {
        self.attributes.free_system_angle = free;
    }

    /// Unit vector of the item's x-axis.
    pub fn x_axis(&self) -> Vec2 {
        Vec2::from_angle(self.attributes.system_angle)
    }

    // --- Physical properties --- //

    pub fn mass(&self) -> f64 {
        self.attributes.mass
    }

    pub fn set_mass(&mut self, mass: f64) {
        self.attributes.mass = mass;
    }

    pub fn material(&self) -> Material {
        self.attributes.material
    }

    pub fn set_material(&mut self, material: Material) {
        self.attributes.material = material;
    }

    pub fn density(&self) -> f64 {
        self.attributes.material.density
    }

    pub fn set_density(&mut self, density: f64) {
        self.attributes.material.density = density;
    }

    /// Friction applied to the item's own movement.
    pub fn friction(&self) -> f64 {
        self.attributes.material.friction
    }

    pub fn set_friction(&mut self, friction: f64) {
        self.attributes.material.friction = friction;
    }

    /// Friction of the surfaces the item is touching.
    pub fn contact_friction(&self) -> f64 {
        self.attributes.contact_friction
    }

    pub fn set_contact_friction(&mut self, friction: f64) {
        self.attributes.contact_friction = friction;
    }

    pub fn elasticity(&self) -> f64 {
        self.attributes.material.elasticity
    }

    pub fn set_elasticity(&mut self, elasticity: f64) {
        self.attributes.material.elasticity = elasticity;
    }

    pub fn hardness(&self) -> f64 {
        self.attributes.material.hardness
    }

    pub fn set_hardness(&mut self, hardness: f64) {
        self.attributes.material.hardness = hardness;
    }

    // --- Fixing and constraints --- //

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Stops the item and locks its position forever.
    pub fn fix(&mut self) {
        self.attributes.speed = Vec2::ZERO;
        self.attributes.acceleration = Vec2::ZERO;
        self.fixed = true;
    }

    pub fn x_constraints(&self) -> u32 {
        self.attributes.x_fixed
    }

    pub fn y_constraints(&self) -> u32 {
        self.attributes.y_fixed
    }

    pub fn add_position_constraint_x(&mut self) {
        self.attributes.x_fixed = self.attributes.x_fixed.saturating_add(1);
    }

    pub fn add_position_constraint_y(&mut self) {
        self.attributes.y_fixed = self.attributes.y_fixed.saturating_add(1);
    }

    pub fn add_position_constraints(&mut self) {
        self.add_position_constraint_x();
        self.add_position_constraint_y();
    }

    /// Releases one constraint on the x-axis. Without a matching
    /// `add_position_constraint_x()` the counter stays at zero.
    pub fn remove_position_constraint_x(&mut self) {
        match self.attributes.x_fixed.checked_sub(1) {
            Some(count) => self.attributes.x_fixed = count,
            None => warn!("Removing a position constraint on x from an unconstrained item"),
        }
    }

    /// Releases one constraint on the y-axis. Without a matching
    /// `add_position_constraint_y()` the counter stays at zero.
    pub fn remove_position_constraint_y(&mut self) {
        match self.attributes.y_fixed.checked_sub(1) {
            Some(count) => self.attributes.y_fixed = count,
            None => warn!("Removing a position constraint on y from an unconstrained item"),
        }
    }

    pub fn remove_position_constraints(&mut self) {
        self.remove_position_constraint_x();
        self.remove_position_constraint_y();
    }

    // --- Flags --- //

    pub fn can_move_items(&self) -> bool {
        self.attributes.can_move_items
    }

    pub fn set_can_move_items(&mut self, value: bool) {
        self.attributes.can_move_items = value;
    }

    pub fn is_phantom(&self) -> bool {
        self.attributes.phantom
    }

    pub fn set_phantom(&mut self, phantom: bool) {
        self.attributes.phantom = phantom;
    }

    pub fn is_artificial(&self) -> bool {
        self.attributes.artificial
    }

    pub fn set_artificial(&mut self, artificial: bool) {
        self.attributes.artificial = artificial;
    }

    pub fn has_weak_collisions(&self) -> bool {
        self.attributes.weak_collisions
    }

    pub fn set_weak_collisions(&mut self, weak: bool) {
        self.attributes.weak_collisions = weak;
    }

    /// A global item is processed even when it is far from the active region.
    pub fn is_global(&self) -> bool {
        self.attributes.global
    }

    pub fn set_global(&mut self, global: bool) {
        self.attributes.global = global;
    }

    // --- Contacts --- //

    pub fn contact_info(&self) -> &ContactInfo {
        &self.attributes.contact
    }

    pub fn has_left_contact(&self) -> bool {
        self.attributes.contact.has_left_contact()
    }

    pub fn has_right_contact(&self) -> bool {
        self.attributes.contact.has_right_contact()
    }

    pub fn has_top_contact(&self) -> bool {
        self.attributes.contact.has_top_contact()
    }

    pub fn has_bottom_contact(&self) -> bool {
        self.attributes.contact.has_bottom_contact()
    }

    pub fn has_middle_contact(&self) -> bool {
        self.attributes.contact.has_middle_contact()
    }

    pub fn has_side_contact(&self) -> bool {
        self.attributes.contact.has_side_contact()
    }

    pub fn has_contact(&self) -> bool {
        self.attributes.contact.has_contact()
    }

    pub fn left_contact(&self) -> ContactRange {
        self.attributes.contact.left_contact()
    }

    pub fn right_contact(&self) -> ContactRange {
        self.attributes.contact.right_contact()
    }

    pub fn top_contact(&self) -> ContactRange {
        self.attributes.contact.top_contact()
    }

    pub fn bottom_contact(&self) -> ContactRange {
        self.attributes.contact.bottom_contact()
    }

    /// Marks the whole left side as touching, or clears it.
    pub fn set_left_contact(&mut self, contact: bool) {
        if contact {
            self.attributes.contact.set_left_contact(0.0, 1.0);
        } else {
            self.attributes.contact.clear_left_contact();
        }
    }

    /// Marks the part of the left side between the world y-coordinates
    /// `bottom` and `top` as touching.
    pub fn set_left_contact_range(&mut self, bottom: f64, top: f64) {
        let (min, max) = normalize_range(bottom, top, self.bottom(), self.height());
        self.attributes.contact.set_left_contact(min, max);
    }

    pub fn set_right_contact(&mut self, contact: bool) {
        if contact {
            self.attributes.contact.set_right_contact(0.0, 1.0);
        } else {
            self.attributes.contact.clear_right_contact();
        }
    }

    pub fn set_right_contact_range(&mut self, bottom: f64, top: f64) {
        let (min, max) = normalize_range(bottom, top, self.bottom(), self.height());
        self.attributes.contact.set_right_contact(min, max);
    }

    pub fn set_top_contact(&mut self, contact: bool) {
        if contact {
            self.attributes.contact.set_top_contact(0.0, 1.0);
        } else {
            self.attributes.contact.clear_top_contact();
        }
    }

    /// Marks the part of the top side between the world x-coordinates `left`
    /// and `right` as touching.
    pub fn set_top_contact_range(&mut self, left: f64, right: f64) {
        let (min, max) = normalize_range(left, right, self.left(), self.width());
        self.attributes.contact.set_top_contact(min, max);
    }

    pub fn set_bottom_contact(&mut self, contact: bool) {
        if contact {
            self.attributes.contact.set_bottom_contact(0.0, 1.0);
        } else {
            self.attributes.contact.clear_bottom_contact();
        }
    }

    pub fn set_bottom_contact_range(&mut self, left: f64, right: f64) {
        let (min, max) = normalize_range(left, right, self.left(), self.width());
        self.attributes.contact.set_bottom_contact(min, max);
    }

    pub fn set_middle_contact(&mut self, contact: bool) {
        self.attributes.contact.set_middle_contact(contact);
    }

    /// Forgets every contact and restores the neutral contact friction.
    pub fn clear_contacts(&mut self) {
        self.attributes.contact.clear_contacts();
        self.attributes.contact_friction = 1.0;
    }

    // --- Whole state --- //

    /// Copies every attribute of `that`, constraint counters included, unless
    /// this state is fixed. The result is fixed if `that` is.
    pub fn set_physical_state(&mut self, that: &PhysicalItemState) {
        if self.fixed {
            return;
        }

        self.attributes = that.attributes.clone();

        if that.fixed {
            self.fix();
        }
    }
}

/// Converts the world interval `[a, b]` into a fraction of the side starting at
/// `origin` with the given `length`, both ends clamped to `[0, 1]`. A side of
/// zero length records no contact.
fn normalize_range(a: f64, b: f64, origin: f64, length: f64) -> (f64, f64) {
    debug_assert!(a <= b, "contact range is reversed: [{}, {}]", a, b);

    if length <= 0.0 {
        return (0.0, 0.0);
    }

    (
        ((a - origin) / length).clamp(0.0, 1.0),
        ((b - origin) / length).clamp(0.0, 1.0),
    )
}

impl fmt::Display for PhysicalItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = &self.attributes;

        writeln!(f, "mass: {}", a.mass)?;
        writeln!(f, "pos: {} {}", self.left(), self.bottom())?;
        writeln!(f, "size: {} {}", self.width(), self.height())?;
        writeln!(f, "speed: {} {}", a.speed.x, a.speed.y)?;
        writeln!(f, "accel: {} {}", a.acceleration.x, a.acceleration.y)?;
        writeln!(f, "angular speed: {}", a.angular_speed)?;
        writeln!(f, "force (int.): {} {}", a.internal_force.x, a.internal_force.y)?;
        writeln!(f, "force (ext.): {} {}", a.external_force.x, a.external_force.y)?;
        writeln!(f, "friction: s={} c={}", a.material.friction, a.contact_friction)?;
        writeln!(f, "density: {}", a.material.density)?;
        writeln!(f, "angle: {}", a.system_angle)?;
        writeln!(f, "fixed: {} {} {}", self.fixed, a.x_fixed, a.y_fixed)?;
        writeln!(
            f,
            "phantom/c.m.i./art./weak.: {} {} {} {}",
            a.phantom, a.can_move_items, a.artificial, a.weak_collisions
        )?;

        write!(f, "contact: {{ ")?;
        let sides = [
            ("left", a.contact.left_contact()),
            ("right", a.contact.right_contact()),
            ("top", a.contact.top_contact()),
            ("bottom", a.contact.bottom_contact()),
        ];
        for (name, range) in sides.iter().filter(|(_, r)| !r.empty()) {
            write!(f, "{} [{}, {}] ", name, range.min(), range.max())?;
        }
        if a.contact.has_middle_contact() {
            write!(f, "middle ")?;
        }
        write!(f, "}}")
    }
}
