//! Resolution of a confirmed collision between two items.

use log::trace;

use crate::collision::align_policy::{CollisionAlignPolicy, ContactMode};
use crate::collision::zone::ContactSide;
use crate::math::vec2::Vec2;
use crate::objects::PhysicalItemState;

/// One of the two items held by a `CollisionRepair`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Participant {
    First,
    Second,
}

impl Participant {
    pub fn other(self) -> Participant {
        match self {
            Participant::First => Participant::Second,
            Participant::Second => Participant::First,
        }
    }
}

/// Repairs the collision of two items: moves one against the other, records
/// their contacts, then exchanges speed along the contact normal.
///
/// The repair borrows both states for the duration of the resolution.
#[derive(Debug)]
pub struct CollisionRepair<'a> {
    first: &'a mut PhysicalItemState,
    second: &'a mut PhysicalItemState,
    reference: Option<Participant>,
    contact_normal: Vec2,
}

impl<'a> CollisionRepair<'a> {
    pub fn new(first: &'a mut PhysicalItemState, second: &'a mut PhysicalItemState) -> Self {
        CollisionRepair {
            first,
            second,
            reference: None,
            contact_normal: Vec2::ZERO,
        }
    }

    pub fn first(&self) -> &PhysicalItemState {
        &*self.first
    }

    pub fn second(&self) -> &PhysicalItemState {
        &*self.second
    }

    pub fn get(&self, participant: Participant) -> &PhysicalItemState {
        match participant {
            Participant::First => &*self.first,
            Participant::Second => &*self.second,
        }
    }

    /// The item designated as reference, if a normal has been set.
    pub fn reference(&self) -> Option<Participant> {
        self.reference
    }

    pub fn contact_normal(&self) -> Vec2 {
        self.contact_normal
    }

    /// Sets the normal of the contact surface, as seen from `reference`.
    pub fn set_contact_normal(&mut self, reference: Participant, normal: Vec2) {
        self.reference = Some(reference);
        self.contact_normal = normal;
    }

    /// Both items, `participant` first.
    fn pair_mut(
        &mut self,
        participant: Participant,
    ) -> (&mut PhysicalItemState, &mut PhysicalItemState) {
        match participant {
            Participant::First => (&mut *self.first, &mut *self.second),
            Participant::Second => (&mut *self.second, &mut *self.first),
        }
    }

    /// Applies the impulse along the contact normal. Does nothing until a
    /// normal has been set.
    pub fn apply(&mut self) {
        let Some(reference) = self.reference else {
            trace!("Collision repair skipped: no contact normal");
            return;
        };

        let normal = self.contact_normal;
        let (reference, other) = self.pair_mut(reference);
        apply_force_transfer(reference, other, normal);
    }

    /// Moves the item that is not `aligner` to `position` and records the
    /// contact through `side` of `aligner`, following `policy`.
    ///
    /// Returns true if the item has been aligned. In that case the contact
    /// normal is set with the aligned item as reference.
    pub fn align(
        &mut self,
        aligner: Participant,
        side: ContactSide,
        position: Vec2,
        policy: &CollisionAlignPolicy,
    ) -> bool {
        let mode = policy.contact_mode();
        let (this, that) = self.pair_mut(aligner);
        let can_align = !that.is_phantom() && this.can_move_items();

        if side == ContactSide::Middle {
            if can_align && mode != ContactMode::NoContact {
                this.set_middle_contact(true);
                that.set_middle_contact(true);
            }
            return false;
        }

        if !can_align {
            return false;
        }

        that.set_bottom_left(position);
        record_contact(this, that, side, mode);

        let normal = match side {
            ContactSide::Left => Vec2::new(-1.0, 0.0),
            ContactSide::Right => Vec2::new(1.0, 0.0),
            ContactSide::Top => Vec2::new(0.0, 1.0),
            ContactSide::Bottom => Vec2::new(0.0, -1.0),
            ContactSide::Middle => Vec2::ZERO,
        };
        self.set_contact_normal(aligner.other(), normal);

        true
    }

    /// Same as `align()`, the position being the one that puts the other item
    /// against `side` of `aligner`, `epsilon` apart.
    pub fn align_on_side(
        &mut self,
        aligner: Participant,
        side: ContactSide,
        policy: &CollisionAlignPolicy,
        epsilon: f64,
    ) -> bool {
        let this = self.get(aligner);
        let that = self.get(aligner.other());

        let position = match side {
            ContactSide::Left => Vec2::new(this.left() - that.width() - epsilon, that.bottom()),
            ContactSide::Right => Vec2::new(this.right() + epsilon, that.bottom()),
            ContactSide::Top => Vec2::new(that.left(), this.top() + epsilon),
            ContactSide::Bottom => Vec2::new(that.left(), this.bottom() - that.height() - epsilon),
            ContactSide::Middle => that.bottom_left(),
        };

        self.align(aligner, side, position, policy)
    }
}

/// Records on both items the contact of `that` against `side` of `this`.
fn record_contact(
    this: &mut PhysicalItemState,
    that: &mut PhysicalItemState,
    side: ContactSide,
    mode: ContactMode,
) {
    match (mode, side) {
        (ContactMode::NoContact, _) | (_, ContactSide::Middle) => {}
        (ContactMode::FullContact, ContactSide::Left) => {
            this.set_left_contact(true);
            that.set_right_contact(true);
        }
        (ContactMode::FullContact, ContactSide::Right) => {
            this.set_right_contact(true);
            that.set_left_contact(true);
        }
        (ContactMode::FullContact, ContactSide::Top) => {
            this.set_top_contact(true);
            that.set_bottom_contact(true);
        }
        (ContactMode::FullContact, ContactSide::Bottom) => {
            this.set_bottom_contact(true);
            that.set_top_contact(true);
        }
        (ContactMode::RangeContact, ContactSide::Left) => {
            this.set_left_contact_range(that.bottom(), that.top());
            that.set_right_contact_range(this.bottom(), this.top());
        }
        (ContactMode::RangeContact, ContactSide::Right) => {
            this.set_right_contact_range(that.bottom(), that.top());
            that.set_left_contact_range(this.bottom(), this.top());
        }
        (ContactMode::RangeContact, ContactSide::Top) => {
            this.set_top_contact_range(that.left(), that.right());
            that.set_bottom_contact_range(this.left(), this.right());
        }
        (ContactMode::RangeContact, ContactSide::Bottom) => {
            this.set_bottom_contact_range(that.left(), that.right());
            that.set_top_contact_range(this.left(), this.right());
        }
    }
}

/// Exchanges speed between two items along `normal`, using the combined
/// restitution of their materials.
fn apply_force_transfer(
    reference: &mut PhysicalItemState,
    other: &mut PhysicalItemState,
    normal: Vec2,
) {
    let relative_velocity = reference.speed() - other.speed();
    let separating_velocity = relative_velocity.dot(normal);

    if separating_velocity >= 0.0 {
        trace!("Collision repair skipped: separating velocity {}", separating_velocity);
        return;
    }

    let restitution = reference
        .material()
        .restitution_with(&other.material())
        .clamp(0.0, 1.0);
    let new_separating_velocity = -separating_velocity * restitution;
    let delta_velocity = new_separating_velocity - separating_velocity;

    debug_assert!(
        reference.mass() > 0.0 && other.mass() > 0.0,
        "masses must be positive: {} and {}",
        reference.mass(),
        other.mass()
    );
    let total_inverse_mass = 1.0 / reference.mass() + 1.0 / other.mass();

    if total_inverse_mass <= 0.0 {
        trace!("Collision repair skipped: both masses are infinite");
        return;
    }

    let impulse = delta_velocity / total_inverse_mass;
    let impulse_vec = normal * impulse;

    trace!(
        "Collision repair: separating velocity {}, restitution {}, impulse {}",
        separating_velocity,
        restitution,
        impulse
    );

    reference.set_speed(reference.speed() + impulse_vec / reference.mass());
    other.set_speed(other.speed() - impulse_vec / other.mass());
}
