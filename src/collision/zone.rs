//! Position of a box relative to another one.

use crate::collision::aabb::AABB;

/// The nine zones around a reference box. `Middle` is the box itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    TopLeft,
    TopMiddle,
    TopRight,
    MiddleLeft,
    Middle,
    MiddleRight,
    BottomLeft,
    BottomMiddle,
    BottomRight,
}

impl Zone {
    /// Finds the zone of `reference` in which `that` lies. A box only touching
    /// an edge of the reference is outside of it.
    pub fn find(that: &AABB, reference: &AABB) -> Zone {
        let above = that.bottom() >= reference.top();
        let below = that.top() <= reference.bottom();
        let on_left = that.right() <= reference.left();
        let on_right = that.left() >= reference.right();

        if above {
            if on_left {
                Zone::TopLeft
            } else if on_right {
                Zone::TopRight
            } else {
                Zone::TopMiddle
            }
        } else if below {
            if on_left {
                Zone::BottomLeft
            } else if on_right {
                Zone::BottomRight
            } else {
                Zone::BottomMiddle
            }
        } else if on_left {
            Zone::MiddleLeft
        } else if on_right {
            Zone::MiddleRight
        } else {
            Zone::Middle
        }
    }
}

/// The side of an item through which a collision is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactSide {
    Left,
    Right,
    Top,
    Bottom,
    Middle,
}

impl ContactSide {
    pub fn opposite(self) -> ContactSide {
        match self {
            ContactSide::Left => ContactSide::Right,
            ContactSide::Right => ContactSide::Left,
            ContactSide::Top => ContactSide::Bottom,
            ContactSide::Bottom => ContactSide::Top,
            ContactSide::Middle => ContactSide::Middle,
        }
    }
}

impl From<Zone> for ContactSide {
    // Corners are handled vertically.
    fn from(zone: Zone) -> Self {
        match zone {
            Zone::TopLeft | Zone::TopMiddle | Zone::TopRight => ContactSide::Top,
            Zone::BottomLeft | Zone::BottomMiddle | Zone::BottomRight => ContactSide::Bottom,
            Zone::MiddleLeft => ContactSide::Left,
            Zone::MiddleRight => ContactSide::Right,
            Zone::Middle => ContactSide::Middle,
        }
    }
}
