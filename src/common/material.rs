//! Defines physical material properties.

/// The physical properties of an item affecting movement and collisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Density of the item.
    pub density: f64,
    /// Friction applied to the item's own movement. Range [0, 1].
    /// 1 keeps the whole speed, 0 stops the item.
    pub friction: f64,
    /// How much of an impact the item gives back. Range [0, infinity).
    pub elasticity: f64,
    /// How much the item resists deformation on impact. Range [0, infinity).
    pub hardness: f64,
}

impl Material {
    /// Creates a new material with the given properties.
    pub fn new(density: f64, friction: f64, elasticity: f64, hardness: f64) -> Self {
        Material {
            // Clamp values to reasonable ranges
            density: density.max(0.0),
            friction: friction.clamp(0.0, 1.0),
            elasticity: elasticity.max(0.0),
            hardness: hardness.max(0.0),
        }
    }

    /// Combined restitution of an impact between `self`, the reference item,
    /// and `other`. Not clamped.
    pub fn restitution_with(&self, other: &Material) -> f64 {
        self.hardness * other.elasticity + self.elasticity * other.hardness
    }
}

impl Default for Material {
    /// Properties of a new physical item: light friction, hard and not elastic.
    fn default() -> Self {
        Material {
            density: 1.0,
            friction: 0.98,
            elasticity: 0.0,
            hardness: 1.0,
        }
    }
}
