//! Tuning values of the physics core.
//!
//! Loaded from JSON by the embedding game. Missing fields take their default.

use serde::{Deserialize, Serialize};

use crate::collision::align_policy::{CollisionAlignPolicy, ContactMode};
use crate::collision::static_map::{Bounded, StaticMap};
use crate::error::{PhysicsError, PhysicsResult};
use crate::math::vec2::Vec2;

/// Physics settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Size of the cells of the broad-phase map
    pub map_box_size: f64,
    /// Gap left between two aligned items
    pub position_epsilon: f64,
    /// Speed components below these values are set to zero
    pub speed_epsilon: Vec2,
    /// Angular speeds below this value are set to zero
    pub angular_speed_epsilon: f64,
    /// Contacts recorded when aligning items
    pub default_contact_mode: ContactMode,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            map_box_size: 256.0,
            position_epsilon: 0.001,
            speed_epsilon: Vec2::new(1.0, 1.0),
            angular_speed_epsilon: 0.01,
            default_contact_mode: ContactMode::FullContact,
        }
    }
}

impl PhysicsConfig {
    /// Parses and validates a configuration.
    pub fn from_json(json: &str) -> PhysicsResult<Self> {
        let config: PhysicsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> PhysicsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> PhysicsResult<()> {
        if !(self.map_box_size.is_finite() && self.map_box_size > 0.0) {
            return Err(PhysicsError::InvalidBoxSize(self.map_box_size));
        }

        let epsilons = [
            ("position_epsilon", self.position_epsilon),
            ("speed_epsilon.x", self.speed_epsilon.x),
            ("speed_epsilon.y", self.speed_epsilon.y),
            ("angular_speed_epsilon", self.angular_speed_epsilon),
        ];
        for (name, value) in epsilons {
            if !(value.is_finite() && value >= 0.0) {
                return Err(PhysicsError::invalid_epsilon(name, value));
            }
        }

        Ok(())
    }

    /// A map covering `[0, width] x [0, height]` with the configured cells.
    pub fn static_map<T: Bounded>(&self, width: f64, height: f64) -> PhysicsResult<StaticMap<T>> {
        StaticMap::try_new(width, height, self.map_box_size)
    }

    pub fn align_policy(&self) -> CollisionAlignPolicy {
        CollisionAlignPolicy::new(self.default_contact_mode)
    }
}
