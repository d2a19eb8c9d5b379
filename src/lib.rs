//! Physical simulation core of a 2D platform game engine.
//!
//! Items are axis-aligned rectangles or curved boxes (rectangles with a curved
//! top, for slopes). Each item carries a [`PhysicalItemState`]. A per-frame
//! driver owned by the game moves the items with [`integrate`], finds the
//! candidates for collision in a [`StaticMap`], tests them with
//! [`Shape::intersects`] and repairs confirmed collisions with a
//! [`CollisionRepair`].

pub mod math;
pub mod objects;
pub mod integration;
pub mod collision;
pub mod shapes;
pub mod common;
pub mod config;
pub mod error;

// Re-export key types for easier use
pub use math::vec2::Vec2;
pub use objects::PhysicalItemState;
pub use shapes::{CurvedBox, Rectangle, Shape};
pub use collision::{
    Bounded, CollisionAlignPolicy, CollisionRepair, ContactInfo, ContactMode, ContactRange,
    ContactSide, Participant, StaticMap, Zone, AABB,
};
pub use integration::{integrate, settle};
pub use common::Material;
pub use config::PhysicsConfig;
pub use error::{PhysicsError, PhysicsResult};
