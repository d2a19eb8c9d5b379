pub mod aabb;
pub mod align_policy;
pub mod contact;
pub mod repair;
pub mod static_map;
pub mod zone;

// Re-export key types
pub use aabb::AABB;
pub use align_policy::{CollisionAlignPolicy, ContactMode};
pub use contact::{ContactInfo, ContactRange};
pub use repair::{CollisionRepair, Participant};
pub use static_map::{Bounded, StaticMap};
pub use zone::{ContactSide, Zone};
