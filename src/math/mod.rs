//! Vector and rotation value types.

pub mod rotation;
pub mod vec3;

pub use rotation::Rotation;
pub use vec3::{Position3, Vec3};
