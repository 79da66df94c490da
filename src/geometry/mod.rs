//! Projectable geometry: vertices, faces and face winding.

pub mod face;
pub mod point;
pub mod winding;

pub use face::{Face, FaceStyle};
pub use point::Point;
pub use winding::{sort_clockwise, AxisPair};
