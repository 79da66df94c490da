//! Projectable vertices.

use crate::math::{Position3, Rotation};
use crate::projection::{OffScreen, ProjectedPoint};

/// A vertex of a solid.
///
/// `orig_pos` is the object-local coordinate and is never mutated after
/// construction; `position` is `orig_pos` rotated by the owning solid's
/// current rotation. Re-rotating always starts again from `orig_pos`, so
/// repeated rotations never accumulate drift.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    orig_pos: Position3,
    pub position: Position3,
    /// Screen coordinates from the most recent successful projection.
    pub screen: ProjectedPoint,
}

impl Point {
    pub fn new(orig_pos: Position3) -> Self {
        Self {
            orig_pos,
            position: orig_pos,
            screen: ProjectedPoint::default(),
        }
    }

    pub fn orig_pos(&self) -> Position3 {
        self.orig_pos
    }

    /// Recomputes `position` as `orig_pos` rotated by `rotation`.
    pub fn apply_rotation(&mut self, rotation: Rotation) {
        self.position = self.orig_pos.with_axes_modified(rotation);
    }

    /// Moves the local origin this point is expressed against. Used when a
    /// child solid's vertices are merged into a parent.
    pub(crate) fn rebase(&mut self, offset: Position3) {
        self.orig_pos += offset;
        self.position = self.orig_pos;
    }

    pub fn off_screen(&self) -> OffScreen {
        self.screen.off_screen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use approx::assert_relative_eq;

    #[test]
    fn rotation_is_absolute_not_incremental() {
        let mut point = Point::new(Vec3::new(1.0, 0.0, 0.0));
        let quarter = Rotation::from_degrees(0.0, 0.0, 90.0);
        for _ in 0..5 {
            point.apply_rotation(quarter);
        }
        assert_relative_eq!(point.position.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(point.position.y, 1.0, epsilon = 1e-6);
        assert_eq!(point.orig_pos(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn rebase_shifts_local_origin() {
        let mut point = Point::new(Vec3::ONE);
        point.rebase(Vec3::new(1.0, 0.0, -1.0));
        assert_eq!(point.orig_pos(), Vec3::new(2.0, 1.0, 0.0));
        assert_eq!(point.position, point.orig_pos());
    }
}
