//! Renderable solids.
//!
//! Every solid is the same plain struct: a list of points, a list of faces
//! indexing into it, a world offset, an Euler rotation and a colour. The
//! [`SolidKind`] tag records which constructor built it; rendering never
//! needs to dispatch on it.
//!
//! Solids are built once per distinct scene and thrown away when the scene
//! changes. There is no incremental mesh update.

mod cuboid;
mod line;

use crate::colors::Colour;
use crate::geometry::{Face, Point};
use crate::math::{Position3, Rotation, Vec3};

pub use cuboid::OUTLINE_SEGMENTS;

/// Which constructor produced a solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolidKind {
    Cuboid,
    WireframeCuboid,
    Line,
}

/// Outline shell drawn around a cuboid's edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    /// Thickness of each edge bar in world units. Zero means no shell.
    pub width: f32,
    pub colour: Colour,
}

/// Shape-specific part of a [`DrawRequest`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Cuboid {
        size: Vec3,
        outline: Option<Outline>,
    },
    WireframeCuboid {
        size: Vec3,
        border_width: f32,
    },
    /// A thin quad from the request's `position` to `end`.
    Line {
        end: Position3,
        thickness: f32,
        width_direction: Vec3,
    },
}

/// One thing to draw, as supplied by the game layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRequest {
    /// Centre for cuboids, start point for lines.
    pub position: Position3,
    pub rotation: Rotation,
    pub colour: Colour,
    pub shape: Shape,
}

/// A renderable composite of points and faces.
#[derive(Debug, Clone)]
pub struct Solid {
    kind: SolidKind,
    points: Vec<Point>,
    faces: Vec<Face>,
    position: Position3,
    rotation: Rotation,
    size: Option<Vec3>,
    colour: Colour,
}

impl Solid {
    /// Assembles a solid from local geometry and applies its initial rotation.
    pub(crate) fn from_parts(
        kind: SolidKind,
        position: Position3,
        size: Option<Vec3>,
        rotation: Rotation,
        colour: Colour,
        points: Vec<Point>,
        faces: Vec<Face>,
    ) -> Self {
        let mut solid = Self {
            kind,
            points,
            faces,
            position,
            rotation,
            size,
            colour,
        };
        solid.rotate(rotation, true);
        solid
    }

    /// Rotates the solid.
    ///
    /// With `absolute` the rotation replaces the current one; otherwise it is
    /// added to it. Either way every point is recomputed from its original
    /// local position, so the result only depends on the final rotation.
    pub fn rotate(&mut self, rotation: Rotation, absolute: bool) {
        if absolute {
            self.rotation = rotation;
        } else {
            self.rotation += rotation;
        }
        for point in &mut self.points {
            point.apply_rotation(self.rotation);
        }
        for face in &mut self.faces {
            face.update_centroid(&self.points);
        }
    }

    pub fn set_position(&mut self, position: Position3) {
        self.position = position;
    }

    pub fn kind(&self) -> SolidKind {
        self.kind
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Split borrow used by the renderer: points are written during
    /// projection, faces only read.
    pub(crate) fn geometry_mut(&mut self) -> (&mut [Point], &[Face]) {
        (&mut self.points, &self.faces)
    }

    pub fn position(&self) -> Position3 {
        self.position
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Base size; `None` for lines.
    pub fn size(&self) -> Option<Vec3> {
        self.size
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    /// Appends another solid's geometry, re-based so that `child_offset` in
    /// this solid's local frame becomes the child's origin.
    pub(crate) fn merge_local(
        points: &mut Vec<Point>,
        faces: &mut Vec<Face>,
        child_points: Vec<Point>,
        child_faces: Vec<Face>,
        child_offset: Vec3,
    ) {
        let base = points.len();
        points.extend(child_points.into_iter().map(|mut point| {
            point.rebase(child_offset);
            point
        }));
        faces.extend(child_faces.into_iter().map(|mut face| {
            face.offset_indices(base);
            face
        }));
        for face in &mut faces[..] {
            face.update_centroid(points);
        }
    }
}

impl From<&DrawRequest> for Solid {
    fn from(request: &DrawRequest) -> Self {
        let DrawRequest {
            position,
            rotation,
            colour,
            shape,
        } = *request;

        match shape {
            Shape::Cuboid {
                size,
                outline: Some(outline),
            } if outline.width > 0.0 => Solid::outlined_cuboid(
                position,
                size,
                rotation,
                colour,
                outline.width,
                outline.colour,
            ),
            Shape::Cuboid { size, .. } => Solid::cuboid(position, size, rotation, colour),
            Shape::WireframeCuboid { size, border_width } => {
                Solid::wireframe_cuboid(position, size, rotation, colour, border_width)
            }
            Shape::Line {
                end,
                thickness,
                width_direction,
            } => Solid::line(position, end, thickness, width_direction, rotation, colour),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn repeated_rotation_does_not_drift() {
        let mut solid = Solid::cuboid(Vec3::ZERO, Vec3::ONE, Rotation::IDENTITY, Colour::GREEN);
        let step = Rotation::from_degrees(3.0, 7.0, 11.0);
        for _ in 0..100 {
            solid.rotate(step, false);
        }

        let mut fresh = Solid::cuboid(Vec3::ZERO, Vec3::ONE, Rotation::IDENTITY, Colour::GREEN);
        fresh.rotate(solid.rotation(), true);
        for (a, b) in solid.points().iter().zip(fresh.points()) {
            assert_relative_eq!(a.position.x, b.position.x, epsilon = 1e-5);
            assert_relative_eq!(a.position.y, b.position.y, epsilon = 1e-5);
            assert_relative_eq!(a.position.z, b.position.z, epsilon = 1e-5);
        }
    }

    #[test]
    fn rotation_updates_face_centroids() {
        let mut solid = Solid::cuboid(Vec3::ZERO, Vec3::splat(2.0), Rotation::IDENTITY, Colour::GREEN);
        let before: Vec<Vec3> = solid.faces().iter().map(|f| f.centroid()).collect();
        solid.rotate(Rotation::from_degrees(0.0, 0.0, 90.0), true);
        let after: Vec<Vec3> = solid.faces().iter().map(|f| f.centroid()).collect();
        assert_ne!(before, after);
        for centroid in after {
            assert_relative_eq!(centroid.magnitude(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn request_selects_constructor() {
        let base = DrawRequest {
            position: Vec3::ZERO,
            rotation: Rotation::IDENTITY,
            colour: Colour::BLACK,
            shape: Shape::Cuboid {
                size: Vec3::ONE,
                outline: None,
            },
        };
        assert_eq!(Solid::from(&base).kind(), SolidKind::Cuboid);

        let outlined = DrawRequest {
            shape: Shape::Cuboid {
                size: Vec3::ONE,
                outline: Some(Outline {
                    width: 0.1,
                    colour: Colour::WHITE,
                }),
            },
            ..base
        };
        assert_eq!(Solid::from(&outlined).faces().len(), 6 + 12 * 6);

        let wireframe = DrawRequest {
            shape: Shape::WireframeCuboid {
                size: Vec3::ONE,
                border_width: 45.0,
            },
            ..base
        };
        assert_eq!(Solid::from(&wireframe).kind(), SolidKind::WireframeCuboid);

        let line = DrawRequest {
            shape: Shape::Line {
                end: Vec3::new(1.0, 0.0, 0.0),
                thickness: 0.05,
                width_direction: Vec3::UP,
            },
            ..base
        };
        let line = Solid::from(&line);
        assert_eq!(line.kind(), SolidKind::Line);
        assert_eq!(line.size(), None);
    }

    #[test]
    fn line_request_keeps_its_rotation() {
        let request = DrawRequest {
            position: Vec3::ZERO,
            rotation: Rotation::from_degrees(0.0, 0.0, 90.0),
            colour: Colour::BLACK,
            shape: Shape::Line {
                end: Vec3::new(2.0, 0.0, 0.0),
                thickness: 0.05,
                width_direction: Vec3::UP,
            },
        };
        let line = Solid::from(&request);
        assert_eq!(line.rotation(), request.rotation);
        for point in line.points() {
            assert_eq!(point.position, point.orig_pos().with_axes_modified(request.rotation));
        }
    }
}
