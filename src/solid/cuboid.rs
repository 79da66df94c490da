//! Procedural cuboids.
//!
//! # Vertices
//!
//! Four sign patterns of the half extents are enumerated with X fixed
//! positive-or-negative, and each is added together with its point
//! reflection, giving all 8 corners without duplicates.
//!
//! # Faces
//!
//! For each axis and each sign, the 4 corners whose coordinate on that axis
//! equals the extremal value form a face. They are ordered with the clockwise
//! sort over the two axes spanning that face.
//!
//! # Outline shell
//!
//! An outlined cuboid carries one thin bar per edge. Each bar is itself a
//! cuboid whose points are re-based into the parent's local frame, so the
//! parent renders and rotates as a single object.

use log::warn;

use super::{Solid, SolidKind};
use crate::colors::Colour;
use crate::geometry::{sort_clockwise, AxisPair, Face, Point};
use crate::math::{Position3, Rotation, Vec3};

/// Number of edge bars in an outline shell.
pub const OUTLINE_SEGMENTS: usize = 12;

impl Solid {
    /// A filled cuboid of `size` centred on `position`.
    pub fn cuboid(position: Position3, size: Vec3, rotation: Rotation, colour: Colour) -> Self {
        let (points, faces) = cuboid_geometry(size, colour);
        Solid::from_parts(
            SolidKind::Cuboid,
            position,
            Some(size),
            rotation,
            colour,
            points,
            faces,
        )
    }

    /// A filled cuboid with a bar of `outline_width` along each of its edges.
    ///
    /// A non-positive `outline_width` gives a plain cuboid.
    pub fn outlined_cuboid(
        position: Position3,
        size: Vec3,
        rotation: Rotation,
        colour: Colour,
        outline_width: f32,
        outline_colour: Colour,
    ) -> Self {
        let (mut points, mut faces) = cuboid_geometry(size, colour);
        if outline_width > 0.0 && !points.is_empty() {
            for (centre, bar_size) in outline_bars(&points, outline_width) {
                let (bar_points, bar_faces) = cuboid_geometry(bar_size, outline_colour);
                Solid::merge_local(&mut points, &mut faces, bar_points, bar_faces, centre);
            }
        }
        Solid::from_parts(
            SolidKind::Cuboid,
            position,
            Some(size),
            rotation,
            colour,
            points,
            faces,
        )
    }

    /// A cuboid drawn as six bordered outlines. `border_width` is the border
    /// in pixels at distance 1 from the camera.
    pub fn wireframe_cuboid(
        position: Position3,
        size: Vec3,
        rotation: Rotation,
        colour: Colour,
        border_width: f32,
    ) -> Self {
        let (points, faces) = cuboid_geometry(size, colour);
        let faces = faces
            .into_iter()
            .map(|face| face.into_wireframe(border_width))
            .collect();
        Solid::from_parts(
            SolidKind::WireframeCuboid,
            position,
            Some(size),
            rotation,
            colour,
            points,
            faces,
        )
    }
}

/// Builds the 8 corners and 6 faces of an axis-aligned cuboid centred on the
/// local origin. Any non-positive or non-finite dimension gives no geometry.
fn cuboid_geometry(size: Vec3, colour: Colour) -> (Vec<Point>, Vec<Face>) {
    if !(size.is_finite() && size.x > 0.0 && size.y > 0.0 && size.z > 0.0) {
        warn!("skipping degenerate cuboid of size {size}");
        return (Vec::new(), Vec::new());
    }

    let half = size / 2.0;
    let patterns = [
        Vec3::new(half.x, half.y, half.z),
        Vec3::new(-half.x, half.y, half.z),
        Vec3::new(half.x, -half.y, half.z),
        Vec3::new(-half.x, -half.y, half.z),
    ];
    let points: Vec<Point> = patterns
        .into_iter()
        .flat_map(|corner| [Point::new(corner), Point::new(-corner)])
        .collect();

    let mut faces = Vec::with_capacity(6);
    for axis in 0..3 {
        for extreme in [half.axis(axis), -half.axis(axis)] {
            let members: Vec<usize> = (0..points.len())
                .filter(|&i| points[i].orig_pos().axis(axis) == extreme)
                .collect();
            let positions: Vec<Vec3> = members.iter().map(|&i| points[i].orig_pos()).collect();
            let order = sort_clockwise(&positions, AxisPair::perpendicular_to(axis));
            let indices = order.into_iter().map(|k| members[k]).collect();
            faces.push(Face::new(indices, &points, colour));
        }
    }

    (points, faces)
}

/// Centre and size of each outline bar, in the parent's local frame.
///
/// Edges join corner pairs that differ on exactly one axis. Each edge is
/// oriented to agree with `(1, 1, 1)` so its direction never depends on which
/// corner was enumerated first. Bars are pushed outward by half their
/// thickness so they sit flush against the parent's faces, and span exactly
/// the edge length.
fn outline_bars(corners: &[Point], thickness: f32) -> Vec<(Vec3, Vec3)> {
    let mut bars = Vec::with_capacity(OUTLINE_SEGMENTS);
    for i in 0..corners.len() {
        for j in (i + 1)..corners.len() {
            let a = corners[i].orig_pos();
            let b = corners[j].orig_pos();
            let differing: Vec<usize> = (0..3).filter(|&axis| a.axis(axis) != b.axis(axis)).collect();
            let [edge_axis] = differing[..] else {
                continue;
            };

            let mut direction = b - a;
            if direction.dot(Vec3::ONE) < 0.0 {
                direction = -direction;
            }
            let length = direction.axis(edge_axis).abs();

            let midpoint = (a + b) / 2.0;
            let mut centre = midpoint;
            let mut bar_size = Vec3::splat(thickness);
            for axis in 0..3 {
                if axis == edge_axis {
                    bar_size = bar_size.with_axis(axis, length);
                } else {
                    let outward = midpoint.axis(axis).signum() * thickness / 2.0;
                    centre = centre.with_axis(axis, midpoint.axis(axis) + outward);
                }
            }
            bars.push((centre, bar_size));
        }
    }
    bars
}
