//! Thick lines as single quads.

use log::warn;

use super::{Solid, SolidKind};
use crate::colors::Colour;
use crate::geometry::{Face, Point};
use crate::math::{Position3, Rotation, Vec3};

impl Solid {
    /// A flat quad from `start` to `end`, `thickness` wide along
    /// `width_direction`, turned by `rotation` about its midpoint.
    ///
    /// The solid sits at the midpoint of the two ends; its four points are
    /// the ends pushed either way along the normalised width direction.
    /// Coincident ends or a zero width direction give an empty solid.
    pub fn line(
        start: Position3,
        end: Position3,
        thickness: f32,
        width_direction: Vec3,
        rotation: Rotation,
        colour: Colour,
    ) -> Self {
        let position = (start + end) / 2.0;
        let half = (end - start) / 2.0;

        let degenerate = half.magnitude_squared() == 0.0
            || width_direction.magnitude_squared() == 0.0
            || !(half.is_finite() && width_direction.is_finite());
        let (points, faces) = if degenerate {
            warn!("skipping degenerate line from {start} to {end}");
            (Vec::new(), Vec::new())
        } else {
            let offset = width_direction.normalize() * (thickness / 2.0);
            let points: Vec<Point> = [-half + offset, half + offset, half - offset, -half - offset]
                .into_iter()
                .map(Point::new)
                .collect();
            let face = Face::new(vec![0, 1, 2, 3], &points, colour);
            (points, vec![face])
        };

        Solid::from_parts(
            SolidKind::Line,
            position,
            None,
            rotation,
            colour,
            points,
            faces,
        )
    }
}
