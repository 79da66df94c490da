//! Drawable polygons.
//!
//! A [`Face`] refers to its vertices by index into the owning solid's point
//! list, so projecting the solid's points once per frame is enough for every
//! face that shares them.

use crate::colors::Colour;
use crate::math::{Position3, Vec3};

use super::point::Point;

/// Smallest border a wireframe face is drawn with, in pixels.
pub const MIN_BORDER_PX: f32 = 1.0;

/// How a face is put on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FaceStyle {
    /// Flat-coloured filled polygon.
    Filled,
    /// Border only. `border_width` is the pixel width at distance 1; it
    /// shrinks with distance down to [`MIN_BORDER_PX`].
    Wireframe { border_width: f32 },
}

/// An ordered, consistently wound polygon of at least three coplanar points.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    indices: Vec<usize>,
    /// Mean of the vertices' rotated local positions.
    centroid: Position3,
    pub colour: Colour,
    pub style: FaceStyle,
}

impl Face {
    /// Creates a filled face over `indices` into `points`.
    pub fn new(indices: Vec<usize>, points: &[Point], colour: Colour) -> Self {
        debug_assert!(indices.len() >= 3, "a face needs at least three points");
        let mut face = Self {
            indices,
            centroid: Vec3::ZERO,
            colour,
            style: FaceStyle::Filled,
        };
        face.update_centroid(points);
        face
    }

    /// Turns this face into a bordered outline.
    pub fn into_wireframe(mut self, border_width: f32) -> Self {
        self.style = FaceStyle::Wireframe { border_width };
        self
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn centroid(&self) -> Position3 {
        self.centroid
    }

    /// Recomputes the centroid after the owning solid rotates.
    pub fn update_centroid(&mut self, points: &[Point]) {
        let sum = self
            .indices
            .iter()
            .fold(Vec3::ZERO, |acc, &i| acc + points[i].position);
        self.centroid = sum / self.indices.len().max(1) as f32;
    }

    /// Shifts every index by `offset`. Used when merging point lists.
    pub(crate) fn offset_indices(&mut self, offset: usize) {
        for index in &mut self.indices {
            *index += offset;
        }
    }

    /// Border width in pixels for a face `distance` units from the camera.
    pub fn border_px(&self, distance: f32) -> Option<f32> {
        match self.style {
            FaceStyle::Filled => None,
            FaceStyle::Wireframe { border_width } => {
                let scaled = if distance > 0.0 {
                    border_width / distance
                } else {
                    border_width
                };
                Some(scaled.max(MIN_BORDER_PX))
            }
        }
    }

    /// True when every vertex shares at least one off-screen flag, so the
    /// whole face is uniformly behind the camera or past one canvas edge.
    ///
    /// Faces whose points leave the canvas in different directions are kept,
    /// even though parts of them may be distorted.
    pub fn is_culled(&self, points: &[Point]) -> bool {
        (0..5).any(|flag| {
            self.indices
                .iter()
                .all(|&i| points[i].off_screen().flags()[flag])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{OffScreen, ProjectedPoint};

    fn square() -> Vec<Point> {
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 2.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
        ]
        .into_iter()
        .map(Point::new)
        .collect()
    }

    fn flag(points: &mut [Point], which: &[usize], off_screen: OffScreen) {
        for &i in which {
            points[i].screen = ProjectedPoint {
                x: 0,
                y: 0,
                off_screen,
            };
        }
    }

    const LEFT: OffScreen = OffScreen {
        behind: false,
        left: true,
        right: false,
        above: false,
        below: false,
    };

    #[test]
    fn centroid_is_mean_of_points() {
        let points = square();
        let face = Face::new(vec![0, 1, 2, 3], &points, Colour::GREEN);
        assert_eq!(face.centroid(), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn face_entirely_left_is_culled() {
        let mut points = square();
        flag(&mut points, &[0, 1, 2, 3], LEFT);
        let face = Face::new(vec![0, 1, 2, 3], &points, Colour::GREEN);
        assert!(face.is_culled(&points));
    }

    #[test]
    fn face_partly_left_is_drawn() {
        let mut points = square();
        flag(&mut points, &[0, 1], LEFT);
        let face = Face::new(vec![0, 1, 2, 3], &points, Colour::GREEN);
        assert!(!face.is_culled(&points));
    }

    #[test]
    fn mixed_directions_are_drawn() {
        let mut points = square();
        flag(&mut points, &[0, 1], LEFT);
        flag(
            &mut points,
            &[2, 3],
            OffScreen {
                right: true,
                ..OffScreen::default()
            },
        );
        let face = Face::new(vec![0, 1, 2, 3], &points, Colour::GREEN);
        assert!(!face.is_culled(&points));
    }

    #[test]
    fn border_shrinks_with_distance_down_to_minimum() {
        let points = square();
        let face = Face::new(vec![0, 1, 2, 3], &points, Colour::GREEN).into_wireframe(45.0);
        assert_eq!(face.border_px(9.0), Some(5.0));
        assert_eq!(face.border_px(1000.0), Some(MIN_BORDER_PX));
        let filled = Face::new(vec![0, 1, 2], &points, Colour::GREEN);
        assert_eq!(filled.border_px(9.0), None);
    }
}
