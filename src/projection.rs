//! Perspective projection parameters.
//!
//! The [`Projection`] struct is the single source of truth for how camera-space
//! coordinates map to pixels: it stores the canvas size and the tangents of the
//! half field of view, re-derived whenever the canvas changes size.

use crate::config::{validate_canvas, validate_fov};
use crate::error::Result;
use crate::math::vec3::Vec3;

/// Per-point off-screen classification.
///
/// The five flags are independent: a point can be behind the camera and past
/// the left edge at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OffScreen {
    pub behind: bool,
    pub left: bool,
    pub right: bool,
    pub above: bool,
    pub below: bool,
}

impl OffScreen {
    /// The flags in a fixed order: behind, left, right, above, below.
    pub fn flags(&self) -> [bool; 5] {
        [self.behind, self.left, self.right, self.above, self.below]
    }

    pub fn any(&self) -> bool {
        self.flags().iter().any(|&flag| flag)
    }
}

/// A point's pixel coordinates for the current frame.
///
/// Coordinates are not clipped: flagged points can sit far outside the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectedPoint {
    pub x: i32,
    pub y: i32,
    pub off_screen: OffScreen,
}

/// Perspective projection for a canvas of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees.
    fov: f32,
    width: u32,
    height: u32,
    /// `tan(fov / 2)`.
    vfov: f32,
    /// `aspect_ratio * tan(fov / 2)`.
    hfov: f32,
}

impl Projection {
    /// Creates a projection, rejecting fov outside (0, 180) degrees and empty canvases.
    pub fn new(fov: f32, width: u32, height: u32) -> Result<Self> {
        validate_fov(fov)?;
        validate_canvas(width, height)?;
        let tangent = (fov.to_radians() / 2.0).tan();
        let aspect_ratio = width as f32 / height as f32;
        Ok(Self {
            fov,
            width,
            height,
            vfov: tangent,
            hfov: aspect_ratio * tangent,
        })
    }

    /// Re-derives the tangents for a new canvas size.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        *self = Self::new(self.fov, width, height)?;
        Ok(())
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn vfov(&self) -> f32 {
        self.vfov
    }

    pub fn hfov(&self) -> f32 {
        self.hfov
    }

    /// Projects a camera-space point to pixel coordinates.
    ///
    /// Returns `None` when the point lies in the camera plane (`z == 0`),
    /// where the projection is undefined. Points behind the camera are
    /// mirrored (both coordinates negated) and flagged `behind`.
    pub fn project(&self, camera_space: Vec3) -> Option<ProjectedPoint> {
        let Vec3 { x, y, z } = camera_space;
        if z == 0.0 {
            return None;
        }

        let width = self.width as f32;
        let height = self.height as f32;
        let mut screen_x = ((x / (z * self.hfov) + 0.5) * width).floor();
        let mut screen_y = ((1.0 - (y / (z * self.vfov) + 0.5)) * height).floor();

        let behind = z < 0.0;
        if behind {
            screen_x = -screen_x;
            screen_y = -screen_y;
        }

        // `as` saturates, so points at extreme angles stay representable.
        let screen_x = screen_x as i32;
        let screen_y = screen_y as i32;

        let off_screen = OffScreen {
            behind,
            left: screen_x < 0,
            right: screen_x > self.width as i32,
            above: screen_y < 0,
            below: screen_y > self.height as i32,
        };

        Some(ProjectedPoint {
            x: screen_x,
            y: screen_y,
            off_screen,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use approx::assert_relative_eq;

    #[test]
    fn square_canvas_has_equal_tangents() {
        let proj = Projection::new(90.0, 100, 100).unwrap();
        assert_relative_eq!(proj.vfov(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(proj.hfov(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn wide_canvas_widens_horizontal_tangent() {
        let proj = Projection::new(90.0, 200, 100).unwrap();
        assert_relative_eq!(proj.hfov(), 2.0 * proj.vfov(), epsilon = 1e-6);
    }

    #[test]
    fn point_on_axis_lands_at_centre() {
        let proj = Projection::new(90.0, 100, 100).unwrap();
        let p = proj.project(Vec3::new(0.0, 0.0, 5.0)).unwrap();
        assert_eq!((p.x, p.y), (50, 50));
        assert!(!p.off_screen.any());
    }

    #[test]
    fn positive_y_is_up_on_screen() {
        let proj = Projection::new(90.0, 100, 100).unwrap();
        let p = proj.project(Vec3::new(1.1, 1.1, 4.0)).unwrap();
        // x/(z*hfov) = 0.275 -> 77.5; y flips -> 22.5. Both floor.
        assert_eq!((p.x, p.y), (77, 22));
    }

    #[test]
    fn zero_depth_is_not_projected() {
        let proj = Projection::new(90.0, 100, 100).unwrap();
        assert!(proj.project(Vec3::new(1.0, 1.0, 0.0)).is_none());
    }

    #[test]
    fn behind_camera_is_mirrored_and_flagged() {
        let proj = Projection::new(90.0, 100, 100).unwrap();
        let p = proj.project(Vec3::new(0.0, 0.0, -5.0)).unwrap();
        assert_eq!((p.x, p.y), (-50, -50));
        assert!(p.off_screen.behind);
        assert!(p.off_screen.left);
        assert!(p.off_screen.above);
    }

    #[test]
    fn edges_set_matching_flags() {
        let proj = Projection::new(90.0, 100, 100).unwrap();
        let right_below = proj.project(Vec3::new(10.0, -10.0, 1.0)).unwrap();
        assert!(right_below.off_screen.right);
        assert!(right_below.off_screen.below);
        assert!(!right_below.off_screen.left);
        assert!(!right_below.off_screen.above);
        assert!(!right_below.off_screen.behind);
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert!(matches!(
            Projection::new(180.0, 10, 10),
            Err(RenderError::InvalidFov(_))
        ));
        assert!(matches!(
            Projection::new(60.0, 10, 0),
            Err(RenderError::InvalidCanvasSize { .. })
        ));
    }
}
