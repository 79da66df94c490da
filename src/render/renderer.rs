//! Painter's algorithm renderer.
//!
//! There is no depth buffer. Every frame the solids are drawn furthest first,
//! and inside each solid its points are projected and then its faces drawn
//! furthest first, so nearer geometry simply overpaints farther geometry.
//!
//! Projection happens for every point of a solid before any of its faces is
//! drawn: faces only read the screen coordinates cached on their points.

use log::{trace, warn};

use super::surface::{ScreenPoint, Surface};
use crate::camera::OrbitCamera;
use crate::geometry::{Face, Point};
use crate::projection::Projection;
use crate::solid::Solid;
use crate::sorting::furthest_first;

/// Counters for the most recent frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub solids: usize,
    pub faces_drawn: usize,
    pub faces_culled: usize,
    /// Filled faces drawn as outlines by the long-edge guard.
    pub outline_fallbacks: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    last_stats: FrameStats,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    /// Draws `solids` onto `surface` as seen from `camera`.
    ///
    /// The canvas size is read from the surface each call, so a resized
    /// surface is picked up on the next frame. A surface that cannot be
    /// projected onto (zero width or height) is skipped with a warning.
    pub fn render<S: Surface>(&mut self, surface: &mut S, camera: &OrbitCamera, solids: &mut [Solid]) {
        let projection = match Projection::new(camera.fov(), surface.width(), surface.height()) {
            Ok(projection) => projection,
            Err(err) => {
                warn!("skipping frame: {err}");
                return;
            }
        };

        let mut stats = FrameStats {
            solids: solids.len(),
            ..FrameStats::default()
        };
        for index in furthest_first(&*solids, camera.position(), |solid| solid.position()) {
            draw_solid(surface, camera, &projection, &mut solids[index], &mut stats);
        }

        trace!(
            "frame: {} solids, {} faces drawn, {} culled, {} outline fallbacks",
            stats.solids,
            stats.faces_drawn,
            stats.faces_culled,
            stats.outline_fallbacks
        );
        self.last_stats = stats;
    }
}

fn draw_solid<S: Surface>(
    surface: &mut S,
    camera: &OrbitCamera,
    projection: &Projection,
    solid: &mut Solid,
    stats: &mut FrameStats,
) {
    // Solid-local positions are rotated but not translated; the camera is
    // moved into that frame instead.
    let offset = solid.position() - camera.position();
    let viewer = -offset;
    let (points, faces) = solid.geometry_mut();

    for index in furthest_first(&*points, viewer, |point| point.position) {
        let point = &mut points[index];
        // z == 0 keeps last frame's coordinates
        if let Some(screen) = projection.project(camera.to_camera_space(point.position + offset)) {
            point.screen = screen;
        }
    }

    let points: &[Point] = points;
    for index in furthest_first(faces, viewer, Face::centroid) {
        let face = &faces[index];
        if face.is_culled(points) {
            stats.faces_culled += 1;
            continue;
        }

        let polygon: Vec<ScreenPoint> = face
            .indices()
            .iter()
            .map(|&i| (points[i].screen.x, points[i].screen.y))
            .collect();

        match face.border_px(face.centroid().distance_to(viewer)) {
            Some(width) => surface.draw_polygon(&polygon, face.colour, width),
            None if outline_only(&polygon, projection.width(), projection.height()) => {
                surface.draw_polygon(&polygon, face.colour, 1.0);
                stats.outline_fallbacks += 1;
            }
            None => surface.fill_polygon(&polygon, face.colour),
        }
        stats.faces_drawn += 1;
    }
}

/// Long-edge guard for filled faces.
///
/// Every edge whose squared screen length exceeds half the squared smaller
/// canvas dimension contributes `floor(len² / threshold)`; once the total
/// reaches the vertex count the face is only outlined.
pub(crate) fn outline_only(polygon: &[ScreenPoint], width: u32, height: u32) -> bool {
    let side = width.min(height) as f64;
    let threshold = side * side / 2.0;
    if threshold <= 0.0 {
        return false;
    }

    let long_edges: f64 = polygon
        .iter()
        .enumerate()
        .map(|(i, &(x0, y0))| {
            let (x1, y1) = polygon[(i + 1) % polygon.len()];
            let dx = x1 as f64 - x0 as f64;
            let dy = y1 as f64 - y0 as f64;
            dx * dx + dy * dy
        })
        .filter(|&length_sq| length_sq > threshold)
        .map(|length_sq| (length_sq / threshold).floor())
        .sum();

    long_edges >= polygon.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{self, Colour};
    use crate::config::ViewConfig;
    use crate::math::{Rotation, Vec3};
    use crate::render::FrameBuffer;

    #[derive(Default)]
    struct RecordingSurface {
        width: u32,
        height: u32,
        fills: Vec<(Vec<ScreenPoint>, Colour)>,
        outlines: Vec<(Vec<ScreenPoint>, Colour, f32)>,
    }

    impl RecordingSurface {
        fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                ..Self::default()
            }
        }
    }

    impl Surface for RecordingSurface {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        fn fill_polygon(&mut self, points: &[ScreenPoint], colour: Colour) {
            self.fills.push((points.to_vec(), colour));
        }

        fn draw_polygon(&mut self, points: &[ScreenPoint], colour: Colour, width: f32) {
            self.outlines.push((points.to_vec(), colour, width));
        }
    }

    /// Camera five units in front of the origin on -Z, 100x100 canvas, fov 90.
    fn camera() -> OrbitCamera {
        let config = ViewConfig::new(100, 100, 90.0).unwrap();
        let zoom = 5f32.ln() / config.zoom_linearity.ln();
        OrbitCamera::new(&config, Vec3::ZERO, Rotation::IDENTITY, zoom)
    }

    fn cube(position: Vec3, size: f32, colour: Colour) -> Solid {
        Solid::cuboid(position, Vec3::splat(size), Rotation::IDENTITY, colour)
    }

    #[test]
    fn origin_projects_to_screen_centre() {
        let mut solids = vec![cube(Vec3::ZERO, 0.02, Colour::GREEN)];
        let mut surface = RecordingSurface::new(100, 100);
        Renderer::new().render(&mut surface, &camera(), &mut solids);

        for point in solids[0].points() {
            assert!((point.screen.x - 50).abs() <= 1, "x = {}", point.screen.x);
            assert!((point.screen.y - 50).abs() <= 1, "y = {}", point.screen.y);
            assert!(!point.off_screen().any());
        }
    }

    #[test]
    fn solids_are_painted_furthest_first() {
        let near = Colour::rgb(255, 0, 0);
        let far = Colour::rgb(0, 0, 255);
        let mut solids = vec![cube(Vec3::ZERO, 0.5, near), cube(Vec3::new(0.0, 0.0, 3.0), 0.5, far)];
        let mut surface = RecordingSurface::new(100, 100);
        Renderer::new().render(&mut surface, &camera(), &mut solids);

        let colours: Vec<Colour> = surface.fills.iter().map(|(_, colour)| *colour).collect();
        assert_eq!(colours.len(), 12);
        assert!(colours[..6].iter().all(|&c| c == far));
        assert!(colours[6..].iter().all(|&c| c == near));
    }

    #[test]
    fn nearest_face_is_painted_last() {
        let mut solids = vec![cube(Vec3::ZERO, 1.0, Colour::GREEN)];
        let mut surface = RecordingSurface::new(100, 100);
        Renderer::new().render(&mut surface, &camera(), &mut solids);

        // The -Z face is the biggest on screen
        let extent = |polygon: &Vec<ScreenPoint>| {
            let xs = polygon.iter().map(|p| p.0);
            xs.clone().max().unwrap_or(0) - xs.min().unwrap_or(0)
        };
        let last = extent(&surface.fills.last().unwrap().0);
        assert!(surface.fills.iter().all(|(polygon, _)| extent(polygon) <= last));
    }

    #[test]
    fn face_entirely_off_left_is_culled() {
        let mut solids = vec![Solid::line(
            Vec3::new(-100.0, 0.0, 0.0),
            Vec3::new(-90.0, 0.0, 0.0),
            0.2,
            Vec3::UP,
            Rotation::IDENTITY,
            Colour::BLACK,
        )];
        let mut surface = RecordingSurface::new(100, 100);
        let mut renderer = Renderer::new();
        renderer.render(&mut surface, &camera(), &mut solids);

        assert!(surface.fills.is_empty() && surface.outlines.is_empty());
        assert_eq!(renderer.last_stats().faces_culled, 1);
    }

    #[test]
    fn face_partly_off_left_is_drawn() {
        let mut solids = vec![Solid::line(
            Vec3::new(-100.0, 0.0, 0.0),
            Vec3::ZERO,
            0.2,
            Vec3::UP,
            Rotation::IDENTITY,
            Colour::BLACK,
        )];
        let mut surface = RecordingSurface::new(100, 100);
        let mut renderer = Renderer::new();
        renderer.render(&mut surface, &camera(), &mut solids);

        assert_eq!(surface.fills.len() + surface.outlines.len(), 1);
        assert_eq!(renderer.last_stats().faces_drawn, 1);
        assert_eq!(renderer.last_stats().faces_culled, 0);
    }

    #[test]
    fn solid_behind_camera_is_culled() {
        let mut solids = vec![cube(Vec3::new(0.0, 0.0, -20.0), 1.0, Colour::GREEN)];
        let mut surface = RecordingSurface::new(100, 100);
        let mut renderer = Renderer::new();
        renderer.render(&mut surface, &camera(), &mut solids);

        assert!(surface.fills.is_empty());
        assert_eq!(renderer.last_stats().faces_culled, 6);
    }

    #[test]
    fn wireframe_border_shrinks_with_distance() {
        let mut solids = vec![Solid::wireframe_cuboid(
            Vec3::ZERO,
            Vec3::ONE,
            Rotation::IDENTITY,
            Colour::BLACK,
            45.0,
        )];
        let mut surface = RecordingSurface::new(100, 100);
        Renderer::new().render(&mut surface, &camera(), &mut solids);

        assert!(surface.fills.is_empty());
        let widths: Vec<f32> = surface.outlines.iter().map(|(_, _, width)| *width).collect();
        assert!(!widths.is_empty());
        // Nearest face centroid is 4.5 units away
        let widest = widths.iter().cloned().fold(0.0, f32::max);
        approx::assert_relative_eq!(widest, 10.0, epsilon = 1e-3);
        assert!(widths.iter().all(|&w| w >= 1.0));
    }

    #[test]
    fn long_edge_guard_counts_multiples_of_threshold() {
        let small = [(0, 0), (10, 0), (10, 10), (0, 10)];
        assert!(!outline_only(&small, 100, 100));

        let huge = [(-1_000_000, 0), (1_000_000, 0), (1_000_000, 10), (-1_000_000, 10)];
        assert!(outline_only(&huge, 100, 100));

        // Both long sides of a sliver are worth 3 thresholds each
        let threshold_len = (100.0f64 * 100.0 / 2.0).sqrt();
        let length = (3.5f64).sqrt() * threshold_len;
        let sliver = [(0, 0), (length as i32, 0), (length as i32, 1)];
        assert!(outline_only(&sliver, 100, 100));
    }

    #[test]
    fn empty_surface_is_skipped() {
        let mut solids = vec![cube(Vec3::ZERO, 1.0, Colour::GREEN)];
        let mut surface = RecordingSurface::new(0, 100);
        Renderer::new().render(&mut surface, &camera(), &mut solids);
        assert!(surface.fills.is_empty());
    }

    #[test]
    fn paints_framebuffer_centre() {
        let mut solids = vec![cube(Vec3::ZERO, 1.0, Colour::GREEN)];
        let mut buffer = FrameBuffer::new(100, 100);
        Renderer::new().render(&mut buffer, &camera(), &mut solids);
        assert_eq!(buffer.get_pixel(50, 50), Some(Colour::GREEN.to_argb()));
        assert_eq!(buffer.get_pixel(2, 2), Some(colors::BACKGROUND));
    }
}
