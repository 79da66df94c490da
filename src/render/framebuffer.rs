//! Owned ARGB8888 pixel buffer.
//!
//! # Filling
//!
//! Polygons are filled as a triangle fan from their first vertex. Each
//! triangle is scan converted one row at a time: the row's pixel centre is
//! intersected with every edge (`x = x_top + inv_slope * (y - y_top)`) and the
//! pixels whose centres fall in `[x_left, x_right)` are painted. Edges are
//! always walked top to bottom and rows and spans are half open, so a pixel on
//! an edge shared by two fan triangles is painted exactly once and
//! translucent fills do not double up along the seams.
//!
//! # Lines
//!
//! One pixel lines are Bresenham lines. Wider lines are filled quads with
//! square caps at the polygon corners. Endpoints may be billions of pixels
//! off-canvas, so segments are clipped to the buffer (Liang-Barsky) before any
//! per-pixel walk, and fills only ever visit rows and columns inside it.

use std::path::Path;

use image::{Rgba, RgbaImage};

use super::surface::{ScreenPoint, Surface};
use crate::colors::{self, blend_over, Colour};
use crate::error::Result;

/// Widths up to this are drawn as single-pixel Bresenham lines.
const HAIRLINE_WIDTH: f32 = 1.5;

type Vertex = (f64, f64);

/// Pixels in a `width * height` canvas, counted in `usize` so large sizes
/// cannot overflow `u32`.
fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

pub struct FrameBuffer {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    /// Creates a buffer cleared to [`colors::BACKGROUND`].
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![colors::BACKGROUND; pixel_count(width, height)],
            width,
            height,
        }
    }

    /// Reallocates for a new canvas size; the contents are cleared.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.pixels = vec![colors::BACKGROUND; pixel_count(width, height)];
        self.width = width;
        self.height = height;
    }

    pub fn clear(&mut self, argb: u32) {
        self.pixels.fill(argb);
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Composites `colour` over the pixel at (x, y). Out-of-bounds writes are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, colour: Colour) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let index = self.index(x as u32, y as u32);
            self.pixels[index] = blend_over(self.pixels[index], colour);
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.pixels[self.index(x as u32, y as u32)])
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and a stricter alignment than u8; the byte
        // slice covers exactly the pixel storage and borrows it immutably.
        unsafe {
            std::slice::from_raw_parts(self.pixels.as_ptr() as *const u8, self.pixels.len() * 4)
        }
    }

    /// Writes the frame as an opaque RGBA PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let image = RgbaImage::from_fn(self.width, self.height, |x, y| {
            let Colour { r, g, b, .. } = Colour::from_argb(self.pixels[self.index(x, y)]);
            Rgba([r, g, b, 255])
        });
        image.save(path)?;
        Ok(())
    }

    /// Paints pixels `x_start..x_end` of row `y`, clamped to the buffer.
    fn fill_span(&mut self, y: i64, x_start: i64, x_end: i64, colour: Colour) {
        let x_start = x_start.max(0);
        let x_end = x_end.min(self.width as i64);
        let row = y as usize * self.width as usize;
        for x in x_start..x_end {
            let index = row + x as usize;
            self.pixels[index] = blend_over(self.pixels[index], colour);
        }
    }

    /// Scan converts a simple polygon with the even-odd rule, sampling at
    /// pixel centres.
    fn fill_scanlines(&mut self, polygon: &[Vertex], colour: Colour) {
        if polygon.len() < 3 || self.width == 0 || self.height == 0 {
            return;
        }

        let (min_y, max_y) = polygon
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
        let first_row = ((min_y - 0.5).ceil() as i64).max(0);
        let last_row = ((max_y - 0.5).ceil() as i64 - 1).min(self.height as i64 - 1);

        let mut crossings = Vec::with_capacity(polygon.len());
        for row in first_row..=last_row {
            let centre = row as f64 + 0.5;
            crossings.clear();
            for (i, &start) in polygon.iter().enumerate() {
                let end = polygon[(i + 1) % polygon.len()];
                let (top, bottom) = if (start.1, start.0) <= (end.1, end.0) {
                    (start, end)
                } else {
                    (end, start)
                };
                if top.1 <= centre && centre < bottom.1 {
                    let inv_slope = (bottom.0 - top.0) / (bottom.1 - top.1);
                    crossings.push(top.0 + inv_slope * (centre - top.1));
                }
            }
            crossings.sort_unstable_by(f64::total_cmp);

            for pair in crossings.chunks_exact(2) {
                let x_start = (pair[0] - 0.5).ceil() as i64;
                let x_end = (pair[1] - 0.5).ceil() as i64;
                self.fill_span(row, x_start, x_end, colour);
            }
        }
    }

    pub fn fill_triangle(&mut self, a: ScreenPoint, b: ScreenPoint, c: ScreenPoint, colour: Colour) {
        self.fill_scanlines(&[vertex(a), vertex(b), vertex(c)], colour);
    }

    /// Draws a one pixel line using Bresenham's algorithm.
    pub fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, colour: Colour) {
        let Some((from, to)) = self.clip_segment(vertex(from), vertex(to)) else {
            return;
        };
        let (x0, y0) = (from.0.round() as i32, from.1.round() as i32);
        let (x1, y1) = (to.0.round() as i32, to.1.round() as i32);

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let x_step = if x0 < x1 { 1 } else { -1 };
        let y_step = if y0 < y1 { 1 } else { -1 };

        // Positive error favours stepping in x, negative in y
        let mut err = dx - dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.set_pixel(x, y, colour);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += x_step;
            }
            if e2 < dx {
                err += dx;
                y += y_step;
            }
        }
    }

    /// Draws a line `width` pixels wide. Narrow lines fall back to
    /// [`FrameBuffer::draw_line`].
    pub fn draw_thick_line(&mut self, from: ScreenPoint, to: ScreenPoint, colour: Colour, width: f32) {
        if width <= HAIRLINE_WIDTH {
            self.draw_line(from, to, colour);
            return;
        }

        let (a, b) = (vertex(from), vertex(to));
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let length = (dx * dx + dy * dy).sqrt();
        if length == 0.0 {
            self.fill_square(a, width, colour);
            return;
        }
        let half = width as f64 / 2.0;
        let (nx, ny) = (-dy / length * half, dx / length * half);
        self.fill_scanlines(
            &[
                (a.0 + nx, a.1 + ny),
                (b.0 + nx, b.1 + ny),
                (b.0 - nx, b.1 - ny),
                (a.0 - nx, a.1 - ny),
            ],
            colour,
        );
    }

    fn fill_square(&mut self, centre: Vertex, side: f32, colour: Colour) {
        let half = side as f64 / 2.0;
        let (x, y) = centre;
        let square = [
            (x - half, y - half),
            (x + half, y - half),
            (x + half, y + half),
            (x - half, y + half),
        ];
        self.fill_scanlines(&square, colour);
    }

    /// Clips a segment to the buffer rectangle.
    fn clip_segment(&self, a: Vertex, b: Vertex) -> Option<(Vertex, Vertex)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let x_max = (self.width - 1) as f64;
        let y_max = (self.height - 1) as f64;
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);

        let mut t_enter: f64 = 0.0;
        let mut t_exit: f64 = 1.0;
        for (p, q) in [(-dx, a.0), (dx, x_max - a.0), (-dy, a.1), (dy, y_max - a.1)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                t_enter = t_enter.max(t);
            } else {
                t_exit = t_exit.min(t);
            }
            if t_enter > t_exit {
                return None;
            }
        }

        Some((
            (a.0 + t_enter * dx, a.1 + t_enter * dy),
            (a.0 + t_exit * dx, a.1 + t_exit * dy),
        ))
    }
}

#[inline]
fn vertex((x, y): ScreenPoint) -> Vertex {
    (x as f64, y as f64)
}

impl Surface for FrameBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_polygon(&mut self, points: &[ScreenPoint], colour: Colour) {
        if points.len() < 3 {
            return;
        }
        for i in 1..points.len() - 1 {
            self.fill_triangle(points[0], points[i], points[i + 1], colour);
        }
    }

    fn draw_polygon(&mut self, points: &[ScreenPoint], colour: Colour, width: f32) {
        if points.len() < 2 {
            return;
        }
        for (i, &from) in points.iter().enumerate() {
            let to = points[(i + 1) % points.len()];
            self.draw_thick_line(from, to, colour, width);
        }
        if width > HAIRLINE_WIDTH {
            for &corner in points {
                self.fill_square(vertex(corner), width, colour);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painted(buffer: &FrameBuffer) -> usize {
        buffer
            .pixels()
            .iter()
            .filter(|&&pixel| pixel != colors::BACKGROUND)
            .count()
    }

    #[test]
    fn new_buffer_is_background() {
        let buffer = FrameBuffer::new(8, 4);
        assert_eq!(buffer.pixels().len(), 32);
        assert_eq!(painted(&buffer), 0);
        assert_eq!(buffer.as_bytes().len(), 128);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn pixel_count_does_not_wrap_in_u32() {
        assert_eq!(pixel_count(70_000, 70_000), 4_900_000_000);
        assert_eq!(pixel_count(u32::MAX, 2), 2 * u32::MAX as usize);
    }

    #[test]
    fn last_pixel_index_is_in_bounds() {
        let mut buffer = FrameBuffer::new(7, 5);
        buffer.set_pixel(6, 4, Colour::GREEN);
        assert_eq!(buffer.pixels()[34], Colour::GREEN.to_argb());
        assert_eq!(buffer.get_pixel(6, 4), Some(Colour::GREEN.to_argb()));
    }

    #[test]
    fn square_fills_exactly_its_pixels() {
        let mut buffer = FrameBuffer::new(10, 10);
        buffer.fill_polygon(&[(0, 0), (4, 0), (4, 4), (0, 4)], Colour::GREEN);
        assert_eq!(painted(&buffer), 16);
        assert_eq!(buffer.get_pixel(3, 3), Some(Colour::GREEN.to_argb()));
        assert_eq!(buffer.get_pixel(4, 4), Some(colors::BACKGROUND));
    }

    #[test]
    fn translucent_fan_paints_each_pixel_once() {
        let mut buffer = FrameBuffer::new(10, 10);
        let colour = Colour::rgba(0, 0, 255, 128);
        buffer.fill_polygon(&[(1, 1), (8, 1), (8, 8), (1, 8)], colour);
        let expected = blend_over(colors::BACKGROUND, colour);
        for y in 1..8 {
            for x in 1..8 {
                assert_eq!(buffer.get_pixel(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn winding_does_not_matter() {
        let mut clockwise = FrameBuffer::new(10, 10);
        clockwise.fill_polygon(&[(0, 0), (6, 0), (6, 6), (0, 6)], Colour::GREEN);
        let mut anticlockwise = FrameBuffer::new(10, 10);
        anticlockwise.fill_polygon(&[(0, 6), (6, 6), (6, 0), (0, 0)], Colour::GREEN);
        assert_eq!(clockwise.pixels(), anticlockwise.pixels());
    }

    #[test]
    fn huge_triangle_is_clipped_to_the_buffer() {
        let mut buffer = FrameBuffer::new(16, 16);
        buffer.fill_triangle(
            (-1_000_000_000, -1_000_000_000),
            (1_000_000_000, -1_000_000_000),
            (0, 1_000_000_000),
            Colour::BLACK,
        );
        assert_eq!(buffer.get_pixel(8, 8), Some(Colour::BLACK.to_argb()));
    }

    #[test]
    fn degenerate_polygons_draw_nothing() {
        let mut buffer = FrameBuffer::new(10, 10);
        buffer.fill_polygon(&[(1, 1), (5, 5)], Colour::BLACK);
        buffer.fill_polygon(&[(1, 1), (3, 3), (5, 5)], Colour::BLACK);
        assert_eq!(painted(&buffer), 0);
    }

    #[test]
    fn bresenham_line_covers_every_column() {
        let mut buffer = FrameBuffer::new(10, 10);
        buffer.draw_line((0, 2), (9, 2), Colour::BLACK);
        assert_eq!(painted(&buffer), 10);
        buffer.draw_line((0, 0), (9, 9), Colour::BLACK);
        assert_eq!(buffer.get_pixel(5, 5), Some(Colour::BLACK.to_argb()));
    }

    #[test]
    fn far_off_lines_are_clipped() {
        let mut buffer = FrameBuffer::new(10, 10);
        buffer.draw_line((-1_000_000_000, -5), (1_000_000_000, -5), Colour::BLACK);
        assert_eq!(painted(&buffer), 0);
        buffer.draw_line((-1_000_000_000, 5), (1_000_000_000, 5), Colour::BLACK);
        assert_eq!(painted(&buffer), 10);
    }

    #[test]
    fn thick_outline_leaves_interior_untouched() {
        let mut buffer = FrameBuffer::new(20, 20);
        buffer.draw_polygon(&[(2, 2), (17, 2), (17, 17), (2, 17)], Colour::BLACK, 3.0);
        assert_eq!(buffer.get_pixel(10, 2), Some(Colour::BLACK.to_argb()));
        assert_eq!(buffer.get_pixel(2, 10), Some(Colour::BLACK.to_argb()));
        assert_eq!(buffer.get_pixel(10, 10), Some(colors::BACKGROUND));
    }

    #[test]
    fn resize_clears() {
        let mut buffer = FrameBuffer::new(4, 4);
        buffer.set_pixel(1, 1, Colour::BLACK);
        buffer.resize(6, 3);
        assert_eq!(Surface::width(&buffer), 6);
        assert_eq!(Surface::height(&buffer), 3);
        assert_eq!(painted(&buffer), 0);
    }

    #[test]
    fn snapshot_writes_png() {
        let mut buffer = FrameBuffer::new(4, 4);
        buffer.fill_polygon(&[(0, 0), (4, 0), (4, 4)], Colour::GREEN);
        let path = std::env::temp_dir().join(format!("gridscape-snapshot-{}.png", std::process::id()));
        buffer.save_png(&path).unwrap();
        let image = image::open(&path).unwrap().to_rgba8();
        assert_eq!(image.dimensions(), (4, 4));
        std::fs::remove_file(&path).unwrap();
    }
}
