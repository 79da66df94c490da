//! Drawing capability of the host canvas.

use crate::colors::Colour;

/// Pixel coordinates. Not clipped: points can lie far outside the canvas.
pub type ScreenPoint = (i32, i32);

/// A 2D canvas the renderer paints onto.
///
/// Implementations must clip for themselves; the renderer hands over polygons
/// whose vertices may be anywhere in `i32` range.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Fills a polygon given in winding order.
    fn fill_polygon(&mut self, points: &[ScreenPoint], colour: Colour);

    /// Strokes the closed outline of a polygon `width` pixels wide.
    fn draw_polygon(&mut self, points: &[ScreenPoint], colour: Colour, width: f32);
}
