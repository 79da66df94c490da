//! Drawing onto a 2D canvas.
//!
//! - [`Surface`]: what the renderer needs from a canvas
//! - [`FrameBuffer`]: an owned pixel buffer implementing it
//! - [`Renderer`]: the per-frame painter's pass

mod framebuffer;
mod renderer;
mod surface;

pub use framebuffer::FrameBuffer;
pub use renderer::{FrameStats, Renderer};
pub use surface::{ScreenPoint, Surface};
