//! A CPU painter's-algorithm renderer for 3D grid boards.
//!
//! Solids (cuboids, outlined cuboids, wireframe cuboids and flat lines) are
//! projected through an orbit camera and drawn back to front onto any
//! [`Surface`]. There is no depth buffer and no GPU; SDL2 is only used by the
//! demo binary to show the finished frame.
//!
//! # Quick Start
//!
//! ```no_run
//! use gridscape::prelude::*;
//!
//! let config = ViewConfig::default();
//! let mut camera = OrbitCamera::new(&config, Vec3::ZERO, Rotation::IDENTITY, 0.0);
//! camera.fit_grid(3, 3, 3, 1.0);
//!
//! let mut scene = GridScene::new(3, 3, 3);
//! scene.set_markers(vec![CellMarker::wireframe((1, 1, 1), Colour::GREEN)]);
//!
//! let mut state = RenderState::new(camera);
//! state.sync(&scene);
//!
//! let mut frame = FrameBuffer::new(config.width, config.height);
//! state.render(&mut frame);
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod colors;
pub mod config;
pub mod error;
pub mod geometry;
pub mod lod;
pub mod math;
pub mod projection;
pub mod render;
pub mod scene;
pub mod solid;
pub mod sorting;
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use camera::{OrbitCamera, OrbitCameraController};
pub use config::ViewConfig;
pub use error::{RenderError, Result};
pub use projection::Projection;
pub use render::{FrameBuffer, Renderer, Surface};
pub use scene::{CellMarker, CellStyle, GridScene, RenderState, Wrapping};
pub use solid::{DrawRequest, Solid, SolidKind};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use gridscape::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::{OrbitCamera, OrbitCameraController};
    pub use crate::config::ViewConfig;

    // Geometry
    pub use crate::colors::Colour;
    pub use crate::math::{Position3, Rotation, Vec3};
    pub use crate::solid::{DrawRequest, Outline, Shape, Solid, SolidKind};

    // Rendering
    pub use crate::lod::{FpsCounter, LodController};
    pub use crate::projection::Projection;
    pub use crate::render::{FrameBuffer, Renderer, Surface};
    pub use crate::scene::{CellMarker, CellStyle, GridScene, RenderState, Wrapping};

    // Window & Input
    pub use crate::window::{FrameLimiter, InputState, Window, WindowEvent};
}
