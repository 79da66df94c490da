//! Error types.
//!
//! Errors only come from configuration and the host window. Rendering itself
//! never fails: degenerate projections and oversized polygons are handled
//! silently inside the renderer.

/// Errors reported by the renderer's configuration and host surfaces.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// Field of view outside the open interval (0, 180) degrees.
    #[error("field of view must be between 0 and 180 degrees, got {0}")]
    InvalidFov(f32),

    /// Canvas with a zero dimension.
    #[error("canvas size must be positive, got {width}x{height}")]
    InvalidCanvasSize { width: u32, height: u32 },

    /// Zoom base must be greater than one for the exponential scale to grow.
    #[error("zoom linearity must be greater than 1, got {0}")]
    InvalidZoomLinearity(f32),

    /// Zoom bounds that are inverted or not finite.
    #[error("zoom range is invalid: min {min} must not exceed max {max}")]
    InvalidZoomRange { min: f32, max: f32 },

    /// Host window or SDL failure.
    #[error("window error: {0}")]
    Window(String),

    /// Snapshot encoding failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, RenderError>;
