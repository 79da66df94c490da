//! View configuration.
//!
//! [`ViewConfig`] collects everything the host's UI decides about the view:
//! canvas size, field of view, the zoom scale and input sensitivities. It is
//! validated once when built so rendering never meets a bad value.

use crate::error::{RenderError, Result};

/// Canvas size, field of view, zoom scale and input sensitivities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in degrees, strictly between 0 and 180.
    pub fov: f32,
    /// Base of the exponential zoom scale (camera distance = `zoom_linearity ^ zoom`).
    pub zoom_linearity: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Orbit rate multiplier; at 1.0 a drag across the whole canvas is a full turn.
    pub rotation_sensitivity: f32,
    /// Zoom steps per unit of scroll input.
    pub zoom_sensitivity: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 450,
            height: 450,
            fov: 90.0,
            zoom_linearity: 1.2,
            min_zoom: -10.0,
            max_zoom: 30.0,
            rotation_sensitivity: 1.0,
            zoom_sensitivity: 1.0,
        }
    }
}

impl ViewConfig {
    /// Builds a config with default zoom and sensitivity settings.
    pub fn new(width: u32, height: u32, fov: f32) -> Result<Self> {
        let config = Self {
            width,
            height,
            fov,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Overrides the zoom scale, re-validating.
    pub fn with_zoom(mut self, zoom_linearity: f32, min_zoom: f32, max_zoom: f32) -> Result<Self> {
        self.zoom_linearity = zoom_linearity;
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.validate()?;
        Ok(self)
    }

    /// Checks every field against the renderer's requirements.
    pub fn validate(&self) -> Result<()> {
        validate_fov(self.fov)?;
        validate_canvas(self.width, self.height)?;
        if !(self.zoom_linearity.is_finite() && self.zoom_linearity > 1.0) {
            return Err(RenderError::InvalidZoomLinearity(self.zoom_linearity));
        }
        if !(self.min_zoom.is_finite() && self.max_zoom.is_finite() && self.min_zoom <= self.max_zoom)
        {
            return Err(RenderError::InvalidZoomRange {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        Ok(())
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Applies a window resize, rejecting zero-sized canvases.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        validate_canvas(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }
}

pub(crate) fn validate_fov(fov: f32) -> Result<()> {
    if fov.is_finite() && fov > 0.0 && fov < 180.0 {
        Ok(())
    } else {
        Err(RenderError::InvalidFov(fov))
    }
}

pub(crate) fn validate_canvas(width: u32, height: u32) -> Result<()> {
    if width > 0 && height > 0 {
        Ok(())
    } else {
        Err(RenderError::InvalidCanvasSize { width, height })
    }
}
