//! Orbit camera
//!
//! # Coordinate System
//!
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward (away from the viewer at zero orientation)
//!
//! # Model
//!
//! The camera always looks at its `target`. It is parameterized by an Euler
//! `orientation` and a logarithmic `zoom`; the actual distance to the target is
//! `zoom_linearity ^ zoom`, so equal zoom steps feel equally large whether the
//! camera is close or far away. Position and view axes are derived, never set
//! directly.

use std::f32::consts::{FRAC_PI_2, TAU};

use crate::config::ViewConfig;
use crate::math::{Position3, Rotation, Vec3};

/// Camera orbiting a target point.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    position: Position3,
    target: Position3,
    orientation: Rotation,
    zoom: f32,
    fov: f32,

    zoom_linearity: f32,
    min_zoom: f32,
    max_zoom: f32,
    zoom_sensitivity: f32,

    xaxis: Vec3,
    yaxis: Vec3,
    zaxis: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(&ViewConfig::default(), Vec3::ZERO, Rotation::IDENTITY, 0.0)
    }
}

impl OrbitCamera {
    /// Creates a camera from an explicit orientation and zoom.
    pub fn new(config: &ViewConfig, target: Position3, orientation: Rotation, zoom: f32) -> Self {
        let mut camera = Self {
            position: target,
            target,
            orientation,
            zoom: zoom.clamp(config.min_zoom, config.max_zoom),
            fov: config.fov,
            zoom_linearity: config.zoom_linearity,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            zoom_sensitivity: config.zoom_sensitivity,
            xaxis: Vec3::RIGHT,
            yaxis: Vec3::UP,
            zaxis: Vec3::FORWARD,
        };
        camera.orientation.x = camera.orientation.x.clamp(-FRAC_PI_2, FRAC_PI_2);
        camera.apply_zoom_and_orientation();
        camera
    }

    /// Creates a camera placed at `position`, looking at `target`.
    ///
    /// Zoom and orientation are derived once so that
    /// [`OrbitCamera::apply_zoom_and_orientation`] reproduces `position`. If the
    /// two points coincide the camera falls back to zero orientation and zoom.
    pub fn from_position(config: &ViewConfig, position: Position3, target: Position3) -> Self {
        let offset = target - position;
        let distance = offset.magnitude();
        if distance <= f32::EPSILON {
            return Self::new(config, target, Rotation::IDENTITY, 0.0);
        }

        let direction = offset / distance;
        // +Z rotated by X then Y is (-cos(x)sin(y), -sin(x), cos(x)cos(y)).
        let pitch = (-direction.y).clamp(-1.0, 1.0).asin();
        let yaw = (-direction.x).atan2(direction.z);
        let zoom = distance.ln() / config.zoom_linearity.ln();

        Self::new(config, target, Rotation::from_radians(pitch, yaw, 0.0), zoom)
    }

    // =========================================================================
    // Derived state
    // =========================================================================

    /// Recomputes the position and view axes from target, orientation and zoom.
    pub fn apply_zoom_and_orientation(&mut self) {
        let offset = Vec3::new(0.0, 0.0, self.distance()).with_axes_modified(self.orientation);
        self.position = self.target - offset;
        self.xaxis = Vec3::RIGHT.with_axes_modified(self.orientation);
        self.yaxis = Vec3::UP.with_axes_modified(self.orientation);
        self.zaxis = Vec3::FORWARD.with_axes_modified(self.orientation);
    }

    /// Actual distance to the target.
    pub fn distance(&self) -> f32 {
        self.zoom_linearity.powf(self.zoom)
    }

    /// Expresses a camera-relative vector in the camera's own axes.
    pub fn to_camera_space(&self, relative: Vec3) -> Vec3 {
        Vec3::new(
            relative.dot(self.xaxis),
            relative.dot(self.yaxis),
            relative.dot(self.zaxis),
        )
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Orbits and zooms the camera.
    ///
    /// Pitch is clamped to `[-π/2, π/2]` so the camera never flips over the
    /// poles; zoom is clamped to the configured range.
    pub fn move_by(&mut self, rotation_delta: Rotation, zoom_delta: f32) {
        self.orientation += rotation_delta;
        self.orientation.x = self.orientation.x.clamp(-FRAC_PI_2, FRAC_PI_2);
        self.orientation.y = self.orientation.y.rem_euclid(TAU);
        self.orientation.z = self.orientation.z.rem_euclid(TAU);
        self.zoom = (self.zoom + zoom_delta * self.zoom_sensitivity).clamp(self.min_zoom, self.max_zoom);
        self.apply_zoom_and_orientation();
    }

    /// Moves the orbit centre, keeping orientation and zoom.
    pub fn set_target(&mut self, target: Position3) {
        self.target = target;
        self.apply_zoom_and_orientation();
    }

    /// Shifts the orbit centre by a world-space delta.
    pub fn pan(&mut self, delta: Vec3) {
        self.set_target(self.target + delta);
    }

    /// Sets zoom directly (clamped to the configured range).
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        self.apply_zoom_and_orientation();
    }

    /// Frames an `x` by `y` by `z` grid whose layers are spread vertically by
    /// `explosion`, then tilts the view slightly downward.
    pub fn fit_grid(&mut self, x: usize, y: usize, z: usize, explosion: f32) {
        let half_fov = (self.fov / 2.0).to_radians();
        let height = y as f32 * explosion;
        let extent = half_fov.tan() * ((x * x) as f32 + height * height).sqrt() + z as f32 / 2.0;
        let zoom = (extent.ln() / self.zoom_linearity.ln()).ceil();
        self.set_zoom(zoom);
        self.move_by(Rotation::from_degrees(10.0, 0.0, 0.0), 0.0);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn position(&self) -> Position3 {
        self.position
    }

    pub fn target(&self) -> Position3 {
        self.target
    }

    pub fn orientation(&self) -> Rotation {
        self.orientation
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn xaxis(&self) -> Vec3 {
        self.xaxis
    }

    pub fn yaxis(&self) -> Vec3 {
        self.yaxis
    }

    pub fn zaxis(&self) -> Vec3 {
        self.zaxis
    }
}

// =============================================================================
// Camera Controller
// =============================================================================

/// Maps raw interaction input onto camera movement.
#[derive(Debug, Clone)]
pub struct OrbitCameraController {
    /// Multiplier on the drag rate; at 1.0 a drag across the whole canvas
    /// turns the camera a full circle.
    pub rotation_sensitivity: f32,
    /// Target movement in world units per second while a pan key is held.
    pub pan_speed: f32,
    canvas: (u32, u32),
}

impl Default for OrbitCameraController {
    fn default() -> Self {
        Self::new(&ViewConfig::default())
    }
}

impl OrbitCameraController {
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            rotation_sensitivity: config.rotation_sensitivity,
            pan_speed: 2.0,
            canvas: (config.width.max(1), config.height.max(1)),
        }
    }

    /// Tracks the canvas size that drag distances are measured against.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas = (width.max(1), height.max(1));
    }

    /// Converts a drag of `(dx, dy)` pixels into an orbit.
    ///
    /// The scene follows the pointer: dragging right swings the camera to
    /// lower yaw, dragging down raises pitch so the view looks further down
    /// onto the target.
    pub fn drag(&self, camera: &mut OrbitCamera, dx: f32, dy: f32) {
        let (width, height) = (self.canvas.0 as f32, self.canvas.1 as f32);
        let yaw = -dx / width * 360.0 * self.rotation_sensitivity;
        let pitch = dy / height * 360.0 * self.rotation_sensitivity;
        camera.move_by(Rotation::from_degrees(pitch, yaw, 0.0), 0.0);
    }

    /// Scrolling away from the user zooms in.
    pub fn scroll(&self, camera: &mut OrbitCamera, ticks: f32) {
        camera.move_by(Rotation::IDENTITY, -ticks);
    }

    /// Applies one frame of input.
    ///
    /// # Input Mapping
    /// - Mouse drag: orbit
    /// - Mouse wheel: zoom
    /// - Pan keys: move the target along the camera's right, up and forward axes
    pub fn update(&self, camera: &mut OrbitCamera, input: &crate::window::InputState, delta_time: f32) {
        let (dx, dy) = input.drag_delta;
        if dx != 0 || dy != 0 {
            self.drag(camera, dx as f32, dy as f32);
        }
        if input.scroll != 0 {
            self.scroll(camera, input.scroll as f32);
        }

        let step = self.pan_speed * delta_time;
        let axis_step = |positive: bool, negative: bool| match (positive, negative) {
            (true, false) => step,
            (false, true) => -step,
            _ => 0.0,
        };
        let pan = camera.xaxis() * axis_step(input.pan_right, input.pan_left)
            + camera.yaxis() * axis_step(input.pan_up, input.pan_down)
            + camera.zaxis() * axis_step(input.pan_forward, input.pan_backward);
        if pan != Vec3::ZERO {
            camera.pan(pan);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
