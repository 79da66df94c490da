use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use super::rotation::Rotation;

/// A free vector in 3D space.
///
/// Also used as a point in world or object space (see [`Position3`]).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// A location in space. Same representation as [`Vec3`]; the alias only
/// documents intent at call sites.
pub type Position3 = Vec3;

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };
    pub const RIGHT: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    pub const UP: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    pub const FORWARD: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Creates a vector with the same value on every axis.
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value)
    }

    // =========================================================================
    // Axis rotations
    // =========================================================================

    /// Rotates in place around the X axis (the Y/Z plane).
    pub fn rotate_x(&mut self, angle: f32) {
        let (sin, cos) = angle.sin_cos();
        let y = self.y * cos - self.z * sin;
        let z = self.z * cos + self.y * sin;
        self.y = y;
        self.z = z;
    }

    /// Rotates in place around the Y axis (the X/Z plane).
    pub fn rotate_y(&mut self, angle: f32) {
        let (sin, cos) = angle.sin_cos();
        let x = self.x * cos - self.z * sin;
        let z = self.z * cos + self.x * sin;
        self.x = x;
        self.z = z;
    }

    /// Rotates in place around the Z axis (the X/Y plane).
    pub fn rotate_z(&mut self, angle: f32) {
        let (sin, cos) = angle.sin_cos();
        let x = self.x * cos - self.y * sin;
        let y = self.y * cos + self.x * sin;
        self.x = x;
        self.y = y;
    }

    /// Applies a full Euler rotation in place.
    ///
    /// Order is always X, then Y, then Z. Rotations do not commute, so
    /// changing this order changes every projected vertex.
    pub fn modify_axes(&mut self, rotation: Rotation) {
        self.rotate_x(rotation.x);
        self.rotate_y(rotation.y);
        self.rotate_z(rotation.z);
    }

    /// Returns a copy rotated by [`Vec3::modify_axes`], leaving `self` alone.
    pub fn with_axes_modified(mut self, rotation: Rotation) -> Self {
        self.modify_axes(rotation);
        self
    }

    /// Undoes [`Vec3::modify_axes`] by applying the negated angles in
    /// reverse order (Z, then Y, then X).
    pub fn unmodify_axes(&mut self, rotation: Rotation) {
        self.rotate_z(-rotation.z);
        self.rotate_y(-rotation.y);
        self.rotate_x(-rotation.x);
    }

    // =========================================================================
    // Measurements
    // =========================================================================

    pub fn magnitude(&self) -> f32 {
        (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt()
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.x.powi(2) + self.y.powi(2) + self.z.powi(2)
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Angle in radians between two vectors.
    ///
    /// Both vectors must be non-zero; the angle is undefined otherwise.
    pub fn angle_between(&self, other: Self) -> f32 {
        let denominator = self.magnitude() * other.magnitude();
        debug_assert!(denominator > 0.0, "angle_between called with a zero vector");
        (self.dot(other) / denominator).clamp(-1.0, 1.0).acos()
    }

    /// Euclidean distance between two positions.
    pub fn distance_to(&self, other: Self) -> f32 {
        (*self - other).magnitude()
    }

    /// Unit vector in the same direction. `self` must be non-zero.
    pub fn normalize(&self) -> Self {
        let magnitude = self.magnitude();
        debug_assert!(magnitude > 0.0, "normalize called with a zero vector");
        *self / magnitude
    }

    /// Component-wise product.
    pub fn component_mul(&self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Component-wise quotient.
    pub fn component_div(&self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y, self.z / other.z)
    }

    /// Reads one axis by index (0 = x, 1 = y, anything else = z).
    pub fn axis(&self, index: usize) -> f32 {
        match index {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Returns a copy with one axis replaced.
    pub fn with_axis(mut self, index: usize, value: f32) -> Self {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            _ => self.z = value,
        }
        self
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add<Vec3> for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign<Vec3> for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub<Vec3> for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Scalar multiplication of a vector.
impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Scalar division of a vector.
impl Div<f32> for Vec3 {
    type Output = Vec3;

    fn div(self, rhs: f32) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}, {:.3}, {:.3}", self.x, self.y, self.z)
    }
}
