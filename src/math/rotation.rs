//! Euler rotations.
//!
//! A [`Rotation`] holds three angles in radians, applied to vectors in the
//! fixed order X, Y, Z by [`Vec3::modify_axes`](super::vec3::Vec3::modify_axes).

use std::f32::consts::TAU;
use std::ops::{Add, AddAssign, Neg};

use super::vec3::Vec3;

/// Euler angles in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Rotation {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Builds a rotation from angles in degrees. This is the usual entry point.
    pub fn from_degrees(x: f32, y: f32, z: f32) -> Self {
        Self {
            x: x.to_radians(),
            y: y.to_radians(),
            z: z.to_radians(),
        }
    }

    pub const fn from_radians(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Reinterprets a vector's components as angles in radians.
    pub const fn from_vec(angles: Vec3) -> Self {
        Self::from_radians(angles.x, angles.y, angles.z)
    }

    /// Replaces all three angles, given in degrees.
    pub fn update_degrees(&mut self, x: f32, y: f32, z: f32) {
        *self = Self::from_degrees(x, y, z);
    }

    /// Wraps every angle into `[0, 2π)`.
    pub fn normalise(&mut self) {
        self.x = self.x.rem_euclid(TAU);
        self.y = self.y.rem_euclid(TAU);
        self.z = self.z.rem_euclid(TAU);
    }

    pub fn normalised(mut self) -> Self {
        self.normalise();
        self
    }

    pub fn as_vec(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

impl Add for Rotation {
    type Output = Rotation;

    fn add(self, rhs: Rotation) -> Self::Output {
        Self::from_radians(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Rotation {
    fn add_assign(&mut self, rhs: Rotation) {
        *self = *self + rhs;
    }
}

impl Neg for Rotation {
    type Output = Rotation;

    fn neg(self) -> Self::Output {
        Self::from_radians(-self.x, -self.y, -self.z)
    }
}
