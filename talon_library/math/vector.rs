use super::Interpolate;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};
use talon_core::LogSummary;

/// 2D vector
///
/// Used for field positions (meters) and for differential drivetrain
/// velocities, where `x` is forward speed in m/s and `y` is angular speed
/// in rad/s.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Euclidean length
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another vector
    pub fn distance_to(&self, other: &Vector2) -> f64 {
        (*other - *self).norm()
    }

    pub fn dot(&self, other: &Vector2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Check if values are finite
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, scale: f64) -> Vector2 {
        Vector2::new(self.x * scale, self.y * scale)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl Interpolate for Vector2 {
    fn interpolate(&self, end: &Self, ratio: f64) -> Self {
        *self + (*end - *self) * ratio
    }
}

impl LogSummary for Vector2 {
    fn log_summary(&self) -> String {
        format!("({:.3}, {:.3})", self.x, self.y)
    }
}

/// 3D vector
///
/// For swerve drivetrain velocities the components are forward (`x`, m/s),
/// strafe (`y`, m/s) and rotational (`z`, rad/s).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// The `x`/`y` part, dropping `z`
    pub fn xy(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    /// Check if values are finite
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, scale: f64) -> Vector3 {
        Vector3::new(self.x * scale, self.y * scale, self.z * scale)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl Interpolate for Vector3 {
    fn interpolate(&self, end: &Self, ratio: f64) -> Self {
        *self + (*end - *self) * ratio
    }
}

impl LogSummary for Vector3 {
    fn log_summary(&self) -> String {
        format!("({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}
