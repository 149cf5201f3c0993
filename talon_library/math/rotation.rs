use super::Interpolate;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::ops::{Add, Neg, Sub};

/// Wrap an angle in radians into `(-π, π]`
pub fn normalize_angle(radians: f64) -> f64 {
    let wrapped = radians.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Planar heading
///
/// The stored angle is always in `(-π, π]`, whatever was passed in.
/// Interpolation follows the shorter of the two arcs between headings, so
/// blending 170° and -170° passes through 180°, not through 0°.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Rotation2d {
    radians: f64,
}

impl Rotation2d {
    pub fn from_radians(radians: f64) -> Self {
        Self {
            radians: normalize_angle(radians),
        }
    }

    pub fn from_degrees(degrees: f64) -> Self {
        Self::from_radians(degrees.to_radians())
    }

    pub fn identity() -> Self {
        Self { radians: 0.0 }
    }

    pub fn radians(&self) -> f64 {
        self.radians
    }

    pub fn degrees(&self) -> f64 {
        self.radians.to_degrees()
    }

    pub fn cos(&self) -> f64 {
        self.radians.cos()
    }

    pub fn sin(&self) -> f64 {
        self.radians.sin()
    }

    /// Signed angle of the shortest turn from `self` to `other`, in `(-π, π]`
    pub fn shortest_delta_to(&self, other: &Rotation2d) -> f64 {
        normalize_angle(other.radians - self.radians)
    }

    /// Compose two rotations
    pub fn rotate_by(&self, other: &Rotation2d) -> Rotation2d {
        Rotation2d::from_radians(self.radians + other.radians)
    }

    pub fn is_valid(&self) -> bool {
        self.radians.is_finite()
    }
}

impl Interpolate for Rotation2d {
    fn interpolate(&self, end: &Self, ratio: f64) -> Self {
        Rotation2d::from_radians(self.radians + self.shortest_delta_to(end) * ratio)
    }
}

impl Add for Rotation2d {
    type Output = Rotation2d;

    fn add(self, rhs: Rotation2d) -> Rotation2d {
        self.rotate_by(&rhs)
    }
}

impl Sub for Rotation2d {
    type Output = Rotation2d;

    fn sub(self, rhs: Rotation2d) -> Rotation2d {
        Rotation2d::from_radians(self.radians - rhs.radians)
    }
}

impl Neg for Rotation2d {
    type Output = Rotation2d;

    fn neg(self) -> Rotation2d {
        Rotation2d::from_radians(-self.radians)
    }
}

impl From<f64> for Rotation2d {
    fn from(radians: f64) -> Self {
        Rotation2d::from_radians(radians)
    }
}

impl From<Rotation2d> for f64 {
    fn from(rotation: Rotation2d) -> Self {
        rotation.radians
    }
}
