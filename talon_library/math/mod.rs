//! Geometric primitives for planar robots
//!
//! All types here are small `Copy` values. Arithmetic returns new values;
//! nothing is mutated in place.

mod pose;
mod rotation;
mod vector;

pub use pose::Pose;
pub use rotation::{normalize_angle, Rotation2d};
pub use vector::{Vector2, Vector3};

/// Blend between two values of the same type
///
/// `ratio` is the position between `self` (0.0) and `end` (1.0). Callers in
/// this crate only ever pass values inside `[0, 1]`.
pub trait Interpolate {
    fn interpolate(&self, end: &Self, ratio: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, end: &Self, ratio: f64) -> Self {
        self + (end - self) * ratio
    }
}

/// Where `time` sits between `floor` and `ceiling`, as a fraction
///
/// Callers must guarantee `floor < ceiling`.
pub fn interpolation_ratio(floor: f64, ceiling: f64, time: f64) -> f64 {
    (time - floor) / (ceiling - floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scalar_interpolation() {
        assert_relative_eq!(2.0_f64.interpolate(&4.0, 0.5), 3.0);
        assert_relative_eq!((-1.0_f64).interpolate(&1.0, 0.25), -0.5);
        assert_relative_eq!(7.0_f64.interpolate(&9.0, 0.0), 7.0);
    }

    #[test]
    fn test_interpolation_ratio() {
        assert_relative_eq!(interpolation_ratio(1.0, 3.0, 2.5), 0.75);
        assert_relative_eq!(interpolation_ratio(-2.0, 2.0, -2.0), 0.0);
    }
}
