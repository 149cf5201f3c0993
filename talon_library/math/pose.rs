use super::{Interpolate, Rotation2d, Vector2};
use serde::{Deserialize, Serialize};
use talon_core::LogSummary;

/// 2D pose representation (position and heading)
///
/// Position is in field meters, heading is a [`Rotation2d`] and therefore
/// always normalized.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    translation: Vector2,
    rotation: Rotation2d,
}

impl Pose {
    /// Create a new 2D pose, heading in radians
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self::from_parts(Vector2::new(x, y), Rotation2d::from_radians(heading))
    }

    pub fn from_parts(translation: Vector2, rotation: Rotation2d) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Create pose at origin
    pub fn origin() -> Self {
        Self::from_parts(Vector2::zero(), Rotation2d::identity())
    }

    pub fn x(&self) -> f64 {
        self.translation.x
    }

    pub fn y(&self) -> f64 {
        self.translation.y
    }

    pub fn translation(&self) -> Vector2 {
        self.translation
    }

    pub fn rotation(&self) -> Rotation2d {
        self.rotation
    }

    /// Heading in radians, within `(-π, π]`
    pub fn heading(&self) -> f64 {
        self.rotation.radians()
    }

    /// Calculate euclidean distance to another pose (heading ignored)
    pub fn distance_to(&self, other: &Pose) -> f64 {
        self.translation.distance_to(&other.translation)
    }

    /// Check if values are finite
    pub fn is_valid(&self) -> bool {
        self.translation.is_valid() && self.rotation.is_valid()
    }
}

impl Interpolate for Pose {
    /// Translation moves in a straight line, heading turns along the short arc
    fn interpolate(&self, end: &Self, ratio: f64) -> Self {
        Pose::from_parts(
            self.translation.interpolate(&end.translation, ratio),
            self.rotation.interpolate(&end.rotation, ratio),
        )
    }
}

impl LogSummary for Pose {
    fn log_summary(&self) -> String {
        format!(
            "Pose(x={:.3}, y={:.3}, heading={:.3})",
            self.x(),
            self.y(),
            self.heading()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_pose_new() {
        let pose = Pose::new(1.0, 2.0, 0.5);
        assert_eq!(pose.x(), 1.0);
        assert_eq!(pose.y(), 2.0);
        assert_eq!(pose.heading(), 0.5);
    }

    #[test]
    fn test_pose_heading_normalized() {
        let pose = Pose::new(0.0, 0.0, 3.0 * PI / 2.0);
        assert_relative_eq!(pose.heading(), -PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pose_distance_to() {
        let p1 = Pose::new(0.0, 0.0, 0.0);
        let p2 = Pose::new(3.0, 4.0, 1.0);
        assert_relative_eq!(p1.distance_to(&p2), 5.0);
    }

    #[test]
    fn test_pose_interpolate() {
        let start = Pose::new(0.0, 0.0, 0.0);
        let end = Pose::new(10.0, 0.0, 0.0);
        let mid = start.interpolate(&end, 0.5);
        assert_relative_eq!(mid.x(), 5.0);
        assert_relative_eq!(mid.y(), 0.0);
        assert_relative_eq!(mid.heading(), 0.0);
    }

    #[test]
    fn test_pose_interpolate_heading_short_arc() {
        let start = Pose::new(0.0, 0.0, PI - 0.1);
        let end = Pose::new(2.0, 2.0, -PI + 0.1);
        let mid = start.interpolate(&end, 0.5);
        assert_relative_eq!(mid.x(), 1.0);
        assert_relative_eq!(mid.y(), 1.0);
        assert_relative_eq!(mid.heading().abs(), PI, epsilon = 1e-9);
    }

    #[test]
    fn test_pose_is_valid() {
        assert!(Pose::new(1.0, 2.0, 0.5).is_valid());
        assert!(!Pose::new(f64::INFINITY, 0.0, 0.0).is_valid());
    }

    #[test]
    fn test_pose_serialization() {
        let pose = Pose::new(1.0, 2.0, 0.5);
        let serialized = serde_json::to_string(&pose).unwrap();
        let deserialized: Pose = serde_json::from_str(&serialized).unwrap();
        assert_eq!(pose, deserialized);
    }

    #[test]
    fn test_pose_log_summary() {
        let pose = Pose::new(1.0, -2.5, 0.25);
        assert_eq!(pose.log_summary(), "Pose(x=1.000, y=-2.500, heading=0.250)");
    }
}
