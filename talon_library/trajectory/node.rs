use crate::math::{Interpolate, Pose, Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use talon_core::{LogSummary, TalonError, TalonResult};

/// Drivetrain velocity carried by a trajectory node
///
/// Implemented by [`Vector3`] (swerve: forward, strafe, rotational) and
/// [`Vector2`] (differential: forward, rotational).
pub trait Velocity: Interpolate + Copy + PartialEq + Debug + LogSummary {
    /// Number of velocity values in a raw way-point
    const COMPONENTS: usize;

    /// Build from exactly [`Self::COMPONENTS`] values, `None` otherwise
    fn from_components(values: &[f64]) -> Option<Self>;

    fn is_valid(&self) -> bool;
}

impl Velocity for Vector3 {
    const COMPONENTS: usize = 3;

    fn from_components(values: &[f64]) -> Option<Self> {
        match *values {
            [x, y, z] => Some(Vector3::new(x, y, z)),
            _ => None,
        }
    }

    fn is_valid(&self) -> bool {
        Vector3::is_valid(self)
    }
}

impl Velocity for Vector2 {
    const COMPONENTS: usize = 2;

    fn from_components(values: &[f64]) -> Option<Self> {
        match *values {
            [forward, rotational] => Some(Vector2::new(forward, rotational)),
            _ => None,
        }
    }

    fn is_valid(&self) -> bool {
        Vector2::is_valid(self)
    }
}

/// One way-point of a trajectory: where the robot should be at `time` and
/// how fast it should be moving
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryNode<V = Vector3> {
    /// Seconds since the start of the path
    pub time: f64,
    pub pose: Pose,
    pub velocity: V,
}

impl<V: Velocity> TrajectoryNode<V> {
    /// Number of values in a raw way-point for this velocity type
    pub const POINT_LEN: usize = 4 + V::COMPONENTS;

    pub fn new(time: f64, pose: Pose, velocity: V) -> Self {
        Self {
            time,
            pose,
            velocity,
        }
    }

    /// Build from a raw way-point `[time, x, y, heading, velocity...]`
    ///
    /// Heading is in radians. Fails if the slice has the wrong length or
    /// holds a non-finite value.
    pub fn from_data(data: &[f64]) -> TalonResult<Self> {
        if data.len() != Self::POINT_LEN {
            return Err(TalonError::invalid(format!(
                "trajectory point needs {} values, got {}",
                Self::POINT_LEN,
                data.len()
            )));
        }
        if let Some(bad) = data.iter().find(|v| !v.is_finite()) {
            return Err(TalonError::invalid(format!(
                "trajectory point values must be finite, got {}",
                bad
            )));
        }

        let velocity = V::from_components(&data[4..]).ok_or_else(|| {
            TalonError::invalid(format!("expected {} velocity values", V::COMPONENTS))
        })?;
        Ok(Self::new(data[0], Pose::new(data[1], data[2], data[3]), velocity))
    }

    pub fn is_valid(&self) -> bool {
        self.time.is_finite() && self.pose.is_valid() && self.velocity.is_valid()
    }
}

impl TrajectoryNode<Vector3> {
    /// Swerve node from its scalar parts
    #[allow(clippy::too_many_arguments)]
    pub fn swerve(
        time: f64,
        x: f64,
        y: f64,
        heading: f64,
        vel_x: f64,
        vel_y: f64,
        vel_rot: f64,
    ) -> Self {
        Self::new(
            time,
            Pose::new(x, y, heading),
            Vector3::new(vel_x, vel_y, vel_rot),
        )
    }
}

impl TrajectoryNode<Vector2> {
    /// Differential node from its scalar parts
    pub fn differential(
        time: f64,
        x: f64,
        y: f64,
        heading: f64,
        vel_forward: f64,
        vel_rot: f64,
    ) -> Self {
        Self::new(
            time,
            Pose::new(x, y, heading),
            Vector2::new(vel_forward, vel_rot),
        )
    }
}

impl<V: Velocity> Interpolate for TrajectoryNode<V> {
    /// Time, pose and velocity are blended independently with the same ratio
    fn interpolate(&self, end: &Self, ratio: f64) -> Self {
        Self::new(
            self.time.interpolate(&end.time, ratio),
            self.pose.interpolate(&end.pose, ratio),
            self.velocity.interpolate(&end.velocity, ratio),
        )
    }
}

impl<V: Velocity> LogSummary for TrajectoryNode<V> {
    fn log_summary(&self) -> String {
        format!(
            "Node(t={:.3}, {}, vel={})",
            self.time,
            self.pose.log_summary(),
            self.velocity.log_summary()
        )
    }
}
