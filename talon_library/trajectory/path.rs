use super::node::{TrajectoryNode, Velocity};
use crate::math::{interpolation_ratio, Interpolate, Vector2, Vector3};
use serde::{Deserialize, Serialize};
use talon_core::{KinematicLimitParams, LogSummary, PropertyValue, TalonError, TalonResult, Telemetry};

/// Nodes closer together than this in time are treated as coincident
pub const NODE_TIME_EPSILON: f64 = 1e-9;

/// Trajectory with swerve (forward, strafe, rotational) velocities
pub type SwerveTrajectory = Trajectory<Vector3>;

/// Trajectory with differential (forward, rotational) velocities
pub type DifferentialTrajectory = Trajectory<Vector2>;

/// Starting point for "remaining" queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef {
    /// A stored node, by position in the node list
    Index(usize),
    /// The (possibly interpolated) node at a time in seconds
    Time(f64),
}

fn check_limit(name: &str, value: f64) -> TalonResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(TalonError::invalid(format!(
            "{} must be a finite non-negative number, got {}",
            name, value
        )))
    }
}

/// Kinematic limits a path follower should respect
///
/// Zero means "use the robot's default". The trajectory itself never reads
/// these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "KinematicLimitParams", into = "KinematicLimitParams")]
pub struct KinematicLimits {
    max_translational_velocity: f64,
    max_translational_acceleration: f64,
    max_rotational_velocity: f64,
    max_rotational_acceleration: f64,
}

impl KinematicLimits {
    pub fn new(
        max_translational_velocity: f64,
        max_translational_acceleration: f64,
        max_rotational_velocity: f64,
        max_rotational_acceleration: f64,
    ) -> TalonResult<Self> {
        Ok(Self {
            max_translational_velocity: check_limit(
                "max_translational_velocity",
                max_translational_velocity,
            )?,
            max_translational_acceleration: check_limit(
                "max_translational_acceleration",
                max_translational_acceleration,
            )?,
            max_rotational_velocity: check_limit("max_rotational_velocity", max_rotational_velocity)?,
            max_rotational_acceleration: check_limit(
                "max_rotational_acceleration",
                max_rotational_acceleration,
            )?,
        })
    }

    /// Max translational velocity in m/s
    pub fn max_translational_velocity(&self) -> f64 {
        self.max_translational_velocity
    }

    /// Max translational acceleration in m/s²
    pub fn max_translational_acceleration(&self) -> f64 {
        self.max_translational_acceleration
    }

    /// Max rotational velocity in rad/s
    pub fn max_rotational_velocity(&self) -> f64 {
        self.max_rotational_velocity
    }

    /// Max rotational acceleration in rad/s²
    pub fn max_rotational_acceleration(&self) -> f64 {
        self.max_rotational_acceleration
    }

    pub fn set_max_translational_velocity(&mut self, value: f64) -> TalonResult<()> {
        self.max_translational_velocity = check_limit("max_translational_velocity", value)?;
        Ok(())
    }

    pub fn set_max_translational_acceleration(&mut self, value: f64) -> TalonResult<()> {
        self.max_translational_acceleration = check_limit("max_translational_acceleration", value)?;
        Ok(())
    }

    pub fn set_max_rotational_velocity(&mut self, value: f64) -> TalonResult<()> {
        self.max_rotational_velocity = check_limit("max_rotational_velocity", value)?;
        Ok(())
    }

    pub fn set_max_rotational_acceleration(&mut self, value: f64) -> TalonResult<()> {
        self.max_rotational_acceleration = check_limit("max_rotational_acceleration", value)?;
        Ok(())
    }
}

impl TryFrom<KinematicLimitParams> for KinematicLimits {
    type Error = TalonError;

    fn try_from(params: KinematicLimitParams) -> TalonResult<Self> {
        KinematicLimits::new(
            params.max_translational_velocity,
            params.max_translational_acceleration,
            params.max_rotational_velocity,
            params.max_rotational_acceleration,
        )
    }
}

impl From<KinematicLimits> for KinematicLimitParams {
    fn from(limits: KinematicLimits) -> Self {
        KinematicLimitParams {
            max_translational_velocity: limits.max_translational_velocity,
            max_translational_acceleration: limits.max_translational_acceleration,
            max_rotational_velocity: limits.max_rotational_velocity,
            max_rotational_acceleration: limits.max_rotational_acceleration,
        }
    }
}

/// Named, time-ordered sequence of way-points
///
/// Points are kept in insertion order. Time-based lookups binary-search the
/// node list, so call [`Trajectory::sort`] after inserting points out of
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory<V = Vector3> {
    name: String,
    nodes: Vec<TrajectoryNode<V>>,
    limits: KinematicLimits,
}

impl<V: Velocity> Trajectory<V> {
    /// Empty trajectory with default (zero) limits
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_limits(name, KinematicLimits::default())
    }

    pub fn with_limits(name: impl Into<String>, limits: KinematicLimits) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            limits,
        }
    }

    /// Build a trajectory from raw way-points in one go
    pub fn from_points(name: impl Into<String>, rows: &[&[f64]]) -> TalonResult<Self> {
        let mut trajectory = Self::new(name);
        trajectory.add_points(rows)?;
        Ok(trajectory)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn limits(&self) -> &KinematicLimits {
        &self.limits
    }

    pub fn limits_mut(&mut self) -> &mut KinematicLimits {
        &mut self.limits
    }

    pub fn nodes(&self) -> &[TrajectoryNode<V>] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a raw way-point `[time, x, y, heading, velocity...]`
    pub fn add_point(&mut self, data: &[f64]) -> TalonResult<()> {
        let node = TrajectoryNode::from_data(data).map_err(|e| {
            tracing::warn!("Trajectory '{}' rejected point: {}", self.name, e);
            e
        })?;
        self.nodes.push(node);
        Ok(())
    }

    /// Append several raw way-points
    ///
    /// Every row is validated before any is added, so a bad row leaves the
    /// trajectory untouched.
    pub fn add_points(&mut self, rows: &[&[f64]]) -> TalonResult<()> {
        let parsed = rows
            .iter()
            .enumerate()
            .map(|(row, data)| {
                TrajectoryNode::from_data(data).map_err(|e| {
                    tracing::warn!("Trajectory '{}' rejected row {}: {}", self.name, row, e);
                    e
                })
            })
            .collect::<TalonResult<Vec<_>>>()?;
        self.nodes.extend(parsed);
        Ok(())
    }

    pub fn add_node(&mut self, node: TrajectoryNode<V>) {
        self.nodes.push(node);
    }

    /// Stable sort of the nodes by time
    pub fn sort(&mut self) {
        if self.is_sorted() {
            return;
        }
        self.nodes.sort_by(|a, b| a.time.total_cmp(&b.time));
        tracing::debug!("Sorted {} nodes of trajectory '{}'", self.nodes.len(), self.name);
    }

    /// Check whether nodes are in non-decreasing time order
    pub fn is_sorted(&self) -> bool {
        self.nodes.windows(2).all(|pair| pair[0].time <= pair[1].time)
    }

    pub fn starting_node(&self) -> TalonResult<&TrajectoryNode<V>> {
        self.nodes.first().ok_or(TalonError::EmptyStore)
    }

    pub fn ending_node(&self) -> TalonResult<&TrajectoryNode<V>> {
        self.nodes.last().ok_or(TalonError::EmptyStore)
    }

    fn node_at(&self, index: usize) -> TalonResult<&TrajectoryNode<V>> {
        self.nodes.get(index).ok_or_else(|| {
            TalonError::invalid(format!(
                "node index {} out of range for {} nodes",
                index,
                self.nodes.len()
            ))
        })
    }

    /// Index of the first node at or after `time`
    ///
    /// Clamped to the first node below the trajectory and to the last node
    /// above it.
    pub fn node_index_from_time(&self, time: f64) -> TalonResult<usize> {
        if time.is_nan() {
            return Err(TalonError::invalid("time cannot be NaN"));
        }
        if self.nodes.is_empty() {
            return Err(TalonError::EmptyStore);
        }
        let index = self.nodes.partition_point(|node| node.time < time);
        Ok(index.min(self.nodes.len() - 1))
    }

    /// Node at `time`, interpolated between the bracketing way-points
    ///
    /// Before the first node this is the first node, after the last node
    /// the last one. Exact hits return the stored node unchanged.
    pub fn node_from_time(&self, time: f64) -> TalonResult<TrajectoryNode<V>> {
        let index = self.node_index_from_time(time)?;
        let ceiling = self.nodes[index];
        if index == 0 || time >= ceiling.time {
            return Ok(ceiling);
        }

        let floor = self.nodes[index - 1];
        if ceiling.time - floor.time < NODE_TIME_EPSILON {
            return Ok(ceiling);
        }

        let ratio = interpolation_ratio(floor.time, ceiling.time, time);
        Ok(TrajectoryNode::new(
            time,
            floor.pose.interpolate(&ceiling.pose, ratio),
            floor.velocity.interpolate(&ceiling.velocity, ratio),
        ))
    }

    /// Total duration in seconds, from the first node to the last
    pub fn trajectory_time(&self) -> TalonResult<f64> {
        Ok(self.ending_node()?.time - self.starting_node()?.time)
    }

    /// Time left from `from` until the last node
    pub fn trajectory_time_from(&self, from: NodeRef) -> TalonResult<f64> {
        let end = self.ending_node()?.time;
        let start = match from {
            NodeRef::Index(index) => self.node_at(index)?.time,
            NodeRef::Time(time) => self.node_from_time(time)?.time,
        };
        Ok(end - start)
    }

    /// Time left from `time` until the last node, without a lookup
    pub fn remaining_time_estimated(&self, time: f64) -> TalonResult<f64> {
        if !time.is_finite() {
            return Err(TalonError::invalid(format!("time must be finite, got {}", time)));
        }
        Ok(self.ending_node()?.time - time)
    }

    /// Sum of straight-line distances between consecutive nodes
    pub fn trajectory_length(&self) -> TalonResult<f64> {
        if self.nodes.is_empty() {
            return Err(TalonError::EmptyStore);
        }
        Ok(self.length_from_index(0))
    }

    /// Distance left to travel from `from` to the last node
    pub fn trajectory_length_from(&self, from: NodeRef) -> TalonResult<f64> {
        match from {
            NodeRef::Index(index) => {
                if self.nodes.is_empty() {
                    return Err(TalonError::EmptyStore);
                }
                self.node_at(index)?;
                Ok(self.length_from_index(index))
            }
            NodeRef::Time(time) => {
                let index = self.node_index_from_time(time)?;
                let current = self.node_from_time(time)?;
                let to_next = current.pose.distance_to(&self.nodes[index].pose);
                Ok(to_next + self.length_from_index(index))
            }
        }
    }

    fn length_from_index(&self, index: usize) -> f64 {
        self.nodes
            .get(index..)
            .unwrap_or_default()
            .windows(2)
            .map(|pair| pair[0].pose.distance_to(&pair[1].pose))
            .fold(0.0, |total, segment| total + segment)
    }
}

impl<V: Velocity> Telemetry for Trajectory<V> {
    fn properties(&self) -> Vec<(&'static str, PropertyValue)> {
        vec![
            ("Name", self.name.as_str().into()),
            ("Node Count", self.len().into()),
            ("Duration", self.trajectory_time().ok().into()),
            ("Length", self.trajectory_length().ok().into()),
        ]
    }
}

impl<V: Velocity> LogSummary for Trajectory<V> {
    fn log_summary(&self) -> String {
        match (self.trajectory_time(), self.trajectory_length()) {
            (Ok(duration), Ok(length)) => format!(
                "Trajectory('{}', {} nodes, {:.3}s, {:.3}m)",
                self.name,
                self.len(),
                duration,
                length
            ),
            _ => format!("Trajectory('{}', empty)", self.name),
        }
    }
}
