//! Pre-computed robot paths
//!
//! A [`Trajectory`] is a list of [`TrajectoryNode`]s loaded once (usually
//! from a path planner export) and queried every control cycle for where the
//! robot should be and how fast it should be moving.
//!
//! Nodes carry a drivetrain-specific velocity: [`SwerveTrajectory`] uses
//! [`Vector3`](crate::math::Vector3) (forward, strafe, rotational) and
//! [`DifferentialTrajectory`] uses [`Vector2`](crate::math::Vector2)
//! (forward, rotational).
//!
//! # Example
//!
//! ```rust
//! use talon_library::trajectory::{NodeRef, SwerveTrajectory};
//!
//! let mut path = SwerveTrajectory::new("taxi");
//! path.add_point(&[0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]).unwrap();
//! path.add_point(&[2.0, 2.0, 0.0, 0.0, 1.0, 0.0, 0.0]).unwrap();
//!
//! assert_eq!(path.trajectory_time().unwrap(), 2.0);
//! assert_eq!(path.trajectory_length_from(NodeRef::Time(0.5)).unwrap(), 1.5);
//! ```

mod node;
mod path;

pub use node::{TrajectoryNode, Velocity};
pub use path::{
    DifferentialTrajectory, KinematicLimits, NodeRef, SwerveTrajectory, Trajectory,
    NODE_TIME_EPSILON,
};
