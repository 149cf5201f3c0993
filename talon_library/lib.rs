//! # TALON Library
//!
//! Time-indexed interpolation for robot motion data.
//!
//! ## Structure
//!
//! ```text
//! talon_library/
//! ── math/          # Vector2, Vector3, Rotation2d, Pose and interpolation
//! ── mapping/       # Time-indexed store, position history, scalar datasets
//! ── trajectory/    # Trajectory nodes and trajectories
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use talon_library::{Pose, PositionHistory, SwerveTrajectory};
//!
//! // Latency compensation: where was the robot when the frame was captured?
//! let mut history = PositionHistory::bounded(50).unwrap();
//! history.add_pose(Pose::new(0.0, 0.0, 0.0), 0.0).unwrap();
//! history.add_pose(Pose::new(10.0, 0.0, 0.0), 1.0).unwrap();
//! let pose = history.pose_at(0.5).unwrap();
//! assert!((pose.x() - 5.0).abs() < 1e-9);
//!
//! // Path following: where should the robot be at t = 1s?
//! let mut trajectory = SwerveTrajectory::new("two_ball_auto");
//! trajectory.add_point(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
//! trajectory.add_point(&[2.0, 4.0, 4.0, 0.0, 2.0, 2.0, 0.0]).unwrap();
//! let node = trajectory.node_from_time(1.0).unwrap();
//! assert!((node.pose.x() - 2.0).abs() < 1e-9);
//! ```
//!
//! Stores do no internal locking. Use [`SharedPositionHistory`] when a
//! sensor callback and a control loop touch the same history from
//! different threads.

pub mod mapping;
pub mod math;
pub mod trajectory;

// Re-export core types needed by callers
pub use talon_core::{LogSummary, PropertyValue, TalonError, TalonResult, Telemetry};

// Re-export engine types at the crate root for convenience
pub use mapping::{Dataset, Interpolator, Lerp, PositionHistory, SharedPositionHistory, TimeIndexedStore};
pub use math::{Interpolate, Pose, Rotation2d, Vector2, Vector3};
pub use trajectory::{
    DifferentialTrajectory, KinematicLimits, NodeRef, SwerveTrajectory, Trajectory,
    TrajectoryNode, Velocity,
};
