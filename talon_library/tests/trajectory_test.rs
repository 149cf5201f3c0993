// Trajectory loading and following end to end
use approx::assert_relative_eq;
use talon_core::{TalonError, TalonParams};
use talon_library::trajectory::{KinematicLimits, NodeRef, SwerveTrajectory, TrajectoryNode};
use talon_library::{Telemetry, Vector3};

/// Exported way-points: time, x, y, heading, vx, vy, omega
const TWO_BALL: [[f64; 7]; 5] = [
    [0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0],
    [0.5, 1.5, 1.0, 0.0, 1.0, 0.0, 0.0],
    [1.0, 2.5, 1.0, 0.0, 2.0, 0.0, 0.0],
    [1.5, 3.5, 1.0, 0.0, 2.0, 0.0, 0.0],
    [2.0, 4.0, 1.0, 0.0, 0.0, 0.0, 0.0],
];

fn two_ball() -> SwerveTrajectory {
    let rows: Vec<&[f64]> = TWO_BALL.iter().map(|row| &row[..]).collect();
    SwerveTrajectory::from_points("two_ball", &rows).unwrap()
}

#[test]
fn test_follow_at_control_rate() {
    let trajectory = two_ball();
    let mut previous_x = f64::NEG_INFINITY;

    // 50 Hz control loop over the whole path plus a bit of overrun
    for step in 0..=110 {
        let t = step as f64 * 0.02;
        let node = trajectory.node_from_time(t).unwrap();
        assert!(node.pose.x() >= previous_x - 1e-12);
        previous_x = node.pose.x();
    }

    let end = trajectory.ending_node().unwrap();
    assert_eq!(trajectory.node_from_time(2.2).unwrap(), *end);
}

#[test]
fn test_remaining_time_and_distance() {
    let trajectory = two_ball();
    assert_relative_eq!(trajectory.trajectory_time().unwrap(), 2.0);
    assert_relative_eq!(trajectory.trajectory_length().unwrap(), 3.0);

    assert_relative_eq!(trajectory.trajectory_time_from(NodeRef::Time(0.75)).unwrap(), 1.25);
    // Halfway through the second segment: 0.5 m to node 2, then 1.5 m
    assert_relative_eq!(
        trajectory.trajectory_length_from(NodeRef::Time(0.75)).unwrap(),
        2.0,
        epsilon = 1e-12
    );
}

#[test]
fn test_out_of_order_points_need_sort() {
    let mut trajectory = SwerveTrajectory::new("shuffled");
    for i in [3, 0, 4, 1, 2] {
        trajectory.add_point(&TWO_BALL[i]).unwrap();
    }
    assert!(!trajectory.is_sorted());

    trajectory.sort();
    assert_eq!(trajectory.nodes(), two_ball().nodes());
    assert_relative_eq!(trajectory.node_from_time(1.25).unwrap().pose.x(), 3.0);
}

#[test]
fn test_bad_row_rejected_without_mutation() {
    let mut trajectory = two_ball();
    let err = trajectory.add_point(&[2.5, 4.0, 1.0, 0.0, 0.0, 0.0]).unwrap_err();
    assert!(matches!(err, TalonError::InvalidArgument(_)));
    assert_eq!(trajectory.len(), TWO_BALL.len());
}

#[test]
fn test_limits_from_config() {
    let params = TalonParams::from_toml_str(
        "[trajectory]\nmax_translational_velocity = 4.5\nmax_rotational_velocity = 6.0",
    )
    .unwrap();
    let limits = KinematicLimits::try_from(params.trajectory).unwrap();
    let trajectory = SwerveTrajectory::with_limits("limited", limits);

    assert_eq!(trajectory.limits().max_translational_velocity(), 4.5);
    assert_eq!(trajectory.limits().max_translational_acceleration(), 0.0);
}

#[test]
fn test_snapshot() {
    let mut trajectory = two_ball();
    trajectory.add_node(TrajectoryNode::new(
        2.5,
        talon_library::Pose::new(4.0, 1.0, 0.0),
        Vector3::zero(),
    ));

    let snapshot = trajectory.snapshot();
    assert_eq!(snapshot["Name"], serde_json::json!("two_ball"));
    assert_eq!(snapshot["Node Count"], serde_json::json!(6.0));
    assert_eq!(snapshot["Duration"], serde_json::json!(2.5));
    assert_eq!(snapshot["Length"], serde_json::json!(3.0));
}
