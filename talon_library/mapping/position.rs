//! Robot pose history for latency compensation
//!
//! A localization subsystem pushes `(pose, timestamp)` pairs as they are
//! estimated. When a vision frame arrives late, the consumer asks where the
//! robot was at the frame's capture time.

use super::store::TimeIndexedStore;
use crate::math::Pose;
use parking_lot::RwLock;
use std::sync::Arc;
use talon_core::{LogSummary, PositionHistoryParams, PropertyValue, TalonResult, Telemetry};

/// Time-ordered log of robot poses
#[derive(Debug, Clone, Default)]
pub struct PositionHistory {
    store: TimeIndexedStore<Pose>,
}

impl PositionHistory {
    /// History that keeps every pose
    pub fn unbounded() -> Self {
        Self {
            store: TimeIndexedStore::new(),
        }
    }

    /// History that keeps the `capacity` most recent poses
    pub fn bounded(capacity: usize) -> TalonResult<Self> {
        Ok(Self {
            store: TimeIndexedStore::bounded(capacity)?,
        })
    }

    /// Build from configuration
    pub fn from_params(params: &PositionHistoryParams) -> TalonResult<Self> {
        match params.capacity {
            Some(capacity) => Self::bounded(capacity),
            None => Ok(Self::unbounded()),
        }
    }

    /// Record the robot's pose at `timestamp` (seconds)
    ///
    /// A pose already stored at the same timestamp is replaced.
    pub fn add_pose(&mut self, pose: Pose, timestamp: f64) -> TalonResult<()> {
        self.store.insert(timestamp, pose)
    }

    /// Most recent pose, `None` if nothing has been recorded
    pub fn latest_pose(&self) -> Option<Pose> {
        self.store.latest().copied()
    }

    /// Most recent pose with its timestamp
    pub fn latest_sample(&self) -> Option<(f64, Pose)> {
        self.store.latest_sample().map(|(t, pose)| (t, *pose))
    }

    /// Estimated pose at `timestamp`
    ///
    /// Clamped to the oldest/newest pose outside the recorded range,
    /// interpolated between neighbours inside it.
    pub fn pose_at(&self, timestamp: f64) -> TalonResult<Pose> {
        self.store.query(timestamp)
    }

    /// Drop poses older than `timestamp`
    pub fn prune_before(&mut self, timestamp: f64) {
        self.store.prune_before(timestamp);
    }

    pub fn time_range(&self) -> Option<(f64, f64)> {
        self.store.time_range()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.store.capacity()
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Underlying store, for floor/ceiling and iteration
    pub fn store(&self) -> &TimeIndexedStore<Pose> {
        &self.store
    }
}

impl Telemetry for PositionHistory {
    fn properties(&self) -> Vec<(&'static str, PropertyValue)> {
        let current = self
            .latest_pose()
            .map(|pose| pose.log_summary())
            .unwrap_or_else(|| "N/A".to_string());

        let mut properties = vec![("Current Pose", PropertyValue::Text(current))];
        properties.extend(self.store.properties());
        properties
    }
}

impl LogSummary for PositionHistory {
    fn log_summary(&self) -> String {
        match self.time_range() {
            Some((oldest, newest)) => format!(
                "PositionHistory({} poses, {:.3}..{:.3})",
                self.len(),
                oldest,
                newest
            ),
            None => "PositionHistory(empty)".to_string(),
        }
    }
}

/// Position history shared between a sensor callback and a control loop
///
/// Each call takes the lock once, so an insert and its eviction, or a
/// lookup and its interpolation, are never observed half-done.
#[derive(Debug, Clone, Default)]
pub struct SharedPositionHistory {
    inner: Arc<RwLock<PositionHistory>>,
}

impl SharedPositionHistory {
    pub fn new(history: PositionHistory) -> Self {
        Self {
            inner: Arc::new(RwLock::new(history)),
        }
    }

    pub fn add_pose(&self, pose: Pose, timestamp: f64) -> TalonResult<()> {
        self.inner.write().add_pose(pose, timestamp)
    }

    pub fn latest_pose(&self) -> Option<Pose> {
        self.inner.read().latest_pose()
    }

    pub fn pose_at(&self, timestamp: f64) -> TalonResult<Pose> {
        self.inner.read().pose_at(timestamp)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Run `f` with the history read-locked
    pub fn with_history<R>(&self, f: impl FnOnce(&PositionHistory) -> R) -> R {
        f(&self.inner.read())
    }
}

impl Telemetry for SharedPositionHistory {
    fn properties(&self) -> Vec<(&'static str, PropertyValue)> {
        self.inner.read().properties()
    }
}
