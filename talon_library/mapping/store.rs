//! Ordered timestamp-keyed storage with interpolated lookups
//!
//! Samples live in a `BTreeMap`, so insert, eviction and the floor/ceiling
//! lookup behind [`TimeIndexedStore::query`] are all O(log n).

use crate::math::{interpolation_ratio, Interpolate};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use talon_core::{PropertyValue, TalonError, TalonResult, Telemetry};

/// Strategy used to blend the floor and ceiling samples of a query
///
/// Any `Fn(&T, &T, f64) -> T` closure is a strategy.
pub trait Interpolator<T> {
    fn interpolate(&self, start: &T, end: &T, ratio: f64) -> T;
}

/// Default strategy: defer to the value's own [`Interpolate`] impl
#[derive(Debug, Clone, Copy, Default)]
pub struct Lerp;

impl<T: Interpolate> Interpolator<T> for Lerp {
    fn interpolate(&self, start: &T, end: &T, ratio: f64) -> T {
        start.interpolate(end, ratio)
    }
}

impl<T, F> Interpolator<T> for F
where
    F: Fn(&T, &T, f64) -> T,
{
    fn interpolate(&self, start: &T, end: &T, ratio: f64) -> T {
        self(start, end, ratio)
    }
}

/// Finite timestamp usable as an ordered map key
#[derive(Debug, Clone, Copy)]
struct Timestamp(f64);

impl Timestamp {
    fn new(time: f64) -> Option<Self> {
        // Adding 0.0 folds -0.0 into 0.0 so both map to one key
        time.is_finite().then(|| Timestamp(time + 0.0))
    }

    fn checked(time: f64) -> TalonResult<Self> {
        Self::new(time)
            .ok_or_else(|| TalonError::invalid(format!("timestamp must be finite, got {}", time)))
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Timestamp-keyed store
///
/// Keys are unique: inserting at an existing timestamp overwrites the old
/// value. A bounded store drops its lowest-keyed sample whenever an insert
/// pushes it past capacity.
///
/// The store does no locking. An insert (with its eviction) and a query
/// (floor, ceiling, blend) must not interleave across threads; wrap the store
/// in a lock if producers and consumers run concurrently.
#[derive(Debug, Clone)]
pub struct TimeIndexedStore<T, I = Lerp> {
    samples: BTreeMap<Timestamp, T>,
    capacity: Option<usize>,
    interpolator: I,
}

impl<T: Interpolate + Clone> TimeIndexedStore<T, Lerp> {
    /// Create an unbounded store
    pub fn new() -> Self {
        Self::with_interpolator(Lerp)
    }

    /// Create a store holding at most `capacity` samples
    pub fn bounded(capacity: usize) -> TalonResult<Self> {
        Self::bounded_with_interpolator(capacity, Lerp)
    }
}

impl<T: Interpolate + Clone> Default for TimeIndexedStore<T, Lerp> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, I: Interpolator<T>> TimeIndexedStore<T, I> {
    /// Create an unbounded store with a custom interpolation strategy
    pub fn with_interpolator(interpolator: I) -> Self {
        Self {
            samples: BTreeMap::new(),
            capacity: None,
            interpolator,
        }
    }

    /// Create a bounded store with a custom interpolation strategy
    pub fn bounded_with_interpolator(capacity: usize, interpolator: I) -> TalonResult<Self> {
        if capacity == 0 {
            return Err(TalonError::invalid("store capacity must be at least 1"));
        }
        Ok(Self {
            samples: BTreeMap::new(),
            capacity: Some(capacity),
            interpolator,
        })
    }

    /// Insert or overwrite the sample at `time`
    ///
    /// Fails without touching the store if `time` is NaN or infinite.
    pub fn insert(&mut self, time: f64, value: T) -> TalonResult<()> {
        let key = Timestamp::checked(time).map_err(|e| {
            tracing::warn!("Rejected sample: {}", e);
            e
        })?;

        self.samples.insert(key, value);

        if let Some(capacity) = self.capacity {
            if self.samples.len() > capacity {
                if let Some((evicted, _)) = self.samples.pop_first() {
                    tracing::trace!("Evicted sample at t={:.3}", evicted.0);
                }
            }
        }
        Ok(())
    }

    /// Value at `time`, clamped to the stored range and blended between the
    /// two bracketing samples otherwise
    pub fn query(&self, time: f64) -> TalonResult<T> {
        let key = Timestamp::checked(time)?;

        let (first_key, first) = self.samples.first_key_value().ok_or(TalonError::EmptyStore)?;
        if key <= *first_key {
            return Ok(first.clone());
        }

        let (last_key, last) = self.samples.last_key_value().ok_or(TalonError::EmptyStore)?;
        if key >= *last_key {
            return Ok(last.clone());
        }

        // Strictly inside the range, so both neighbours exist
        let (floor_key, floor) = self
            .samples
            .range(..=key)
            .next_back()
            .ok_or(TalonError::EmptyStore)?;
        let (ceiling_key, ceiling) = self
            .samples
            .range(key..)
            .next()
            .ok_or(TalonError::EmptyStore)?;

        if floor_key == ceiling_key {
            return Ok(floor.clone());
        }

        let ratio = interpolation_ratio(floor_key.0, ceiling_key.0, time);
        Ok(self.interpolator.interpolate(floor, ceiling, ratio))
    }

    /// Sample with the largest timestamp at or below `time`
    pub fn floor(&self, time: f64) -> Option<(f64, &T)> {
        let key = Timestamp::new(time)?;
        self.samples
            .range(..=key)
            .next_back()
            .map(|(k, v)| (k.0, v))
    }

    /// Sample with the smallest timestamp at or above `time`
    pub fn ceiling(&self, time: f64) -> Option<(f64, &T)> {
        let key = Timestamp::new(time)?;
        self.samples.range(key..).next().map(|(k, v)| (k.0, v))
    }

    /// Value with the largest timestamp
    pub fn latest(&self) -> Option<&T> {
        self.samples.values().next_back()
    }

    /// Value with the smallest timestamp
    pub fn earliest(&self) -> Option<&T> {
        self.samples.values().next()
    }

    pub fn latest_sample(&self) -> Option<(f64, &T)> {
        self.samples.iter().next_back().map(|(k, v)| (k.0, v))
    }

    pub fn earliest_sample(&self) -> Option<(f64, &T)> {
        self.samples.iter().next().map(|(k, v)| (k.0, v))
    }

    /// (earliest, latest) timestamps
    pub fn time_range(&self) -> Option<(f64, f64)> {
        let (oldest, _) = self.earliest_sample()?;
        let (newest, _) = self.latest_sample()?;
        Some((oldest, newest))
    }

    /// Check if a timestamp lies within the stored range
    pub fn contains_time(&self, time: f64) -> bool {
        match self.time_range() {
            Some((oldest, newest)) => time >= oldest && time <= newest,
            None => false,
        }
    }

    /// Remove every sample older than `time`
    pub fn prune_before(&mut self, time: f64) {
        if let Some(key) = Timestamp::new(time) {
            self.samples = self.samples.split_off(&key);
        }
    }

    /// Iterate samples from oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (f64, &T)> + '_ {
        self.samples.iter().map(|(k, v)| (k.0, v))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Configured capacity, `None` when unbounded
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn is_bounded(&self) -> bool {
        self.capacity.is_some()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl<T: Clone, I: Interpolator<T>> Telemetry for TimeIndexedStore<T, I> {
    fn properties(&self) -> Vec<(&'static str, PropertyValue)> {
        let range = self.time_range();
        vec![
            ("Size", self.len().into()),
            ("Earliest Timestamp", range.map(|(oldest, _)| oldest).into()),
            ("Latest Timestamp", range.map(|(_, newest)| newest).into()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn filled(points: &[(f64, f64)]) -> TimeIndexedStore<f64> {
        let mut store = TimeIndexedStore::new();
        for &(t, v) in points {
            store.insert(t, v).unwrap();
        }
        store
    }

    #[test]
    fn test_query_empty() {
        let store: TimeIndexedStore<f64> = TimeIndexedStore::new();
        assert_eq!(store.query(1.0), Err(TalonError::EmptyStore));
        assert!(store.latest().is_none());
        assert!(store.time_range().is_none());
    }

    #[test]
    fn test_query_single_sample() {
        let store = filled(&[(5.0, 42.0)]);
        assert_eq!(store.query(0.0).unwrap(), 42.0);
        assert_eq!(store.query(5.0).unwrap(), 42.0);
        assert_eq!(store.query(9.0).unwrap(), 42.0);
    }

    #[test]
    fn test_query_clamps() {
        let store = filled(&[(1.0, 10.0), (2.0, 20.0)]);
        assert_eq!(store.query(-100.0).unwrap(), 10.0);
        assert_eq!(store.query(1.0).unwrap(), 10.0);
        assert_eq!(store.query(2.0).unwrap(), 20.0);
        assert_eq!(store.query(100.0).unwrap(), 20.0);
    }

    #[test]
    fn test_query_interpolates() {
        let store = filled(&[(0.0, 0.0), (1.0, 10.0), (3.0, 30.0), (4.0, 0.0)]);
        assert_relative_eq!(store.query(0.5).unwrap(), 5.0);
        assert_relative_eq!(store.query(2.0).unwrap(), 20.0);
        assert_relative_eq!(store.query(3.5).unwrap(), 15.0);
    }

    #[test]
    fn test_query_exact_hit() {
        let store = filled(&[(0.0, 0.0), (0.1, 1.0), (0.3, 7.0)]);
        assert_eq!(store.query(0.1).unwrap(), 1.0);
    }

    #[test]
    fn test_insert_out_of_order() {
        let store = filled(&[(3.0, 30.0), (1.0, 10.0), (2.0, 20.0)]);
        let times: Vec<f64> = store.iter().map(|(t, _)| t).collect();
        assert_eq!(times, vec![1.0, 2.0, 3.0]);
        assert_eq!(store.latest(), Some(&30.0));
        assert_eq!(store.earliest(), Some(&10.0));
    }

    #[test]
    fn test_insert_overwrites() {
        let mut store = filled(&[(1.0, 10.0), (2.0, 20.0)]);
        store.insert(2.0, 99.0).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.latest(), Some(&99.0));
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let mut store = filled(&[(0.0, 1.0)]);
        store.insert(-0.0, 2.0).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.query(0.0).unwrap(), 2.0);
    }

    #[test]
    fn test_non_finite_timestamps_rejected() {
        let mut store = filled(&[(1.0, 10.0)]);
        assert!(matches!(store.insert(f64::NAN, 0.0), Err(TalonError::InvalidArgument(_))));
        assert!(matches!(
            store.insert(f64::INFINITY, 0.0),
            Err(TalonError::InvalidArgument(_))
        ));
        assert!(matches!(store.query(f64::NAN), Err(TalonError::InvalidArgument(_))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_bounded_evicts_oldest() {
        let mut store: TimeIndexedStore<f64> = TimeIndexedStore::bounded(3).unwrap();
        for i in 0..6 {
            store.insert(i as f64, i as f64 * 10.0).unwrap();
        }
        assert_eq!(store.len(), 3);
        assert_eq!(store.time_range(), Some((3.0, 5.0)));
    }

    #[test]
    fn test_bounded_overwrite_does_not_evict() {
        let mut store: TimeIndexedStore<f64> = TimeIndexedStore::bounded(2).unwrap();
        store.insert(1.0, 1.0).unwrap();
        store.insert(2.0, 2.0).unwrap();
        store.insert(2.0, 3.0).unwrap();
        assert_eq!(store.time_range(), Some((1.0, 2.0)));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result: TalonResult<TimeIndexedStore<f64>> = TimeIndexedStore::bounded(0);
        assert!(matches!(result, Err(TalonError::InvalidArgument(_))));
    }

    #[test]
    fn test_floor_and_ceiling() {
        let store = filled(&[(1.0, 10.0), (2.0, 20.0), (4.0, 40.0)]);
        assert_eq!(store.floor(3.0), Some((2.0, &20.0)));
        assert_eq!(store.ceiling(3.0), Some((4.0, &40.0)));
        assert_eq!(store.floor(2.0), Some((2.0, &20.0)));
        assert_eq!(store.ceiling(2.0), Some((2.0, &20.0)));
        assert_eq!(store.floor(0.5), None);
        assert_eq!(store.ceiling(4.5), None);
    }

    #[test]
    fn test_custom_interpolator() {
        // Step function: hold the floor value until the next sample
        let hold = |start: &f64, _end: &f64, _ratio: f64| *start;
        let mut store: TimeIndexedStore<f64, _> = TimeIndexedStore::with_interpolator(hold);
        store.insert(0.0, 1.0).unwrap();
        store.insert(1.0, 2.0).unwrap();
        assert_eq!(store.query(0.9).unwrap(), 1.0);
        assert_eq!(store.query(1.0).unwrap(), 2.0);
    }

    #[test]
    fn test_prune_before() {
        let mut store = filled(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (4.0, 4.0)]);
        store.prune_before(2.5);
        assert_eq!(store.len(), 2);
        assert_eq!(store.earliest(), Some(&3.0));

        store.prune_before(3.0);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_contains_time() {
        let store = filled(&[(1.0, 1.0), (3.0, 3.0)]);
        assert!(store.contains_time(2.0));
        assert!(store.contains_time(3.0));
        assert!(!store.contains_time(3.1));
    }

    #[test]
    fn test_telemetry() {
        let empty: TimeIndexedStore<f64> = TimeIndexedStore::new();
        assert_eq!(empty.property("Size"), Some(PropertyValue::Number(0.0)));
        assert_eq!(empty.property("Earliest Timestamp"), Some(PropertyValue::Missing));

        let store = filled(&[(1.5, 1.0), (3.0, 3.0)]);
        assert_eq!(store.property("Size"), Some(PropertyValue::Number(2.0)));
        assert_eq!(store.property("Earliest Timestamp"), Some(PropertyValue::Number(1.5)));
        assert_eq!(store.property("Latest Timestamp"), Some(PropertyValue::Number(3.0)));
    }
}
