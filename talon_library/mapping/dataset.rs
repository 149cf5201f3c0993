//! Rolling scalar readings with summary statistics

use std::collections::VecDeque;
use talon_core::{LogSummary, PropertyValue, TalonError, TalonResult, Telemetry};

/// Readings further than this many standard deviations from the mean are outliers
const OUTLIER_SIGMAS: f64 = 2.5;

/// Sequence of scalar readings, optionally capped to the newest `limit`
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    readings: VecDeque<f64>,
    limit: Option<usize>,
}

impl Dataset {
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Dataset that keeps at most `limit` readings, dropping the oldest first
    pub fn bounded(limit: usize) -> TalonResult<Self> {
        if limit == 0 {
            return Err(TalonError::invalid("dataset limit must be at least 1"));
        }
        Ok(Self {
            readings: VecDeque::with_capacity(limit),
            limit: Some(limit),
        })
    }

    pub fn add(&mut self, value: f64) -> TalonResult<()> {
        if !value.is_finite() {
            tracing::warn!("Rejected dataset reading {}", value);
            return Err(TalonError::invalid(format!(
                "reading must be finite, got {}",
                value
            )));
        }

        if let Some(limit) = self.limit {
            while self.readings.len() >= limit {
                self.readings.pop_front();
            }
        }
        self.readings.push_back(value);
        Ok(())
    }

    /// Arithmetic mean
    pub fn average(&self) -> TalonResult<f64> {
        if self.readings.is_empty() {
            return Err(TalonError::EmptyStore);
        }
        Ok(self.readings.iter().sum::<f64>() / self.readings.len() as f64)
    }

    /// Sample variance (`n - 1` denominator); zero for a single reading
    pub fn variance(&self) -> TalonResult<f64> {
        let mean = self.average()?;
        let n = self.readings.len();
        if n == 1 {
            return Ok(0.0);
        }
        let squares: f64 = self.readings.iter().map(|v| (v - mean).powi(2)).sum();
        Ok(squares / (n - 1) as f64)
    }

    pub fn standard_deviation(&self) -> TalonResult<f64> {
        Ok(self.variance()?.sqrt())
    }

    /// Check whether `value` lies more than 2.5 standard deviations from the mean
    pub fn is_outlier(&self, value: f64) -> TalonResult<bool> {
        let mean = self.average()?;
        let sigma = self.standard_deviation()?;
        Ok((value - mean).abs() > OUTLIER_SIGMAS * sigma)
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Readings from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.readings.iter().copied()
    }

    pub fn clear(&mut self) {
        self.readings.clear();
    }
}

impl Telemetry for Dataset {
    fn properties(&self) -> Vec<(&'static str, PropertyValue)> {
        vec![
            ("Node Count", self.len().into()),
            ("Average", self.average().ok().into()),
            ("Variance", self.variance().ok().into()),
            ("Standard Deviation", self.standard_deviation().ok().into()),
        ]
    }
}

impl LogSummary for Dataset {
    fn log_summary(&self) -> String {
        match (self.average(), self.standard_deviation()) {
            (Ok(mean), Ok(sigma)) => format!(
                "Dataset(n={}, mean={:.3}, std={:.3})",
                self.len(),
                mean,
                sigma
            ),
            _ => "Dataset(empty)".to_string(),
        }
    }
}
