//! Typed configuration for TALON stores
//!
//! Parameters are read from a TOML file. Every section is optional and falls
//! back to its defaults:
//!
//! ```toml
//! [position_history]
//! capacity = 50            # omit for an unbounded history
//!
//! [trajectory]
//! max_translational_velocity = 4.5
//! max_translational_acceleration = 3.0
//! max_rotational_velocity = 6.28
//! max_rotational_acceleration = 12.0
//!
//! [logging]
//! filter = "info"
//! ```

use crate::error::{TalonError, TalonResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default tracing filter when neither the file nor `RUST_LOG` provides one
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Position history sizing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PositionHistoryParams {
    /// Maximum number of poses kept. `None` keeps every pose.
    pub capacity: Option<usize>,
}

/// Kinematic limits attached to trajectories
///
/// A zero value means "use the robot's own default". Consumers (path
/// followers) read these; the interpolation engine never does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KinematicLimitParams {
    /// Max translational velocity in m/s
    pub max_translational_velocity: f64,
    /// Max translational acceleration in m/s²
    pub max_translational_acceleration: f64,
    /// Max rotational velocity in rad/s
    pub max_rotational_velocity: f64,
    /// Max rotational acceleration in rad/s²
    pub max_rotational_acceleration: f64,
}

/// Logging setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingParams {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `"talon_library=debug"`
    pub filter: String,
}

impl Default for LoggingParams {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Top-level TALON configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TalonParams {
    pub position_history: PositionHistoryParams,
    pub trajectory: KinematicLimitParams,
    pub logging: LoggingParams,
}

impl TalonParams {
    /// Parse and validate parameters from a TOML string
    pub fn from_toml_str(text: &str) -> TalonResult<Self> {
        let params: TalonParams = toml::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    /// Load parameters from a TOML file
    pub fn load(path: &Path) -> TalonResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            TalonError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let params = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded TALON params from {}", path.display());
        Ok(params)
    }

    /// Save parameters to a TOML file
    pub fn save(&self, path: &Path) -> TalonResult<()> {
        let text = toml::to_string_pretty(self).map_err(|e| TalonError::config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> TalonResult<()> {
        if self.position_history.capacity == Some(0) {
            return Err(TalonError::config(
                "position_history.capacity must be at least 1",
            ));
        }

        let limits = [
            ("max_translational_velocity", self.trajectory.max_translational_velocity),
            ("max_translational_acceleration", self.trajectory.max_translational_acceleration),
            ("max_rotational_velocity", self.trajectory.max_rotational_velocity),
            ("max_rotational_acceleration", self.trajectory.max_rotational_acceleration),
        ];
        for (name, value) in limits {
            if !value.is_finite() || value < 0.0 {
                return Err(TalonError::config(format!(
                    "trajectory.{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }

        if self.logging.filter.trim().is_empty() {
            return Err(TalonError::config("logging.filter cannot be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = TalonParams::default();
        assert_eq!(params.position_history.capacity, None);
        assert_eq!(params.trajectory, KinematicLimitParams::default());
        assert_eq!(params.logging.filter, "info");
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let params = TalonParams::from_toml_str("").unwrap();
        assert_eq!(params, TalonParams::default());
    }

    #[test]
    fn test_full_document() {
        let params = TalonParams::from_toml_str(
            r#"
            [position_history]
            capacity = 25

            [trajectory]
            max_translational_velocity = 4.5
            max_rotational_velocity = 6.0

            [logging]
            filter = "talon_library=debug"
            "#,
        )
        .unwrap();

        assert_eq!(params.position_history.capacity, Some(25));
        assert_eq!(params.trajectory.max_translational_velocity, 4.5);
        assert_eq!(params.trajectory.max_translational_acceleration, 0.0);
        assert_eq!(params.trajectory.max_rotational_velocity, 6.0);
        assert_eq!(params.logging.filter, "talon_library=debug");
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = TalonParams::from_toml_str("[position_history]\ncapacity = 0").unwrap_err();
        assert!(matches!(err, TalonError::Config(_)));
    }

    #[test]
    fn test_negative_limit_rejected() {
        let err = TalonParams::from_toml_str("[trajectory]\nmax_rotational_velocity = -1.0")
            .unwrap_err();
        assert!(matches!(err, TalonError::Config(_)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = TalonParams::from_toml_str("[position_history]\nsize = 10").unwrap_err();
        assert!(matches!(err, TalonError::Config(_)));
    }
}
