//! # TALON Core
//!
//! Shared runtime pieces for the TALON robotics helpers.
//!
//! This crate carries everything the interpolation engine in `talon_library`
//! needs but that is not specific to trajectories or pose histories:
//!
//! - **Errors**: the tagged failure taxonomy used by every store
//! - **Telemetry**: read-only named properties for dashboards, plus compact log summaries
//! - **Params**: typed configuration loaded from TOML
//! - **Logging**: tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust
//! use talon_core::{TalonParams, TalonResult};
//!
//! fn configure() -> TalonResult<TalonParams> {
//!     let params = TalonParams::from_toml_str(
//!         r#"
//!         [position_history]
//!         capacity = 50
//!         "#,
//!     )?;
//!     Ok(params)
//! }
//!
//! assert_eq!(configure().unwrap().position_history.capacity, Some(50));
//! ```

pub mod error;
pub mod logging;
pub mod params;
pub mod telemetry;

// Re-export commonly used types for easy access
pub use error::{TalonError, TalonResult};
pub use params::{KinematicLimitParams, LoggingParams, PositionHistoryParams, TalonParams};
pub use telemetry::{LogSummary, PropertyValue, Telemetry};
