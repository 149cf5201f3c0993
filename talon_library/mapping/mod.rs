//! Time-keyed sample storage
//!
//! # Overview
//!
//! - [`TimeIndexedStore`]: ordered map from timestamp to value with clamped,
//!   interpolated lookups and optional capacity-bounded eviction
//! - [`PositionHistory`]: a store of robot poses for latency compensation
//! - [`SharedPositionHistory`]: the same, behind a lock for multi-threaded use
//! - [`Dataset`]: rolling scalar readings with simple statistics
//!
//! # Example
//!
//! ```rust
//! use talon_library::mapping::TimeIndexedStore;
//!
//! let mut voltage: TimeIndexedStore<f64> = TimeIndexedStore::bounded(100).unwrap();
//! voltage.insert(0.0, 12.4).unwrap();
//! voltage.insert(0.2, 12.0).unwrap();
//!
//! assert!((voltage.query(0.1).unwrap() - 12.2).abs() < 1e-9);
//! ```

mod dataset;
mod position;
mod store;

pub use dataset::Dataset;
pub use position::{PositionHistory, SharedPositionHistory};
pub use store::{Interpolator, Lerp, TimeIndexedStore};
