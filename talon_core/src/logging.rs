//! Tracing subscriber setup
//!
//! Library code only emits `tracing` events. Applications that want to see
//! them call [`init_logging`] once at startup.

use crate::error::{TalonError, TalonResult};
use crate::params::LoggingParams;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter: `RUST_LOG` wins over the configured directive
pub fn build_filter(params: &LoggingParams) -> TalonResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&params.filter).map_err(|e| {
            TalonError::config(format!("invalid log filter '{}': {}", params.filter, e))
        }),
    }
}

/// Install a global fmt subscriber
///
/// Fails if the filter is malformed or a global subscriber is already set.
pub fn init_logging(params: &LoggingParams) -> TalonResult<()> {
    let filter = build_filter(params)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| TalonError::config(format!("failed to install subscriber: {}", e)))
}
