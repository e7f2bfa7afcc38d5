//! Tracing initialization

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Initialize JSON-formatted tracing from the configured log level.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.service.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init();

    tracing::info!(service = %config.service.name, "tracing initialized");
}
