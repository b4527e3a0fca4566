//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Honour `RUST_LOG`, falling back to the configured level
//!
//! # Design Decisions
//! - `try_init` so test binaries that start many servers don't panic

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(log_level: &str) -> String {
    format!("elb_sim={},tower_http={}", log_level, log_level)
}

/// Install the global subscriber. Returns `false` if one was already set.
pub fn init_logging(log_level: &str) -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(log_level).into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
