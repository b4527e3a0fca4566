//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and value ranges
//! - Reject ambiguous seed state
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: SimulatorConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::SimulatorConfig;

/// A single semantic problem in a config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("seed.load_balancers contains an empty name")]
    EmptySeedName,

    #[error("seed.load_balancers contains '{0}' more than once")]
    DuplicateSeedName(String),
}

/// Check `config`, collecting every problem found.
pub fn validate_config(config: &SimulatorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let mut seen = HashSet::new();
    for name in &config.seed.load_balancers {
        if name.is_empty() {
            errors.push(ValidationError::EmptySeedName);
        } else if !seen.insert(name.as_str()) {
            errors.push(ValidationError::DuplicateSeedName(name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
