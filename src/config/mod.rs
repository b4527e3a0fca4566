//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SimulatorConfig (validated, immutable)
//!     → ElbServer::start
//! ```
//!
//! # Design Decisions
//! - All fields have defaults; an empty file is a valid config
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::{
    AdminConfig, ListenerConfig, ObservabilityConfig, SeedConfig, SimulatorConfig, TimeoutConfig,
};
