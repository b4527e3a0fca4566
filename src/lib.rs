//! In-process simulator of a cloud load balancer management API.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request (form-encoded Action=...)
//!     ─────────────▶ http::server ──▶ http::dispatcher ──▶ actions::* ──▶ model::ModelStore
//!                                          │                                   (one lock)
//!     XML response / ErrorResponse         ▼
//!     ◀───────────── http::server ◀── protocol::response
//! ```
//!
//! Tests typically start an [`ElbServer`], seed instances through
//! [`ElbServer::new_instance`], and point the client under test at
//! [`ElbServer::url`].

// Core subsystems
pub mod actions;
pub mod http;
pub mod model;
pub mod protocol;

// Cross-cutting concerns
pub mod admin;
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::SimulatorConfig;
pub use http::ElbServer;
pub use lifecycle::Shutdown;
pub use model::ModelStore;
pub use protocol::{ElbError, FormValues};
