//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Logging/metrics → Bind → Seed model → Serve
//!
//! Shutdown (shutdown.rs):
//!     Trigger → Stop accepting → Server task exits
//!
//! Signals (signals.rs):
//!     SIGINT/SIGTERM → Trigger shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - In-flight requests finish on their own; nothing is drained explicitly

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
