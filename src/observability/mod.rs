//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher, store, server lifecycle produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (per-action counters and latency)
//!
//! Consumers:
//!     → stdout (tracing-subscriber fmt layer)
//!     → Prometheus scrape (optional)
//! ```
//!
//! # Design Decisions
//! - Request id and action name are attached to every dispatch event
//! - Metrics are recorded even when no exporter is installed (no-op recorder)

pub mod logging;
pub mod metrics;
