//! Simulator state.
//!
//! # Data Flow
//! ```text
//! Dispatcher
//!     → store.rs (ModelStore::lock, held for the whole request)
//!     → StoreState (load balancers, instances, request counter)
//!     → types.rs (values rendered into descriptions)
//! ```

pub mod store;
pub mod types;

pub use store::{LoadBalancerEntry, ModelStore, StoreState};
pub use types::{HealthCheck, Listener, SourceSecurityGroup};
