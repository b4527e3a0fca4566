//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, form decoding)
//!     → dispatcher.rs (action lookup, request id, model lock)
//!     → [action handler]
//!     → dispatcher.rs (XML success document or error envelope)
//!     → Send to client
//! ```

pub mod dispatcher;
pub mod server;

pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use server::{AppState, ElbServer, ServerError};
