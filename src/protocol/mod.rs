//! Wire protocol contract.
//!
//! # Data Flow
//! ```text
//! raw body + query string
//!     → form.rs (FormValues, positional-list walk)
//!     → [actions run against the model]
//!     → response.rs (ActionResponse → XML) or error.rs (ElbError → envelope)
//! ```

pub mod error;
pub mod form;
pub mod response;

pub use error::{ElbError, ElbResult, FixtureError};
pub use form::{FormValues, Member, Members};
pub use response::{ActionResponse, InstanceState, LoadBalancerDescription};
