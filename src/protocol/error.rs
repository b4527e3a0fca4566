//! Provider-shaped errors.

use thiserror::Error;

/// Errors a caller can recover from; serialized as the error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElbError {
    /// The `Action` field names no known operation.
    #[error("Unrecognized Action")]
    UnrecognizedAction,

    /// Missing field, bad field composition or malformed value.
    #[error("{0}")]
    Validation(String),

    /// The referenced load balancer does not exist.
    #[error("There is no ACTIVE Load Balancer named '{0}'")]
    LoadBalancerNotFound(String),

    /// The referenced instance does not exist.
    #[error("InvalidInstance found in [{0}]. Invalid id: \"{0}\"")]
    InvalidInstance(String),
}

impl ElbError {
    /// Wire error code.
    pub fn code(&self) -> &'static str {
        match self {
            ElbError::UnrecognizedAction => "InvalidParameterValue",
            ElbError::Validation(_) => "ValidationError",
            ElbError::LoadBalancerNotFound(_) => "LoadBalancerNotFound",
            ElbError::InvalidInstance(_) => "InvalidInstance",
        }
    }

    /// HTTP status carried by the envelope.
    pub fn status_code(&self) -> u16 {
        400
    }

    /// `<field> is required.`
    pub fn required(field: &str) -> Self {
        ElbError::Validation(format!("{} is required.", field))
    }
}

/// Defects in the simulator itself. Never returned to a caller.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// A payload could not be encoded as XML.
    #[error("failed to encode {root}: {reason}")]
    Serialize { root: String, reason: String },
}

/// Outcome of a single action handler.
pub type ElbResult<T> = Result<T, ElbError>;
