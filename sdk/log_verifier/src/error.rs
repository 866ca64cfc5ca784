use log_registry::{ErrorKind, RegistryError};
use thiserror::Error;

use crate::retry::RetryableError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VerifierError {
    #[error("registry rejected the call: {0:?}")]
    Rejected(RegistryError),

    #[error("transient registry failure: {0}")]
    Transient(String),

    /// The host aborted the invocation (failed auth, trap, budget). Replaying
    /// the same call against the same state fails the same way.
    #[error("registry invocation aborted: {0}")]
    Invoke(String),

    #[error("gave up after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("could not decode registry response: {0}")]
    Decode(String),
}

impl VerifierError {
    /// The registry error behind a permanent rejection, if any.
    pub fn registry_error(&self) -> Option<RegistryError> {
        match self {
            VerifierError::Rejected(err) => Some(*err),
            _ => None,
        }
    }

    /// HTTP status an API layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            VerifierError::Rejected(err) => match err.kind() {
                ErrorKind::Unauthorized => 403,
                ErrorKind::NotFound => 404,
                ErrorKind::AlreadyExists => 409,
                ErrorKind::InvalidArgument => 400,
                ErrorKind::Paused => 423,
                ErrorKind::Lifecycle => 503,
            },
            VerifierError::Transient(_) | VerifierError::RetriesExhausted { .. } => 503,
            VerifierError::Config(_) | VerifierError::Invoke(_) => 500,
            VerifierError::Decode(_) => 502,
        }
    }
}

impl RetryableError for VerifierError {
    fn is_retryable(&self) -> bool {
        matches!(self, VerifierError::Transient(_))
    }
}

impl From<RegistryError> for VerifierError {
    fn from(err: RegistryError) -> Self {
        VerifierError::Rejected(err)
    }
}

impl From<toml::de::Error> for VerifierError {
    fn from(err: toml::de::Error) -> Self {
        VerifierError::Config(err.to_string())
    }
}
