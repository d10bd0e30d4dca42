// digipin-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DigipinError {
    // --- DOMAIN (coordinates, consent, address preconditions) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE (IO, config, audit log) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- BACKEND ---
    /// No response was received (connection refused, DNS, timeout).
    #[error("Backend unreachable during '{operation}': {reason}")]
    #[diagnostic(
        code(digipin::backend::transport),
        help("The backend could not be reached. Retry later or use --offline.")
    )]
    Transport {
        operation: &'static str,
        reason: String,
    },

    /// The backend answered with an error status.
    #[error("Backend rejected '{operation}' (HTTP {status}): {message}")]
    #[diagnostic(code(digipin::backend::application))]
    Application {
        operation: &'static str,
        status: u16,
        message: String,
    },

    /// The backend answered, but the body did not match the contract.
    #[error("Backend returned an unreadable '{operation}' response: {message}")]
    #[diagnostic(code(digipin::backend::malformed))]
    MalformedResponse {
        operation: &'static str,
        message: String,
    },

    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl DigipinError {
    pub fn is_transport(&self) -> bool {
        matches!(self, DigipinError::Transport { .. })
    }
}

impl From<std::io::Error> for DigipinError {
    fn from(err: std::io::Error) -> Self {
        DigipinError::Infrastructure(InfrastructureError::Io(err))
    }
}
