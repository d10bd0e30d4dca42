// digipin-core/src/ports/backend.rs

// What the validation service needs from a DIGIPIN backend, whoever answers:
// the remote HTTP service or the local offline engine.

use async_trait::async_trait;

use crate::domain::consent::{ConsentRecord, RevokeResponse};
use crate::domain::geo::{Coordinate, DigipinResponse};
use crate::domain::validation::{ValidationRequest, ValidationResult, ValidationStatusResponse};
use crate::error::DigipinError;

pub mod operation {
    pub const GENERATE_DIGIPIN: &str = "generate_digipin";
    pub const REQUEST_CONSENT: &str = "request_consent";
    pub const VALIDATE_ADDRESS: &str = "validate_address";
    pub const VALIDATION_STATUS: &str = "validation_status";
    pub const REVOKE_CONSENT: &str = "revoke_consent";
}

/// Implementations must report "no response received" as
/// [`DigipinError::Transport`] and an error response as
/// [`DigipinError::Application`]; the service relies on that split to decide
/// whether to fall back.
#[async_trait]
pub trait AddressBackend: Send + Sync {
    async fn generate_grid_code(
        &self,
        coordinate: Coordinate,
    ) -> Result<DigipinResponse, DigipinError>;

    async fn request_consent(
        &self,
        user_id: &str,
        action: &str,
    ) -> Result<ConsentRecord, DigipinError>;

    async fn validate_address(
        &self,
        request: &ValidationRequest,
    ) -> Result<ValidationResult, DigipinError>;

    async fn validation_status(
        &self,
        request_id: &str,
    ) -> Result<ValidationStatusResponse, DigipinError>;

    async fn revoke_consent(&self, consent_id: &str) -> Result<RevokeResponse, DigipinError>;
}
