// digipin-core/src/application/offline.rs
//
// Fallback strategy: answers every backend call locally with the grid coder
// and the validation engine. Same response shapes as the remote service.

use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::domain::consent::{ConsentRecord, RevokeResponse};
use crate::domain::geo::{Coordinate, DigipinResponse, GridCoder};
use crate::domain::validation::{
    AuditStamp, ValidationDetails, ValidationEngine, ValidationRequest, ValidationResult,
    ValidationState, ValidationStatusResponse,
};
use crate::error::DigipinError;
use crate::ports::backend::AddressBackend;

pub struct OfflineBackend {
    engine: ValidationEngine,
}

impl Default for OfflineBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl OfflineBackend {
    pub fn new() -> Self {
        Self::with_engine(ValidationEngine::standard())
    }

    pub fn with_engine(engine: ValidationEngine) -> Self {
        Self { engine }
    }

    /// Runs the check battery and builds a fresh result for `request`.
    pub fn synthesize_validation(&self, request: &ValidationRequest) -> ValidationResult {
        let started = Instant::now();
        let request_id = format!("req-{}", uuid::Uuid::new_v4());

        // An out-of-range coordinate yields no code; the checks report why.
        let digipin = match request.supplied_digipin() {
            Some(code) => code.to_string(),
            None => GridCoder::encode(request.coordinate())
                .map(|cell| cell.code)
                .unwrap_or_default(),
        };

        let (checks, verdict) = self.engine.evaluate(request);

        let normalized = request.address_parts.normalize();
        let normalized_address = (!normalized.is_empty()).then_some(normalized);

        let timestamp = Utc::now();
        let processing_time_ms = started.elapsed().as_secs_f64() * 1000.0;
        debug!(%request_id, valid = verdict.is_valid, "Offline validation synthesized");

        ValidationResult {
            request_id: request_id.clone(),
            is_valid: verdict.is_valid,
            confidence_score: verdict.confidence_score,
            digipin,
            normalized_address,
            validation_details: ValidationDetails {
                checks,
                timestamp,
                processing_time_ms,
            },
            audit_log: Some(AuditStamp {
                request_id,
                user_id: request.user_id.clone(),
                timestamp,
                ip_address: None,
            }),
        }
    }
}

#[async_trait]
impl AddressBackend for OfflineBackend {
    async fn generate_grid_code(
        &self,
        coordinate: Coordinate,
    ) -> Result<DigipinResponse, DigipinError> {
        let cell = GridCoder::encode(coordinate)?;
        Ok(DigipinResponse::from_cell(coordinate, cell, Utc::now()))
    }

    async fn request_consent(
        &self,
        user_id: &str,
        action: &str,
    ) -> Result<ConsentRecord, DigipinError> {
        Ok(ConsentRecord::granted(user_id, action, Utc::now()))
    }

    async fn validate_address(
        &self,
        request: &ValidationRequest,
    ) -> Result<ValidationResult, DigipinError> {
        Ok(self.synthesize_validation(request))
    }

    /// Nothing is stored locally, so there is no status to report.
    async fn validation_status(
        &self,
        request_id: &str,
    ) -> Result<ValidationStatusResponse, DigipinError> {
        Ok(ValidationStatusResponse {
            request_id: request_id.to_string(),
            status: ValidationState::Failed,
            result: None,
            error: Some("Validation status is not tracked in offline mode".to_string()),
            timestamp: Utc::now(),
        })
    }

    async fn revoke_consent(&self, _consent_id: &str) -> Result<RevokeResponse, DigipinError> {
        Ok(RevokeResponse { success: true })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::domain::address::AddressParts;
    use crate::domain::consent::ConsentStatus;

    fn request(parts: AddressParts, digipin: Option<&str>) -> ValidationRequest {
        ValidationRequest {
            user_id: "user-7".into(),
            consent_id: "consent-7".into(),
            address_parts: parts,
            latitude: 28.6139,
            longitude: 77.2090,
            digipin: digipin.map(str::to_string),
        }
    }

    fn delhi_parts() -> AddressParts {
        AddressParts {
            street: Some("Main Street".into()),
            area: Some("Sector 15".into()),
            district: Some("New Delhi".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_generate_matches_grid_coder() {
        let point = Coordinate::new(28.6139, 77.2090);
        let response = OfflineBackend::new().generate_grid_code(point).await.unwrap();

        assert_eq!(response.digipin, GridCoder::encode(point).unwrap().code);
        assert_eq!(response.latitude, 28.6139);
        assert_eq!(response.precision_meters, 4);
        assert!(response.grid_boundaries.contains(&point));
    }

    #[tokio::test]
    async fn test_generate_rejects_invalid_coordinate() {
        let err = OfflineBackend::new()
            .generate_grid_code(Coordinate::new(0.0, 181.0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DigipinError::Domain(DomainError::InvalidCoordinate { .. })
        ));
    }

    #[tokio::test]
    async fn test_consent_is_granted_for_a_day() {
        let consent = OfflineBackend::new()
            .request_consent("user-7", "address_validation")
            .await
            .unwrap();
        assert_eq!(consent.status, ConsentStatus::Granted);
        assert_eq!(consent.user_id, "user-7");
        let ttl = consent.expires_at.unwrap() - consent.timestamp;
        assert_eq!(ttl.num_hours(), 24);
    }

    #[test]
    fn test_validation_derives_missing_code() {
        let result = OfflineBackend::new().synthesize_validation(&request(delhi_parts(), None));

        assert!(result.is_valid);
        assert!((result.confidence_score - 0.92).abs() < 1e-9);
        assert_eq!(
            result.digipin,
            GridCoder::encode(Coordinate::new(28.6139, 77.2090))
                .unwrap()
                .code
        );
        assert_eq!(
            result.normalized_address.as_deref(),
            Some("Main Street, Sector 15, New Delhi")
        );
        assert!(result.validation_details.processing_time_ms >= 0.0);
        assert_eq!(result.audit_log.unwrap().user_id, "user-7");
    }

    #[test]
    fn test_validation_keeps_supplied_code_and_reports_mismatch() {
        let result =
            OfflineBackend::new().synthesize_validation(&request(delhi_parts(), Some("DPBAD")));
        assert_eq!(result.digipin, "DPBAD");
        assert!(!result.is_valid);
        assert!(!result.check("digipin_match").unwrap().passed);
    }

    #[test]
    fn test_each_validation_gets_a_fresh_request_id() {
        let backend = OfflineBackend::new();
        let a = backend.synthesize_validation(&request(delhi_parts(), None));
        let b = backend.synthesize_validation(&request(delhi_parts(), None));
        assert!(a.request_id.starts_with("req-"));
        assert_ne!(a.request_id, b.request_id);
    }

    #[tokio::test]
    async fn test_status_is_not_invented_offline() {
        let status = OfflineBackend::new()
            .validation_status("req-1")
            .await
            .unwrap();
        assert_eq!(status.status, ValidationState::Failed);
        assert!(status.result.is_none());
        assert!(status.error.is_some());
    }
}
