// digipin-core/src/application/service.rs

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, error, info, instrument, warn};

use crate::application::offline::OfflineBackend;
use crate::domain::DomainError;
use crate::domain::consent::{ConsentRecord, RevokeResponse};
use crate::domain::geo::{Coordinate, DigipinResponse};
use crate::domain::settings::Mode;
use crate::domain::validation::{ValidationRequest, ValidationResult, ValidationStatusResponse};
use crate::error::DigipinError;
use crate::ports::audit::{AuditAction, AuditRecord, AuditSink, Source};
use crate::ports::backend::{AddressBackend, operation};

/// A backend answer tagged with who produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Served<T> {
    pub value: T,
    pub source: Source,
}

impl<T> Served<T> {
    fn new(value: T, source: Source) -> Self {
        Self { value, source }
    }
}

/// Front door for every DIGIPIN operation.
///
/// Online, each call goes to the primary backend first. A transport failure
/// (nothing came back) reroutes that single call to the fallback; an error
/// response from the backend is returned as-is. Offline, the primary is never
/// contacted.
pub struct ValidationService {
    mode: Mode,
    primary: Option<Arc<dyn AddressBackend>>,
    fallback: Arc<dyn AddressBackend>,
    audit: Arc<dyn AuditSink>,
}

impl ValidationService {
    pub fn new(
        mode: Mode,
        primary: Option<Arc<dyn AddressBackend>>,
        fallback: Arc<dyn AddressBackend>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            mode,
            primary,
            fallback,
            audit,
        }
    }

    pub fn online(primary: Arc<dyn AddressBackend>, audit: Arc<dyn AuditSink>) -> Self {
        Self::new(
            Mode::Online,
            Some(primary),
            Arc::new(OfflineBackend::new()),
            audit,
        )
    }

    pub fn offline(audit: Arc<dyn AuditSink>) -> Self {
        Self::new(Mode::Offline, None, Arc::new(OfflineBackend::new()), audit)
    }

    /// Offline when configured so, or when no primary backend was wired.
    pub fn mode(&self) -> Mode {
        match (self.mode, &self.primary) {
            (Mode::Online, Some(_)) => Mode::Online,
            _ => Mode::Offline,
        }
    }

    fn primary(&self) -> Option<&(dyn AddressBackend + 'static)> {
        match self.mode {
            Mode::Online => self.primary.as_deref(),
            Mode::Offline => None,
        }
    }

    // --- PIPELINE ---

    /// Two-stage call: primary, then fallback on transport failure only.
    async fn dispatch<'a, T, F>(
        &'a self,
        operation: &'static str,
        call: F,
    ) -> Result<Served<T>, DigipinError>
    where
        T: Send,
        F: Fn(&'a dyn AddressBackend) -> BoxFuture<'a, Result<T, DigipinError>> + Send,
    {
        let Some(primary) = self.primary() else {
            let value = call(self.fallback.as_ref()).await?;
            return Ok(Served::new(value, Source::Offline));
        };

        match call(primary).await {
            Ok(value) => Ok(Served::new(value, Source::Remote)),
            Err(DigipinError::Transport { reason, .. }) => {
                warn!(operation, %reason, "⚠️  Backend unreachable, answering offline");
                let value = call(self.fallback.as_ref()).await?;
                Ok(Served::new(value, Source::Fallback))
            }
            Err(e) => Err(e),
        }
    }

    // --- OPERATIONS ---

    #[instrument(skip(self))]
    pub async fn generate_grid_code(
        &self,
        user_id: &str,
        coordinate: Coordinate,
    ) -> Result<Served<DigipinResponse>, DigipinError> {
        coordinate.ensure_valid()?;

        let served = self
            .dispatch(operation::GENERATE_DIGIPIN, |backend| {
                backend.generate_grid_code(coordinate)
            })
            .await?;
        info!(digipin = %served.value.digipin, source = ?served.source, "DIGIPIN generated");

        self.emit(AuditRecord {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            user_id: user_id.to_string(),
            action: AuditAction::GenerateDigipin,
            request_id: None,
            digipin: Some(served.value.digipin.clone()),
            coordinates: Some(coordinate),
            input: json!({
                "latitude": coordinate.latitude,
                "longitude": coordinate.longitude,
            }),
            result: to_json(&served.value),
            source: served.source,
        })
        .await;

        Ok(served)
    }

    #[instrument(skip(self))]
    pub async fn request_consent(
        &self,
        user_id: &str,
        action: &str,
    ) -> Result<Served<ConsentRecord>, DigipinError> {
        let served = self
            .dispatch(operation::REQUEST_CONSENT, |backend| {
                backend.request_consent(user_id, action)
            })
            .await?;
        info!(consent_id = %served.value.consent_id, status = %served.value.status, "Consent recorded");

        self.emit(AuditRecord {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            user_id: user_id.to_string(),
            action: AuditAction::RequestConsent,
            request_id: Some(served.value.consent_id.clone()),
            digipin: None,
            coordinates: None,
            input: json!({ "userId": user_id, "action": action }),
            result: to_json(&served.value),
            source: served.source,
        })
        .await;

        Ok(served)
    }

    /// Requires a consent identifier; nothing is sent without one.
    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn validate_address(
        &self,
        request: &ValidationRequest,
    ) -> Result<Served<ValidationResult>, DigipinError> {
        if request.consent_id.trim().is_empty() {
            return Err(DomainError::ConsentMissing.into());
        }

        let start = Instant::now();
        let served = self
            .dispatch(operation::VALIDATE_ADDRESS, |backend| {
                backend.validate_address(request)
            })
            .await?;
        debug!("✅ Validation answered in {:.2?}", start.elapsed());
        info!(
            request_id = %served.value.request_id,
            valid = served.value.is_valid,
            source = ?served.source,
            "Address validated"
        );

        self.emit(AuditRecord {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            user_id: request.user_id.clone(),
            action: AuditAction::ValidateAddress,
            request_id: Some(served.value.request_id.clone()),
            digipin: (!served.value.digipin.is_empty()).then(|| served.value.digipin.clone()),
            coordinates: Some(request.coordinate()),
            input: to_json(request),
            result: to_json(&served.value),
            source: served.source,
        })
        .await;

        Ok(served)
    }

    /// Checks the consent record itself (status, expiry) before validating
    /// under its identifier.
    pub async fn validate_with_consent(
        &self,
        mut request: ValidationRequest,
        consent: &ConsentRecord,
    ) -> Result<Served<ValidationResult>, DigipinError> {
        consent.authorize(Utc::now())?;
        request.consent_id = consent.consent_id.clone();
        self.validate_address(&request).await
    }

    #[instrument(skip(self))]
    pub async fn validation_status(
        &self,
        request_id: &str,
    ) -> Result<Served<ValidationStatusResponse>, DigipinError> {
        self.dispatch(operation::VALIDATION_STATUS, |backend| {
            backend.validation_status(request_id)
        })
        .await
    }

    /// Revocation never falls back: a local "success" would hide a consent
    /// that is still active remotely.
    #[instrument(skip(self))]
    pub async fn revoke_consent(
        &self,
        consent_id: &str,
    ) -> Result<Served<RevokeResponse>, DigipinError> {
        let Some(primary) = self.primary() else {
            let value = self.fallback.revoke_consent(consent_id).await?;
            return Ok(Served::new(value, Source::Offline));
        };

        match primary.revoke_consent(consent_id).await {
            Ok(value) => Ok(Served::new(value, Source::Remote)),
            Err(e) => {
                if e.is_transport() {
                    warn!(consent_id, "Revocation may not have reached the backend");
                }
                Err(e)
            }
        }
    }

    // --- AUDIT ---

    async fn emit(&self, entry: AuditRecord) {
        if let Err(e) = self.audit.record(entry).await {
            error!("❌ Failed to write audit entry: {}", e);
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
