// digipin-core/src/infrastructure/adapters/http.rs

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::DomainError;
use crate::domain::consent::{ConsentRecord, ConsentRequest, RevokeResponse};
use crate::domain::geo::{Coordinate, DigipinResponse};
use crate::domain::settings::Settings;
use crate::domain::validation::{ValidationRequest, ValidationResult, ValidationStatusResponse};
use crate::error::DigipinError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::backend::{AddressBackend, operation};

/// JSON-over-HTTP client for the remote DIGIPIN service.
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    client_id: String,
    // Advisory only: never consulted when routing calls.
    online: AtomicBool,
}

impl HttpBackend {
    pub fn new(
        base_url: &str,
        client_id: &str,
        timeout: Duration,
    ) -> Result<Self, InfrastructureError> {
        let parsed = Url::parse(base_url).map_err(|e| {
            InfrastructureError::ConfigError(format!("api_base_url '{base_url}' is not a URL: {e}"))
        })?;
        if parsed.cannot_be_a_base() {
            return Err(InfrastructureError::ConfigError(format!(
                "api_base_url '{base_url}' cannot carry a path"
            )));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: parsed,
            client_id: client_id.to_string(),
            online: AtomicBool::new(true),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, InfrastructureError> {
        Self::new(
            &settings.api_base_url,
            &settings.client_id,
            Duration::from_secs(settings.timeout_secs),
        )
    }

    /// Whether the last call got any response at all.
    pub fn is_reachable(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }

    /// Appends `segments` to the base path. Each segment is percent-encoded
    /// on its own, so an id containing `/`, `?` or `#` stays in its slot.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, DigipinError> {
        if let Some(bad) = segments
            .iter()
            .find(|segment| matches!(segment.trim(), "" | "." | ".."))
        {
            return Err(DomainError::InvalidIdentifier((*bad).to_string()).into());
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                DigipinError::InternalError(format!("{} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends the request and maps the outcome onto the backend error split:
    /// nothing back is `Transport`, an error status is `Application`, an
    /// unreadable body is `MalformedResponse`.
    async fn send<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, DigipinError> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                if self.online.swap(false, Ordering::Relaxed) {
                    warn!(operation, error = %e, "Backend became unreachable");
                } else {
                    debug!(operation, error = %e, "Backend still unreachable");
                }
                return Err(DigipinError::Transport {
                    operation,
                    reason: e.to_string(),
                });
            }
        };
        if !self.online.swap(true, Ordering::Relaxed) {
            info!(operation, "Backend reachable again");
        }

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DigipinError::Application {
                operation,
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DigipinError::Transport {
                operation,
                reason: e.to_string(),
            })?;
        serde_json::from_slice(&body).map_err(|e| DigipinError::MalformedResponse {
            operation,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl AddressBackend for HttpBackend {
    async fn generate_grid_code(
        &self,
        coordinate: Coordinate,
    ) -> Result<DigipinResponse, DigipinError> {
        let body = json!({
            "latitude": coordinate.latitude,
            "longitude": coordinate.longitude,
        });
        let request = self.client.post(self.endpoint(&["generate-digipin"])?).json(&body);
        self.send(operation::GENERATE_DIGIPIN, request).await
    }

    async fn request_consent(
        &self,
        user_id: &str,
        action: &str,
    ) -> Result<ConsentRecord, DigipinError> {
        let body = ConsentRequest {
            user_id: user_id.to_string(),
            action: action.to_string(),
            client_id: Some(self.client_id.clone()),
        };
        let request = self.client.post(self.endpoint(&["consent"])?).json(&body);
        self.send(operation::REQUEST_CONSENT, request).await
    }

    async fn validate_address(
        &self,
        request: &ValidationRequest,
    ) -> Result<ValidationResult, DigipinError> {
        let http = self.client.post(self.endpoint(&["validate-address"])?).json(request);
        self.send(operation::VALIDATE_ADDRESS, http).await
    }

    async fn validation_status(
        &self,
        request_id: &str,
    ) -> Result<ValidationStatusResponse, DigipinError> {
        let request = self
            .client
            .get(self.endpoint(&["validation-status", request_id])?);
        self.send(operation::VALIDATION_STATUS, request).await
    }

    async fn revoke_consent(&self, consent_id: &str) -> Result<RevokeResponse, DigipinError> {
        let request = self
            .client
            .post(self.endpoint(&["consent", consent_id, "revoke"])?);
        self.send(operation::REVOKE_CONSENT, request).await
    }
}
