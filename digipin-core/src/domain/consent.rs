// digipin-core/src/domain/consent.rs

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::DomainError;

pub const DEFAULT_ACTION: &str = "address_validation";

/// Lifetime of a consent synthesized without the backend.
pub const OFFLINE_CONSENT_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConsentStatus {
    #[default]
    Granted,
    Pending,
    Revoked,
}

impl ConsentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Pending => "pending",
            Self::Revoked => "revoked",
        }
    }
}

impl fmt::Display for ConsentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Body of a consent request sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentRequest {
    pub user_id: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

/// A time-bounded authorization to validate addresses on behalf of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentRecord {
    pub consent_id: String,
    pub user_id: String,
    pub action: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub status: ConsentStatus,
}

impl ConsentRecord {
    /// A granted consent with a fresh id and the fixed offline lifetime.
    pub fn granted(user_id: &str, action: &str, now: DateTime<Utc>) -> Self {
        Self {
            consent_id: format!("consent-{}", uuid::Uuid::new_v4()),
            user_id: user_id.to_string(),
            action: action.to_string(),
            timestamp: now,
            expires_at: Some(now + Duration::hours(OFFLINE_CONSENT_TTL_HOURS)),
            status: ConsentStatus::Granted,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| expiry <= now)
    }

    /// Gate applied before a validation request is accepted.
    pub fn authorize(&self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.consent_id.trim().is_empty() {
            return Err(DomainError::ConsentMissing);
        }
        if self.status != ConsentStatus::Granted {
            return Err(DomainError::ConsentNotGranted {
                consent_id: self.consent_id.clone(),
                status: self.status.to_string(),
            });
        }
        if self.is_expired(now) {
            return Err(DomainError::ConsentExpired(self.consent_id.clone()));
        }
        Ok(())
    }
}

/// Backend acknowledgement of a revocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokeResponse {
    pub success: bool,
}
