// digipin-core/src/ports/audit.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::geo::Coordinate;
use crate::error::DigipinError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    GenerateDigipin,
    ValidateAddress,
    RequestConsent,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::GenerateDigipin => "generate_digipin",
            AuditAction::ValidateAddress => "validate_address",
            AuditAction::RequestConsent => "request_consent",
        }
    }
}

/// Who answered a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// The remote backend.
    Remote,
    /// The local engine, after the backend could not be reached.
    Fallback,
    /// The local engine, because the service runs in offline mode.
    Offline,
}

/// One line of the audit trail, written after every successful call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
    pub action: AuditAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digipin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinate>,
    pub input: serde_json::Value,
    pub result: serde_json::Value,
    pub source: Source,
}

#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, entry: AuditRecord) -> Result<(), DigipinError>;
}
