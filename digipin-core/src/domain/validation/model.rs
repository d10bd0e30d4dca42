// digipin-core/src/domain/validation/model.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::address::AddressParts;
use crate::domain::geo::Coordinate;

/// Body of a validation call, as sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    pub user_id: String,
    pub consent_id: String,
    pub address_parts: AddressParts,
    pub latitude: f64,
    pub longitude: f64,
    /// Code the caller already holds, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digipin: Option<String>,
}

impl ValidationRequest {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// The supplied code, ignoring blank strings.
    pub fn supplied_digipin(&self) -> Option<&str> {
        self.digipin
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}

/// Outcome of one independent check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationCheck {
    pub check_name: String,
    pub passed: bool,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ValidationCheck {
    pub fn new(name: &str, passed: bool, confidence: f64, details: impl Into<String>) -> Self {
        Self {
            check_name: name.to_string(),
            passed,
            confidence: confidence.clamp(0.0, 1.0),
            details: Some(details.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationDetails {
    pub checks: Vec<ValidationCheck>,
    pub timestamp: DateTime<Utc>,
    pub processing_time_ms: f64,
}

/// Audit stamp the backend attaches to its answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStamp {
    pub request_id: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

/// Verdict of one validation call. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub request_id: String,
    pub is_valid: bool,
    pub confidence_score: f64,
    pub digipin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_address: Option<String>,
    pub validation_details: ValidationDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_log: Option<AuditStamp>,
}

impl ValidationResult {
    pub fn checks(&self) -> &[ValidationCheck] {
        &self.validation_details.checks
    }

    pub fn check(&self, name: &str) -> Option<&ValidationCheck> {
        self.checks().iter().find(|c| c.check_name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationState {
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationStatusResponse {
    pub request_id: String,
    pub status: ValidationState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ValidationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}
