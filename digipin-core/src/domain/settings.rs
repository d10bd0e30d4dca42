// digipin-core/src/domain/settings.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Where backend calls go.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Remote backend first, local engine when it cannot be reached.
    #[default]
    Online,
    /// Local engine only.
    Offline,
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "online" => Ok(Mode::Online),
            "offline" => Ok(Mode::Offline),
            other => Err(format!("unknown mode '{other}' (expected online|offline)")),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate, PartialEq)]
pub struct Settings {
    #[validate(url(message = "api_base_url must be an absolute URL"))]
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[validate(range(min = 1, max = 300, message = "timeout_secs must be within 1..=300"))]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub mode: Mode,

    #[validate(length(min = 1, message = "client_id cannot be empty"))]
    #[serde(default = "default_client_id")]
    pub client_id: String,

    #[validate(length(min = 1, message = "audit_log cannot be empty"))]
    #[serde(default = "default_audit_log")]
    pub audit_log: String,

    #[serde(default = "default_user_id")]
    pub default_user_id: String,

    #[serde(default = "default_consent_action")]
    pub consent_action: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            mode: Mode::default(),
            client_id: default_client_id(),
            audit_log: default_audit_log(),
            default_user_id: default_user_id(),
            consent_action: default_consent_action(),
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_client_id() -> String {
    "digipin-cli".to_string()
}
fn default_audit_log() -> String {
    "digipin_audit.jsonl".to_string()
}
fn default_user_id() -> String {
    "demo-user".to_string()
}
fn default_consent_action() -> String {
    crate::domain::consent::DEFAULT_ACTION.to_string()
}
