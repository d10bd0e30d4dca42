// digipin-core/src/infrastructure/config/settings.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};
use validator::Validate;

use crate::domain::settings::{Mode, Settings};
use crate::infrastructure::error::InfrastructureError;

const CANDIDATES: [&str; 2] = ["digipin.yaml", "digipin_conf.yaml"];

/// Loads `Settings` from `config_dir`, then applies `DIGIPIN_*` variables
/// from the process environment and validates the result.
#[instrument]
pub fn load_settings(config_dir: &Path) -> Result<Settings, InfrastructureError> {
    load_settings_with(config_dir, |key| std::env::var(key).ok())
}

/// Same as [`load_settings`] with an injected environment lookup.
pub fn load_settings_with(
    config_dir: &Path,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Settings, InfrastructureError> {
    let mut settings = match find_config(config_dir) {
        Some(path) => {
            info!(path = ?path, "Loading settings");
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content)?
        }
        None => {
            info!(dir = ?config_dir, "No settings file found, using defaults");
            Settings::default()
        }
    };

    apply_env_overrides(&mut settings, lookup)?;

    settings
        .validate()
        .map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;
    Ok(settings)
}

fn find_config(root: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.exists())
}

pub fn apply_env_overrides(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), InfrastructureError> {
    if let Some(val) = lookup("DIGIPIN_API_BASE_URL") {
        info!(old = ?settings.api_base_url, new = ?val, "Overriding API base URL via ENV");
        settings.api_base_url = val;
    }
    if let Some(val) = lookup("DIGIPIN_MODE") {
        settings.mode = val
            .parse::<Mode>()
            .map_err(InfrastructureError::ConfigError)?;
        info!(mode = ?settings.mode, "Overriding mode via ENV");
    }
    // Legacy switch: any truthy value forces offline mode.
    if let Some(val) = lookup("DIGIPIN_DEMO_MODE") {
        if matches!(val.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes") {
            info!("Demo mode requested via ENV, forcing offline");
            settings.mode = Mode::Offline;
        }
    }
    if let Some(val) = lookup("DIGIPIN_TIMEOUT_SECS") {
        settings.timeout_secs = val.trim().parse().map_err(|_| {
            InfrastructureError::ConfigError(format!("DIGIPIN_TIMEOUT_SECS is not a number: '{val}'"))
        })?;
    }
    if let Some(val) = lookup("DIGIPIN_AUDIT_LOG") {
        settings.audit_log = val;
    }
    if let Some(val) = lookup("DIGIPIN_USER_ID") {
        if val.trim().is_empty() {
            warn!("Ignoring empty DIGIPIN_USER_ID");
        } else {
            settings.default_user_id = val;
        }
    }
    Ok(())
}
