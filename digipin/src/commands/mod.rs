// digipin/src/commands/mod.rs

pub mod audit;
pub mod consent;
pub mod encode;
pub mod revoke;
pub mod status;
pub mod suggest;
pub mod validate;

use std::path::Path;
use std::sync::Arc;

use digipin_core::application::ValidationService;
use digipin_core::infrastructure::adapters::{HttpBackend, JsonlAuditLog};
use digipin_core::infrastructure::config::{Mode, Settings, load_settings};
use digipin_core::ports::Source;
use tracing::debug;

/// Everything a command needs, wired once from the settings.
pub struct Context {
    pub settings: Settings,
    pub service: ValidationService,
    pub audit_log: Arc<JsonlAuditLog>,
    /// Present in online mode only.
    pub backend: Option<Arc<HttpBackend>>,
}

impl Context {
    pub fn load(config_dir: &Path, offline: bool) -> anyhow::Result<Self> {
        let mut settings = load_settings(config_dir)?;
        if offline {
            settings.mode = Mode::Offline;
        }

        // Relative audit paths live next to the settings file.
        let audit_log = Arc::new(JsonlAuditLog::new(config_dir.join(&settings.audit_log)));

        let backend = match settings.mode {
            Mode::Online => Some(Arc::new(HttpBackend::from_settings(&settings)?)),
            Mode::Offline => None,
        };
        let service = match &backend {
            Some(http) => ValidationService::online(http.clone(), audit_log.clone()),
            None => ValidationService::offline(audit_log.clone()),
        };

        debug!(mode = ?service.mode(), audit = ?audit_log.path(), "Service wired");

        Ok(Self {
            settings,
            service,
            audit_log,
            backend,
        })
    }

    pub fn user(&self, user: Option<String>) -> String {
        user.unwrap_or_else(|| self.settings.default_user_id.clone())
    }
}

pub fn source_label(source: Source) -> &'static str {
    match source {
        Source::Remote => "backend",
        Source::Fallback => "offline engine (backend unreachable)",
        Source::Offline => "offline engine",
    }
}
