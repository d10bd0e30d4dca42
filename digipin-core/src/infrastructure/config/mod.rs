pub mod settings;

pub use crate::domain::settings::{Mode, Settings};
pub use settings::{apply_env_overrides, load_settings, load_settings_with};
