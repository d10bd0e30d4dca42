// digipin-core/src/application/mod.rs

pub mod offline;
pub mod service;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Le CLI peut faire `use digipin_core::application::{ValidationService, Served};`
// sans connaître la structure interne des fichiers.

pub use offline::OfflineBackend;
pub use service::{Served, ValidationService};
