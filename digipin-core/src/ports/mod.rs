// digipin-core/src/ports/mod.rs

pub mod audit;
pub mod backend;

pub use audit::{AuditAction, AuditRecord, AuditSink, Source};
pub use backend::AddressBackend;
