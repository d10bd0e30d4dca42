pub mod audit_log;
pub mod http;

pub use audit_log::JsonlAuditLog;
pub use http::HttpBackend;
