// digipin-core/src/domain/validation/mod.rs

pub mod checks;
pub mod engine;
pub mod model;

pub use checks::AddressCheck;
pub use engine::{ValidationEngine, Verdict};
pub use model::{
    AuditStamp, ValidationCheck, ValidationDetails, ValidationRequest, ValidationResult,
    ValidationState, ValidationStatusResponse,
};
