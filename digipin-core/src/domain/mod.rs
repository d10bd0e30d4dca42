pub mod address;
pub mod consent;
pub mod error;
pub mod geo;
pub mod settings;
pub mod validation;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
pub use settings::{Mode, Settings};
