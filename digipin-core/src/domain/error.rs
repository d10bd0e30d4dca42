// digipin-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid coordinate: ({latitude}, {longitude})")]
    #[diagnostic(
        code(digipin::domain::coordinate),
        help("Latitude must lie in [-90, 90] and longitude in [-180, 180].")
    )]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("No consent on record for this validation request")]
    #[diagnostic(
        code(digipin::domain::consent_missing),
        help("Request consent first (`digipin consent`) and pass its id.")
    )]
    ConsentMissing,

    #[error("Consent '{0}' has expired")]
    #[diagnostic(code(digipin::domain::consent_expired))]
    ConsentExpired(String),

    #[error("Consent '{consent_id}' is {status}, not granted")]
    #[diagnostic(code(digipin::domain::consent_not_granted))]
    ConsentNotGranted { consent_id: String, status: String },

    #[error("Address is too sparse to submit: {0}")]
    #[diagnostic(
        code(digipin::domain::incomplete_address),
        help("Provide at least one of street, area or district.")
    )]
    IncompleteAddress(String),

    #[error("Invalid identifier: '{0}'")]
    #[diagnostic(
        code(digipin::domain::identifier),
        help("Request and consent ids cannot be blank, '.' or '..'.")
    )]
    InvalidIdentifier(String),
}
