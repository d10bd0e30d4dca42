// digipin-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(digipin::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(digipin::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(digipin::infra::config))]
    ConfigError(String),

    // --- AUDIT LOG (JSON lines) ---
    #[error("JSON Error: {0}")]
    #[diagnostic(code(digipin::infra::json))]
    Json(#[from] serde_json::Error),

    // --- HTTP CLIENT ---
    #[error("HTTP client setup failed: {0}")]
    #[diagnostic(
        code(digipin::infra::http_client),
        help("Check the configured API base URL and TLS setup.")
    )]
    HttpClient(#[from] reqwest::Error),
}
