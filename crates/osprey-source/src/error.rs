use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while loading a resolver configuration.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file does not exist
    #[error("Configuration file not found: {0}")]
    #[diagnostic(
        code("CONFIG-001"),
        help("Pass the path of an existing osprey.toml, or use the default configuration")
    )]
    NotFound(PathBuf),

    /// Error reading the configuration file
    #[error("Error reading configuration: {0}")]
    #[diagnostic(
        code("CONFIG-002"),
        help("Check file permissions and ensure the file is not corrupted")
    )]
    ReadError(String),

    /// Error parsing the configuration
    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code("CONFIG-003"),
        help("Check the TOML syntax and the names of the [crate] and [resolve] keys")
    )]
    ParseError(String),

    /// A value parsed but is not acceptable
    #[error("Invalid value for `{key}`: {message}")]
    #[diagnostic(code("CONFIG-004"))]
    InvalidValue { key: String, message: String },
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::ReadError(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
