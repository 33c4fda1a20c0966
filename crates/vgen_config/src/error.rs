//! Error types for configuration loading and validation.

/// Errors that can occur when loading or validating a `vgen.toml` configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),

    /// An output mode name is not one of `stdout`, `file-overwrite`, `file-append`.
    #[error("unknown output mode '{0}' (expected stdout, file-overwrite or file-append)")]
    UnknownOutputMode(String),
}
