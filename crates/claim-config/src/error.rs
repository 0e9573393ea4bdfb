//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// The file path.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A config file (or the merged tree) is not valid TOML for [`Config`](crate::Config).
    #[error("failed to parse config {path}: {source}")]
    ParseError {
        /// The file path, or a marker such as `<merged config>`.
        path: String,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// An environment override could not be parsed.
    #[error("invalid value for environment variable {var}: {message}")]
    EnvError {
        /// The variable name.
        var: String,
        /// What was wrong.
        message: String,
    },

    /// A value is outside its allowed range or format.
    #[error("invalid configuration for {field}: {message}")]
    ValidationError {
        /// Dotted field path, e.g. `api.base_url`.
        field: String,
        /// What was wrong.
        message: String,
    },

    /// The config could not be rendered back to TOML.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
