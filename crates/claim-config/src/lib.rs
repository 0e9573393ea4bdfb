#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
//! Configuration for the claim workflow.
//!
//! A single [`Config`] is loaded once at startup and passed by reference to
//! every component that needs it. There is no global configuration state.
//!
//! # Usage
//!
//! ```rust,no_run
//! use claim_config::Config;
//!
//! // Defaults → ./claim.toml (if present) → CLAIM_* env vars → validate.
//! let resolved = Config::load(None, Some(std::path::Path::new("."))).unwrap();
//! println!("claiming against {}", resolved.config.api.base_url);
//! ```
//!
//! # Configuration Precedence
//!
//! From highest to lowest priority:
//!
//! 1. **Environment variables** (`CLAIM_*`)
//! 2. **Config file** (`--config <path>`, else `./claim.toml`)
//! 3. **Embedded defaults** (`defaults.toml` compiled into binary)

/// Environment variable overrides.
pub mod env;
/// Configuration error types.
pub mod error;
/// Configuration file discovery and loading.
pub mod loader;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

// Re-export primary types at the crate root.
pub use error::{ConfigError, ConfigResult};
pub use loader::{DEFAULT_CONFIG_FILE, ResolvedConfig};
pub use types::*;

impl Config {
    /// Load configuration with full precedence chain.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a file is malformed or validation fails.
    pub fn load(
        explicit: Option<&std::path::Path>,
        search_dir: Option<&std::path::Path>,
    ) -> ConfigResult<ResolvedConfig> {
        loader::load(explicit, search_dir)
    }

    /// Validate this configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::ValidationError`] found.
    pub fn validate(&self) -> ConfigResult<()> {
        validate::validate(self)
    }

    /// Render as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SerializeError`] if serialization fails.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
