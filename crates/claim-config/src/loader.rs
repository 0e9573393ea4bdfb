//! Config file discovery and layered loading.
//!
//! Implements the `Config::load()` algorithm:
//! 1. Parse `defaults.toml` → base
//! 2. Merge the explicit `--config` file, or `./claim.toml` if present
//! 3. Apply `CLAIM_*` environment overrides
//! 4. Deserialize merged tree → `Config`
//! 5. Validate

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::env::{apply_env_overrides, collect_env_vars};
use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "claim.toml";

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// A loaded configuration plus where it came from.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The merged configuration. Validated unless returned by
    /// [`load_unvalidated`].
    pub config: Config,
    /// Files merged over the defaults, in order.
    pub loaded_files: Vec<String>,
    /// Number of environment overrides applied.
    pub env_overrides: usize,
}

/// Load configuration using the process environment.
///
/// `explicit` must exist when given. Otherwise `{search_dir}/claim.toml` is
/// merged if it exists.
///
/// # Errors
///
/// Returns a [`ConfigError`] if any file is unreadable or malformed, or if
/// the merged configuration fails validation.
pub fn load(explicit: Option<&Path>, search_dir: Option<&Path>) -> ConfigResult<ResolvedConfig> {
    load_with_env(explicit, search_dir, &collect_env_vars())
}

/// Same as [`load`] with an explicit environment snapshot.
///
/// # Errors
///
/// See [`load`].
pub fn load_with_env(
    explicit: Option<&Path>,
    search_dir: Option<&Path>,
    env: &HashMap<String, String>,
) -> ConfigResult<ResolvedConfig> {
    let config = load_unvalidated(explicit, search_dir, env)?;
    validate::validate(&config.config)?;
    Ok(config)
}

/// Merge and deserialize without validating. Used by `config show`.
///
/// # Errors
///
/// Returns a [`ConfigError`] if any file is unreadable or malformed.
pub fn load_unvalidated(
    explicit: Option<&Path>,
    search_dir: Option<&Path>,
    env: &HashMap<String, String>,
) -> ConfigResult<ResolvedConfig> {
    // 1. Parse embedded defaults.
    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
            path: "<embedded defaults>".to_owned(),
            source: e,
        })?;

    let mut loaded_files = Vec::new();

    // 2. Config file.
    let overlay = if let Some(path) = explicit {
        let value = try_load_file(path)?.ok_or_else(|| ConfigError::ReadError {
            path: path.display().to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })?;
        Some((value, path.to_path_buf()))
    } else if let Some(dir) = search_dir {
        let path: PathBuf = dir.join(DEFAULT_CONFIG_FILE);
        try_load_file(&path)?.map(|value| (value, path))
    } else {
        None
    };

    if let Some((overlay, path)) = overlay {
        deep_merge(&mut merged, &overlay);
        info!(path = %path.display(), "loaded config file");
        loaded_files.push(path.display().to_string());
    }

    // 3. Environment overrides.
    let env_overrides = apply_env_overrides(&mut merged, env)?;
    if env_overrides > 0 {
        debug!(count = env_overrides, "applied environment overrides");
    }

    // 4. Deserialize.
    let config: Config =
        merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError {
                path: "<merged config>".to_owned(),
                source: e,
            })?;

    Ok(ResolvedConfig {
        config,
        loaded_files,
        env_overrides,
    })
}

/// Recursively deep-merge `overlay` into `base`.
///
/// - Tables merge recursively per-field.
/// - Scalars and arrays from the overlay **replace** the base value.
fn deep_merge(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                if let Some(base_val) = base_table.get_mut(key) {
                    deep_merge(base_val, overlay_val);
                } else {
                    base_table.insert(key.clone(), overlay_val.clone());
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
        },
    }
}

/// Try to load a file, returning `None` if the file doesn't exist.
fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        },
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        },
    };

    if content.len() as u64 > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {MAX_CONFIG_FILE_SIZE} byte limit",
                content.len()
            ),
        });
    }

    let value: toml::Value = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(Some(value))
}
