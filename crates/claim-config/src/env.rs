//! Environment variable overrides.
//!
//! Only `CLAIM_*` variables are consulted. Each one maps to a single leaf in
//! the merged TOML tree and is applied after all files, so the environment
//! always wins.

use std::collections::HashMap;

use crate::error::{ConfigError, ConfigResult};

/// Prefix of all recognised variables.
const ENV_PREFIX: &str = "CLAIM_";

#[derive(Clone, Copy)]
enum Kind {
    Str,
    Int,
}

/// Variable name → (dotted path, value kind).
const ENV_MAP: &[(&str, &[&str], Kind)] = &[
    ("CLAIM_BASE_URL", &["api", "base_url"], Kind::Str),
    ("CLAIM_APP_URL", &["api", "app_url"], Kind::Str),
    ("CLAIM_ACCESS_CODE", &["referral", "access_code"], Kind::Str),
    ("CLAIM_CYCLES", &["referral", "cycles"], Kind::Int),
    ("CLAIM_DELAY_MIN_MS", &["referral", "delay_ms", "min"], Kind::Int),
    ("CLAIM_DELAY_MAX_MS", &["referral", "delay_ms", "max"], Kind::Int),
    ("CLAIM_AUDIT_PATH", &["audit", "path"], Kind::Str),
    ("CLAIM_LOG_LEVEL", &["logging", "level"], Kind::Str),
];

/// Snapshot the `CLAIM_*` variables of the current process.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(key, _)| key.starts_with(ENV_PREFIX))
        .collect()
}

/// Apply overrides from `env` onto `tree`. Returns how many were applied.
///
/// # Errors
///
/// Returns [`ConfigError::EnvError`] if a numeric variable does not parse.
pub fn apply_env_overrides(
    tree: &mut toml::Value,
    env: &HashMap<String, String>,
) -> ConfigResult<usize> {
    let mut applied: usize = 0;

    for (var, path, kind) in ENV_MAP {
        let Some(raw) = env.get(*var) else {
            continue;
        };

        let value = match kind {
            Kind::Str => toml::Value::String(raw.clone()),
            Kind::Int => {
                let parsed = raw
                    .trim()
                    .parse::<u32>()
                    .map_err(|e| ConfigError::EnvError {
                        var: (*var).to_owned(),
                        message: e.to_string(),
                    })?;
                toml::Value::Integer(i64::from(parsed))
            },
        };

        set_path(tree, path, value);
        applied = applied.saturating_add(1);
    }

    Ok(applied)
}

/// Set a leaf, creating intermediate tables as needed.
fn set_path(tree: &mut toml::Value, path: &[&str], value: toml::Value) {
    let Some((leaf, parents)) = path.split_last() else {
        return;
    };

    let mut node = tree;
    for key in parents {
        let Some(table) = node.as_table_mut() else {
            return;
        };
        node = table
            .entry((*key).to_owned())
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    if let Some(table) = node.as_table_mut() {
        table.insert((*leaf).to_owned(), value);
    }
}
