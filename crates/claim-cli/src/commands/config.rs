//! Config command - show and validate configuration.

use anyhow::{Context, Result};
use claim_config::{Config, ResolvedConfig};

use crate::theme::{Theme, mask};

/// Print the resolved configuration as TOML, access code masked.
pub(crate) fn show_config(resolved: &ResolvedConfig) -> Result<()> {
    let mut config: Config = resolved.config.clone();
    if !config.referral.access_code.is_empty() {
        config.referral.access_code = mask(&config.referral.access_code);
    }

    print_sources(resolved);
    println!("{}", config.to_toml()?);
    Ok(())
}

/// Validate the resolved configuration.
pub(crate) fn validate_config(resolved: &ResolvedConfig) -> Result<()> {
    print_sources(resolved);
    resolved
        .config
        .validate()
        .context("configuration is invalid")?;
    println!("{}", Theme::success("Configuration is valid"));
    Ok(())
}

fn print_sources(resolved: &ResolvedConfig) {
    if resolved.loaded_files.is_empty() {
        println!("{}", Theme::dimmed("# defaults only (no config file found)"));
    } else {
        for file in &resolved.loaded_files {
            println!("{}", Theme::dimmed(&format!("# loaded from {file}")));
        }
    }
    if resolved.env_overrides > 0 {
        println!(
            "{}",
            Theme::dimmed(&format!(
                "# {} environment override(s) applied",
                resolved.env_overrides
            ))
        );
    }
}
