//! Run command - execute the claim workflow.

use std::sync::Arc;

use anyhow::{Context, Result};
use claim_audit::AuditLog;
use claim_client::{AuthClient, ClaimClient, ClientSettings};
use claim_config::Config;
use claim_runtime::{Workflow, WorkflowSettings};
use tracing::{info, warn};

use crate::observer::ConsoleObserver;
use crate::theme::{Theme, mask, print_banner};

/// Command-line overrides applied on top of the loaded configuration.
#[derive(Debug, Default, Clone)]
pub(crate) struct RunOverrides {
    pub(crate) cycles: Option<u32>,
    pub(crate) access_code: Option<String>,
}

impl RunOverrides {
    pub(crate) fn apply(&self, config: &mut Config) {
        if let Some(cycles) = self.cycles {
            config.referral.cycles = cycles;
        }
        if let Some(code) = &self.access_code {
            config.referral.access_code.clone_from(code);
        }
    }
}

/// Validate the configuration and run every cycle.
///
/// Returns once all cycles finish or the user interrupts the run.
pub(crate) async fn run_claims(mut config: Config, overrides: &RunOverrides) -> Result<()> {
    overrides.apply(&mut config);
    config.validate().context("invalid configuration")?;

    print_banner();
    print_config(&config);

    let client_settings = ClientSettings::from_config(&config);
    let http = client_settings
        .build_http_client()
        .context("failed to build HTTP client")?;
    let workflow = Workflow::new(
        AuthClient::with_http(http.clone(), &client_settings),
        ClaimClient::with_http(http, &client_settings)?,
        AuditLog::new(&config.audit.path),
        WorkflowSettings::from_config(&config),
    )
    .with_observer(Arc::new(ConsoleObserver));

    info!(
        cycles = config.referral.cycles,
        history = %config.audit.path,
        "Claim run starting"
    );

    let notice = workflow.shutdown_notice();
    tokio::select! {
        result = workflow.run() => {
            result?;
        },
        () = interrupted() => {
            notice.notify();
        },
    }

    Ok(())
}

fn print_config(config: &Config) {
    let delay = &config.referral.delay_ms;
    println!("{}", Theme::kv("API", config.api.base_url.trim()));
    if let Some(origin) = config.api.origin() {
        println!("{}", Theme::kv("App", &origin));
    }
    println!(
        "{}",
        Theme::kv("Access code", &mask(&config.referral.access_code))
    );
    println!(
        "{}",
        Theme::kv("Cycles", &config.referral.cycles.to_string())
    );
    println!(
        "{}",
        Theme::kv("Delay", &format!("{}-{} ms", delay.min, delay.max))
    );
    println!("{}", Theme::kv("History", &config.audit.path));
    println!("{}", Theme::separator());
}

/// Resolves on Ctrl+C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let mut config = Config::default();
        let overrides = RunOverrides {
            cycles: Some(9),
            access_code: Some("FLAG".to_string()),
        };
        overrides.apply(&mut config);
        assert_eq!(config.referral.cycles, 9);
        assert_eq!(config.referral.access_code, "FLAG");
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let mut config = Config::default();
        config.referral.access_code = "FROMFILE".to_string();
        RunOverrides::default().apply(&mut config);
        assert_eq!(config.referral.access_code, "FROMFILE");
        assert_eq!(config.referral.cycles, 1);
    }

    #[tokio::test]
    async fn test_invalid_config_fails_before_network() {
        let err = run_claims(Config::default(), &RunOverrides::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("invalid configuration"));
    }
}
