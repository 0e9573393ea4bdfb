//! Console rendering of workflow checkpoints.

use std::time::Duration;

use claim_audit::ClaimRecord;
use claim_client::UNAUTHORIZED_HINTS;
use claim_crypto::Address;
use claim_runtime::{CycleError, CycleObserver, RunSummary, Stage};
use colored::Colorize;

use crate::theme::Theme;

/// Prints colored progress lines to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ConsoleObserver;

impl ConsoleObserver {
    fn stage_line(stage: Stage) -> Option<&'static str> {
        match stage {
            Stage::Generate => Some("Fresh wallet generated"),
            Stage::Sign => Some("Challenge signed"),
            Stage::Authenticate => Some("Authenticated"),
            Stage::Claim => Some("Access code claimed"),
            Stage::Record => None,
        }
    }
}

impl CycleObserver for ConsoleObserver {
    fn on_run_start(&self, total: u32) {
        println!(
            "{}",
            Theme::info(&format!("Running {total} cycle{}", plural(total)))
        );
    }

    fn on_cycle_start(&self, index: u32, total: u32, address: &Address) {
        println!();
        println!("{}", Theme::header(&format!("Cycle {index}/{total}")));
        println!("{}", Theme::separator());
        println!("  Wallet: {}", Theme::address(&address.to_checksum()));
    }

    fn on_stage_ok(&self, _index: u32, stage: Stage) {
        if let Some(line) = Self::stage_line(stage) {
            println!("  {}", Theme::success(line));
        }
    }

    fn on_stage_failed(&self, _index: u32, error: &CycleError) {
        println!(
            "  {}",
            Theme::error(&format!("{} failed: {error}", error.stage()))
        );

        if error.is_unauthorized() {
            println!("  {}", Theme::warning("401 Unauthorized. Possible causes:"));
            for hint in UNAUTHORIZED_HINTS {
                println!("    {}", Theme::dimmed(&format!("- {hint}")));
            }
        }
    }

    fn on_record_written(&self, _index: u32, record: &ClaimRecord) {
        let status = if record.status.is_success() {
            record.status.as_str().green()
        } else {
            record.status.as_str().red()
        };
        println!("  {} {status}", Theme::dimmed("Recorded:"));
    }

    fn on_pause(&self, _index: u32, delay: Duration) {
        println!();
        println!(
            "{}",
            Theme::dimmed(&format!(
                "Waiting {:.1}s before the next cycle...",
                delay.as_secs_f64()
            ))
        );
    }

    fn on_run_end(&self, summary: &RunSummary) {
        println!();
        println!("{}", Theme::header("Summary"));
        println!("{}", Theme::separator());
        println!("{}", Theme::kv("Cycles", &summary.total.to_string()));
        println!(
            "  {}: {}",
            "Succeeded".bold(),
            summary.succeeded.to_string().green()
        );
        println!("  {}: {}", "Failed".bold(), summary.failed.to_string().red());
        println!();
    }

    fn on_interrupt(&self, completed: u32, total: u32) {
        println!();
        println!(
            "{}",
            Theme::warning(&format!(
                "Stopped by user after {completed} of {total} cycle{}.",
                plural(total)
            ))
        );
        println!(
            "{}",
            Theme::dimmed("No private keys were stored; the history file is intact.")
        );
    }
}

fn plural(n: u32) -> &'static str {
    if n == 1 { "" } else { "s" }
}
