//! History command - show recorded claims.

use anyhow::Result;
use claim_audit::AuditLog;
use colored::Colorize;

use crate::theme::Theme;

/// Print every claim record followed by per-status totals.
pub(crate) fn show_history(log: &AuditLog) -> Result<()> {
    let records = log.records()?;

    if records.is_empty() {
        println!(
            "{}",
            Theme::info(&format!("No claim records in {}", log.path().display()))
        );
        return Ok(());
    }

    println!("\n{}", Theme::header("Claim History"));
    println!(
        "{:<19}  {:<42}  {}",
        "TIMESTAMP".dimmed(),
        "ADDRESS".dimmed(),
        "STATUS".dimmed()
    );
    println!("{}", Theme::separator());

    for record in &records {
        let status = if record.status.is_success() {
            record.status.as_str().green().to_string()
        } else {
            record.status.as_str().red().to_string()
        };
        println!(
            "{:<19}  {:<42}  {status}",
            Theme::timestamp(&record.timestamp),
            record.address
        );
    }

    let stats = log.stats()?;
    println!("{}", Theme::separator());
    println!(
        "{}",
        Theme::kv(
            "Total",
            &format!(
                "{} ({} succeeded, {} failed)",
                stats.total, stats.succeeded, stats.failed
            )
        )
    );
    if stats.unrecognized > 0 {
        println!(
            "{}",
            Theme::warning(&format!(
                "{} entries are not claim records and were skipped",
                stats.unrecognized
            ))
        );
    }
    println!();
    Ok(())
}
