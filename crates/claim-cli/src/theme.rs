//! CLI theme and styling.

use colored::Colorize;

/// CLI theme configuration.
pub(crate) struct Theme;

impl Theme {
    /// Format a header.
    pub(crate) fn header(text: &str) -> String {
        format!("{}", text.bold().cyan())
    }

    /// Format a success message.
    pub(crate) fn success(text: &str) -> String {
        format!("{} {}", "✓".green(), text)
    }

    /// Format an error message.
    pub(crate) fn error(text: &str) -> String {
        format!("{} {}", "✗".red(), text.red())
    }

    /// Format a warning message.
    pub(crate) fn warning(text: &str) -> String {
        format!("{} {}", "!".yellow(), text.yellow())
    }

    /// Format an info message.
    pub(crate) fn info(text: &str) -> String {
        format!("{} {}", "i".blue(), text)
    }

    /// Format a dimmed message.
    pub(crate) fn dimmed(text: &str) -> String {
        format!("{}", text.dimmed())
    }

    /// Format a separator line.
    pub(crate) fn separator() -> String {
        "━".repeat(50).dimmed().to_string()
    }

    /// Format a key-value pair.
    pub(crate) fn kv(key: &str, value: &str) -> String {
        format!("  {}: {}", key.bold(), value.yellow())
    }

    /// Format an address.
    pub(crate) fn address(address: &str) -> String {
        format!("{}", address.cyan())
    }

    /// Format an RFC 3339 timestamp for tables, falling back to the raw text.
    pub(crate) fn timestamp(raw: &str) -> String {
        let text = chrono::DateTime::parse_from_rfc3339(raw).map_or_else(
            |_| raw.to_string(),
            |dt| {
                dt.with_timezone(&chrono::Utc)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            },
        );
        text.as_str().dimmed().to_string()
    }
}

/// Mask all but the first three characters of a secret-ish value.
pub(crate) fn mask(value: &str) -> String {
    let prefix: String = value.chars().take(3).collect();
    format!("{prefix}***")
}

/// Print the startup banner.
pub(crate) fn print_banner() {
    println!();
    println!("{}", Theme::header("Waitlist Claim Runner"));
    println!("{}", Theme::separator());
}
