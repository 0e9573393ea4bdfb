//! Bridge from the `[logging]` config section to telemetry settings.

use claim_config::Config;
use claim_telemetry::{LogConfig, LogFormat};

/// Build the log configuration, raising the level to `debug` when verbose.
pub(crate) fn to_log_config(config: &Config, verbose: bool) -> LogConfig {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let format = config.logging.format.parse().unwrap_or(LogFormat::Compact);

    config
        .logging
        .directives
        .iter()
        .fold(LogConfig::new(level).with_format(format), |lc, d| {
            lc.with_directive(d.as_str())
        })
}

/// Fallback used when the configuration itself cannot be loaded.
pub(crate) fn fallback_log_config(verbose: bool) -> LogConfig {
    let level = if verbose { "debug" } else { "warn" };
    LogConfig::new(level).with_format(LogFormat::Compact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_overrides_level() {
        let mut config = Config::default();
        config.logging.level = "warn".to_string();
        config.logging.format = "json".to_string();
        config.logging.directives = vec!["reqwest=error".to_string()];

        let lc = to_log_config(&config, true);
        assert_eq!(lc.level, "debug");
        assert_eq!(lc.format, LogFormat::Json);
        assert_eq!(lc.directives, vec!["reqwest=error"]);

        assert_eq!(to_log_config(&config, false).level, "warn");
    }

    #[test]
    fn test_unknown_format_falls_back() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert_eq!(to_log_config(&config, false).format, LogFormat::Compact);
    }
}
