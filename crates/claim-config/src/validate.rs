//! Post-merge configuration validation.
//!
//! Runs before any network activity; a failure here aborts the process.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_api(config)?;
    validate_referral(config)?;
    validate_protocol(config)?;
    validate_http(config)?;
    validate_audit(config)?;
    validate_logging(config)?;
    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_owned(),
        message: message.into(),
    }
}

fn validate_api(config: &Config) -> ConfigResult<()> {
    let api = &config.api;
    let base = api.base_url.trim();

    if base.is_empty() {
        return Err(invalid("api.base_url", "base_url must not be empty"));
    }
    if base.chars().any(char::is_whitespace) {
        return Err(invalid("api.base_url", "base_url must not contain whitespace"));
    }

    let parsed = url::Url::parse(base)
        .map_err(|e| invalid("api.base_url", format!("'{base}' is not a valid URL: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(
            "api.base_url",
            format!("unsupported scheme '{}'; expected http or https", parsed.scheme()),
        ));
    }

    let app = api.app_url.trim();
    if !app.is_empty() && url::Url::parse(app).is_err() {
        return Err(invalid("api.app_url", format!("'{app}' is not a valid URL")));
    }

    for (field, path) in [
        ("api.endpoints.auth", &api.endpoints.auth),
        ("api.endpoints.claim", &api.endpoints.claim),
    ] {
        if !path.starts_with('/') {
            return Err(invalid(
                field,
                format!("endpoint '{path}' must be a path starting with '/'"),
            ));
        }
        if path.chars().any(char::is_whitespace) {
            return Err(invalid(field, "endpoint must not contain whitespace"));
        }
    }

    Ok(())
}

fn validate_referral(config: &Config) -> ConfigResult<()> {
    let r = &config.referral;

    if r.access_code.trim().is_empty() {
        return Err(invalid("referral.access_code", "access_code must not be empty"));
    }

    if r.cycles == 0 {
        return Err(invalid("referral.cycles", "cycles must be at least 1"));
    }

    if r.delay_ms.min > r.delay_ms.max {
        return Err(invalid(
            "referral.delay_ms",
            format!(
                "min ({}) must not exceed max ({})",
                r.delay_ms.min, r.delay_ms.max
            ),
        ));
    }

    Ok(())
}

fn validate_protocol(config: &Config) -> ConfigResult<()> {
    let p = &config.protocol;

    if p.challenge_message.is_empty() {
        return Err(invalid(
            "protocol.challenge_message",
            "challenge_message must not be empty",
        ));
    }
    if p.access_code_field.trim().is_empty() {
        return Err(invalid(
            "protocol.access_code_field",
            "access_code_field must not be empty",
        ));
    }
    if p.auth_header.trim().is_empty() || p.auth_header.chars().any(char::is_whitespace) {
        return Err(invalid(
            "protocol.auth_header",
            "auth_header must be a non-empty header name",
        ));
    }
    if p.token_scheme.chars().any(char::is_whitespace) {
        return Err(invalid(
            "protocol.token_scheme",
            "token_scheme must not contain whitespace",
        ));
    }

    Ok(())
}

fn validate_http(config: &Config) -> ConfigResult<()> {
    if config.http.timeout_secs == 0 {
        return Err(invalid("http.timeout_secs", "timeout_secs must be at least 1"));
    }
    Ok(())
}

fn validate_audit(config: &Config) -> ConfigResult<()> {
    if config.audit.path.trim().is_empty() {
        return Err(invalid("audit.path", "path must not be empty"));
    }
    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let l = &config.logging;

    if !matches!(
        l.level.as_str(),
        "error" | "warn" | "info" | "debug" | "trace"
    ) {
        return Err(invalid(
            "logging.level",
            format!(
                "unsupported level '{}'; expected one of: error, warn, info, debug, trace",
                l.level
            ),
        ));
    }

    if !matches!(l.format.as_str(), "pretty" | "compact" | "json") {
        return Err(invalid(
            "logging.format",
            format!(
                "unsupported format '{}'; expected one of: pretty, compact, json",
                l.format
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.api.base_url = "https://api.example.com".to_owned();
        config.api.endpoints.auth = "/auth/connect".to_owned();
        config.api.endpoints.claim = "/waitlist/join".to_owned();
        config.referral.access_code = "CODE42".to_owned();
        config
    }

    fn field_of(result: ConfigResult<()>) -> String {
        match result {
            Err(ConfigError::ValidationError { field, .. }) => field,
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let mut config = valid_config();
        config.api.base_url = "   ".to_owned();
        assert_eq!(field_of(validate(&config)), "api.base_url");
    }

    #[test]
    fn test_base_url_with_space_rejected() {
        let mut config = valid_config();
        config.api.base_url = "https://api.example .com".to_owned();
        assert_eq!(field_of(validate(&config)), "api.base_url");
    }

    #[test]
    fn test_base_url_surrounding_whitespace_trimmed() {
        let mut config = valid_config();
        config.api.base_url = " https://api.example.com ".to_owned();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let mut config = valid_config();
        config.api.base_url = "ftp://api.example.com".to_owned();
        assert_eq!(field_of(validate(&config)), "api.base_url");
    }

    #[test]
    fn test_endpoint_must_be_path() {
        let mut config = valid_config();
        config.api.endpoints.claim = "waitlist/join".to_owned();
        assert_eq!(field_of(validate(&config)), "api.endpoints.claim");
    }

    #[test]
    fn test_missing_access_code_rejected() {
        let mut config = valid_config();
        config.referral.access_code = String::new();
        assert_eq!(field_of(validate(&config)), "referral.access_code");
    }

    #[test]
    fn test_zero_cycles_rejected() {
        let mut config = valid_config();
        config.referral.cycles = 0;
        assert_eq!(field_of(validate(&config)), "referral.cycles");
    }

    #[test]
    fn test_inverted_delay_rejected() {
        let mut config = valid_config();
        config.referral.delay_ms.min = 500;
        config.referral.delay_ms.max = 100;
        assert_eq!(field_of(validate(&config)), "referral.delay_ms");
    }

    #[test]
    fn test_zero_delay_allowed() {
        let mut config = valid_config();
        config.referral.delay_ms.min = 0;
        config.referral.delay_ms.max = 0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = valid_config();
        config.http.timeout_secs = 0;
        assert_eq!(field_of(validate(&config)), "http.timeout_secs");
    }

    #[test]
    fn test_bad_log_format_rejected() {
        let mut config = valid_config();
        config.logging.format = "xml".to_owned();
        assert_eq!(field_of(validate(&config)), "logging.format");
    }
}
