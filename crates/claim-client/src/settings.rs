//! Client settings derived from the loaded configuration.

use std::time::Duration;

use claim_config::Config;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ORIGIN, REFERER};

use crate::error::{ClientError, ClientResult};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Everything the two clients need to reach the service.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Full authentication endpoint URL.
    pub auth_url: String,
    /// Full claim endpoint URL.
    pub claim_url: String,
    /// `Origin` header sent on both calls.
    pub origin: Option<String>,
    /// `Referer` header sent on both calls.
    pub referer: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// JSON field carrying the access code in the claim body.
    pub access_code_field: String,
    /// Header carrying the session token on the claim call.
    pub auth_header: String,
    /// Scheme prefixed to the session token.
    pub token_scheme: String,
}

impl ClientSettings {
    /// Settings for the given endpoint URLs with protocol defaults.
    #[must_use]
    pub fn new(auth_url: impl Into<String>, claim_url: impl Into<String>) -> Self {
        Self {
            auth_url: auth_url.into(),
            claim_url: claim_url.into(),
            origin: None,
            referer: None,
            timeout: DEFAULT_TIMEOUT,
            access_code_field: "accessCode".to_string(),
            auth_header: "Authorization".to_string(),
            token_scheme: "jwt".to_string(),
        }
    }

    /// Derive settings from a validated configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            auth_url: config.api.auth_url(),
            claim_url: config.api.claim_url(),
            origin: config.api.origin(),
            referer: config.api.referer(),
            timeout: Duration::from_secs(config.http.timeout_secs),
            access_code_field: config.protocol.access_code_field.clone(),
            auth_header: config.protocol.auth_header.clone(),
            token_scheme: config.protocol.token_scheme.clone(),
        }
    }

    /// Set the `Origin` and `Referer` headers.
    #[must_use]
    pub fn with_app_headers(mut self, origin: impl Into<String>, referer: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self.referer = Some(referer.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the claim body field name.
    #[must_use]
    pub fn with_access_code_field(mut self, field: impl Into<String>) -> Self {
        self.access_code_field = field.into();
        self
    }

    /// Set the authorization header name and token scheme.
    #[must_use]
    pub fn with_authorization(mut self, header: impl Into<String>, scheme: impl Into<String>) -> Self {
        self.auth_header = header.into();
        self.token_scheme = scheme.into();
        self
    }

    /// Parsed authorization header name.
    pub(crate) fn auth_header_name(&self) -> ClientResult<HeaderName> {
        HeaderName::try_from(self.auth_header.as_str())
            .map_err(|e| ClientError::InvalidHeader(format!("{}: {e}", self.auth_header)))
    }

    /// Build the shared HTTP client with timeout and app headers applied.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidHeader`] for unusable header values, or
    /// [`ClientError::Transport`] if the TLS backend cannot be initialized.
    pub fn build_http_client(&self) -> ClientResult<Client> {
        let mut headers = HeaderMap::new();
        if let Some(origin) = &self.origin {
            headers.insert(ORIGIN, header_value(origin)?);
        }
        if let Some(referer) = &self.referer {
            headers.insert(REFERER, header_value(referer)?);
        }

        Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::transport(&e))
    }
}

fn header_value(value: &str) -> ClientResult<HeaderValue> {
    HeaderValue::try_from(value).map_err(|e| ClientError::InvalidHeader(format!("{value}: {e}")))
}
