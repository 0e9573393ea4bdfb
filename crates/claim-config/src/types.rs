//! Configuration types for the claim workflow.
//!
//! Every struct implements [`Default`] with the same values as the embedded
//! `defaults.toml`, so a bare `[section]` header in TOML produces a working
//! section.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration.
///
/// Loaded once at startup and passed by reference to the workflow and the
/// remote clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote service location and endpoint paths.
    pub api: ApiSection,
    /// What to claim and how often.
    pub referral: ReferralSection,
    /// Wire-level protocol details that vary between service versions.
    pub protocol: ProtocolSection,
    /// HTTP transport settings.
    pub http: HttpSection,
    /// Claim history file location.
    pub audit: AuditSection,
    /// Logging level and format.
    pub logging: LoggingSection,
}

// ---------------------------------------------------------------------------
// ApiSection
// ---------------------------------------------------------------------------

/// Remote service base URL and endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    /// Base URL, e.g. `https://api.example.com`.
    pub base_url: String,
    /// Web app origin sent as `Origin`/`Referer`. Empty disables both headers.
    pub app_url: String,
    /// Path appended to `app_url` for the `Referer` header.
    pub referer_path: String,
    /// Relative endpoint paths.
    pub endpoints: EndpointsSection,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            app_url: String::new(),
            referer_path: "/waitlist".to_owned(),
            endpoints: EndpointsSection::default(),
        }
    }
}

impl ApiSection {
    /// Full URL of the authentication endpoint.
    #[must_use]
    pub fn auth_url(&self) -> String {
        self.join(&self.endpoints.auth)
    }

    /// Full URL of the claim endpoint.
    #[must_use]
    pub fn claim_url(&self) -> String {
        self.join(&self.endpoints.claim)
    }

    /// `Origin` header value, if an app URL is configured.
    #[must_use]
    pub fn origin(&self) -> Option<String> {
        let app = self.app_url.trim().trim_end_matches('/');
        (!app.is_empty()).then(|| app.to_owned())
    }

    /// `Referer` header value, if an app URL is configured.
    #[must_use]
    pub fn referer(&self) -> Option<String> {
        self.origin()
            .map(|origin| format!("{origin}{}", self.referer_path))
    }

    fn join(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url.trim().trim_end_matches('/'))
    }
}

/// Relative endpoint paths (each starts with `/`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsSection {
    /// Wallet authentication endpoint.
    pub auth: String,
    /// Waitlist join / referral claim endpoint.
    pub claim: String,
}

// ---------------------------------------------------------------------------
// ReferralSection
// ---------------------------------------------------------------------------

/// Access code, cycle count and pacing.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferralSection {
    /// The access/invite code submitted every cycle.
    pub access_code: String,
    /// Number of cycles to run.
    pub cycles: u32,
    /// Bounds for the randomized pause between cycles.
    pub delay_ms: DelaySection,
}

impl Default for ReferralSection {
    fn default() -> Self {
        Self {
            access_code: String::new(),
            cycles: 1,
            delay_ms: DelaySection::default(),
        }
    }
}

impl std::fmt::Debug for ReferralSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferralSection")
            .field("access_code", &mask(&self.access_code))
            .field("cycles", &self.cycles)
            .field("delay_ms", &self.delay_ms)
            .finish()
    }
}

/// Inclusive `[min, max]` delay bounds in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelaySection {
    /// Lower bound (inclusive).
    pub min: u64,
    /// Upper bound (inclusive).
    pub max: u64,
}

impl Default for DelaySection {
    fn default() -> Self {
        Self {
            min: 5_000,
            max: 10_000,
        }
    }
}

// ---------------------------------------------------------------------------
// ProtocolSection
// ---------------------------------------------------------------------------

/// Default challenge message signed by every identity.
pub const DEFAULT_CHALLENGE_MESSAGE: &str = "Welcome to FairShares\n\nSign this message to join the FairShares waitlist.\nThis signature does not trigger any blockchain transaction.";

/// Protocol details: challenge text and claim request framing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolSection {
    /// Fixed message signed to prove key control. Must match the service byte for byte.
    pub challenge_message: String,
    /// JSON field name carrying the code in the claim body.
    pub access_code_field: String,
    /// Header carrying the session token on the claim request.
    pub auth_header: String,
    /// Scheme prefix placed before the token in `auth_header`.
    pub token_scheme: String,
}

impl Default for ProtocolSection {
    fn default() -> Self {
        Self {
            challenge_message: DEFAULT_CHALLENGE_MESSAGE.to_owned(),
            access_code_field: "accessCode".to_owned(),
            auth_header: "Authorization".to_owned(),
            token_scheme: "jwt".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// HttpSection / AuditSection / LoggingSection
// ---------------------------------------------------------------------------

/// HTTP transport settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSection {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self { timeout_secs: 15 }
    }
}

/// Claim history location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditSection {
    /// Path of the JSON history file.
    pub path: String,
}

impl Default for AuditSection {
    fn default() -> Self {
        Self {
            path: "referral-history.json".to_owned(),
        }
    }
}

/// Logging level, format, and per-crate directives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Base level filter (`error`, `warn`, `info`, `debug`, `trace`).
    pub level: String,
    /// Output format: `pretty`, `compact` or `json`.
    pub format: String,
    /// Extra filter directives, e.g. `claim_client=debug`.
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
        }
    }
}

/// Show only the first few characters of a value.
fn mask(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let visible: String = value.chars().take(3).collect();
    format!("{visible}***")
}
