//! Claim record types.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a claim cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    /// Authentication and claim both succeeded.
    Success,
    /// Any stage of the cycle failed.
    Failed,
}

impl ClaimStatus {
    /// Whether this is [`ClaimStatus::Success`].
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Lowercase label as written to the history file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One persisted history entry.
///
/// Holds only public data: the address of the ephemeral identity, the code
/// that was submitted, and the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
    /// RFC 3339 creation time (UTC, millisecond precision).
    pub timestamp: String,
    /// Public address of the identity used.
    pub address: String,
    /// The access/invite code attempted.
    pub access_code: String,
    /// Outcome of the cycle.
    pub status: ClaimStatus,
    /// Boolean mirror of `status`.
    #[serde(default)]
    pub success: bool,
}

impl ClaimRecord {
    /// Create a record stamped with the current time.
    #[must_use]
    pub fn new(
        address: impl Into<String>,
        access_code: impl Into<String>,
        status: ClaimStatus,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            address: address.into(),
            access_code: access_code.into(),
            status,
            success: status.is_success(),
        }
    }
}
