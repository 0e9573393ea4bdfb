//! Workflow error types.

use claim_audit::AuditError;
use claim_client::ClientError;
use claim_crypto::CryptoError;
use thiserror::Error;

use crate::stage::Stage;

/// Why a single cycle failed. Never aborts the run.
#[derive(Debug, Error)]
pub enum CycleError {
    /// The identity could not sign the challenge.
    #[error("Signing failed: {0}")]
    Signing(#[source] CryptoError),

    /// The service did not issue a session token.
    #[error("{0}")]
    Authentication(#[source] ClientError),

    /// The service did not accept the access code.
    #[error("{0}")]
    Claim(#[source] ClientError),
}

impl CycleError {
    /// The stage at which the cycle stopped.
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::Signing(_) => Stage::Sign,
            Self::Authentication(_) => Stage::Authenticate,
            Self::Claim(_) => Stage::Claim,
        }
    }

    /// Whether the claim was refused with HTTP 401.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Claim(e) if e.is_unauthorized())
    }
}

/// Faults that stop the whole run.
#[derive(Debug, Error)]
pub enum RunError {
    /// A claim record could not be written, so the history would be incomplete.
    #[error("Failed to record cycle {cycle}: {source}")]
    Audit {
        /// 1-based cycle index.
        cycle: u32,
        /// Underlying storage error.
        #[source]
        source: AuditError,
    },
}

/// Result type for workflow runs.
pub type RunResult<T> = Result<T, RunError>;
