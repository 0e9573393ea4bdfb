//! Cycle stages.

use std::fmt;

/// One step of a claim cycle, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Create a fresh identity.
    Generate,
    /// Sign the challenge message.
    Sign,
    /// Exchange the signature for a session token.
    Authenticate,
    /// Submit the access code.
    Claim,
    /// Append the claim record.
    Record,
}

impl Stage {
    /// Lowercase name used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::Sign => "sign",
            Self::Authenticate => "authenticate",
            Self::Claim => "claim",
            Self::Record => "record",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
