//! Remote client error types.

use thiserror::Error;

/// Errors returned by the authentication and claim clients.
///
/// None of the variants carry the signature or the session token.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service refused the signed challenge.
    #[error("Authentication failed (HTTP {http_status}): {message}")]
    AuthenticationFailed {
        /// HTTP status of the response.
        http_status: u16,
        /// Remote message, or the raw body when none was given.
        message: String,
    },

    /// The service reported success but returned no session token.
    #[error("Authentication failed: missing token in successful response")]
    MissingToken,

    /// The service rejected the access code or the session token.
    #[error("Claim rejected (HTTP {http_status}): {message}")]
    ClaimRejected {
        /// HTTP status of the response.
        http_status: u16,
        /// Remote message, or the raw body when none was given.
        message: String,
    },

    /// The response body could not be interpreted.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Connection, timeout or other transport failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A configured header name or value is not valid HTTP.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl ClientError {
    /// Whether the service answered 401, meaning the token was not accepted.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed {
                http_status: 401,
                ..
            } | Self::ClaimRejected {
                http_status: 401,
                ..
            }
        )
    }

    /// Whether this is a transport-level failure.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub(crate) fn transport(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Transport("request timed out".to_string())
        } else if e.is_connect() {
            Self::Transport(format!("connection failed: {e}"))
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
