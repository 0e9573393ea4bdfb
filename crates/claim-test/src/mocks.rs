//! Mock implementations for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use claim_client::{
    Authenticator, ClaimAck, Claimer, ClientError, ClientResult, SessionToken,
};
use claim_crypto::{Address, EthSignature, Identity, IdentitySource};
use serde_json::Value;

/// Token issued by [`MockAuthenticator`] when nothing is queued.
pub const MOCK_TOKEN: &str = "mock-session-token";

/// A scripted authentication outcome.
#[derive(Debug, Clone)]
pub enum MockAuthReply {
    /// Issue this token.
    Token(String),
    /// Refuse with an HTTP status and remote message.
    Reject(u16, String),
    /// Succeed without a token.
    MissingToken,
    /// Fail at the transport level.
    Transport(String),
}

/// One recorded `authenticate` call.
#[derive(Debug, Clone)]
pub struct AuthCall {
    /// Address presented.
    pub address: Address,
    /// Challenge message presented.
    pub message: String,
    /// Signature presented.
    pub signature: EthSignature,
}

/// Mock implementation of the [`Authenticator`] trait.
///
/// Replies are consumed in order; an empty queue issues [`MOCK_TOKEN`].
/// Clones share state, so a clone kept by the test sees every call.
#[derive(Debug, Clone, Default)]
pub struct MockAuthenticator {
    replies: Arc<Mutex<VecDeque<MockAuthReply>>>,
    calls: Arc<Mutex<Vec<AuthCall>>>,
}

impl MockAuthenticator {
    /// Create a new mock authenticator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply.
    #[must_use]
    pub fn with_reply(self, reply: MockAuthReply) -> Self {
        if let Ok(mut guard) = self.replies.lock() {
            guard.push_back(reply);
        }
        self
    }

    /// Queue a successful token.
    #[must_use]
    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.with_reply(MockAuthReply::Token(token.into()))
    }

    /// Queue a rejection with application code semantics (HTTP 200).
    #[must_use]
    pub fn with_rejection(self, message: impl Into<String>) -> Self {
        self.with_reply(MockAuthReply::Reject(200, message.into()))
    }

    /// Recorded calls, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<AuthCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of calls made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn authenticate(
        &self,
        address: &Address,
        message: &str,
        signature: &EthSignature,
    ) -> ClientResult<SessionToken> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(AuthCall {
                address: *address,
                message: message.to_string(),
                signature: *signature,
            });
        }

        let reply = self.replies.lock().ok().and_then(|mut q| q.pop_front());
        match reply {
            None => Ok(SessionToken::new(MOCK_TOKEN)),
            Some(MockAuthReply::Token(token)) => Ok(SessionToken::new(token)),
            Some(MockAuthReply::Reject(http_status, message)) => {
                Err(ClientError::AuthenticationFailed {
                    http_status,
                    message,
                })
            },
            Some(MockAuthReply::MissingToken) => Err(ClientError::MissingToken),
            Some(MockAuthReply::Transport(message)) => Err(ClientError::Transport(message)),
        }
    }
}

/// A scripted claim outcome.
#[derive(Debug, Clone)]
pub enum MockClaimReply {
    /// Accept with this `data` payload.
    Accept(Value),
    /// Refuse with an HTTP status and remote message.
    Reject(u16, String),
    /// Fail at the transport level.
    Transport(String),
}

/// One recorded `claim` call.
#[derive(Debug, Clone)]
pub struct ClaimCall {
    /// Access code submitted.
    pub access_code: String,
    /// Raw token presented.
    pub token: String,
}

/// Mock implementation of the [`Claimer`] trait.
///
/// Replies are consumed in order; an empty queue accepts with `null` data.
#[derive(Debug, Clone, Default)]
pub struct MockClaimer {
    replies: Arc<Mutex<VecDeque<MockClaimReply>>>,
    calls: Arc<Mutex<Vec<ClaimCall>>>,
}

impl MockClaimer {
    /// Create a new mock claimer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply.
    #[must_use]
    pub fn with_reply(self, reply: MockClaimReply) -> Self {
        if let Ok(mut guard) = self.replies.lock() {
            guard.push_back(reply);
        }
        self
    }

    /// Queue an HTTP 401 rejection.
    #[must_use]
    pub fn with_unauthorized(self) -> Self {
        self.with_reply(MockClaimReply::Reject(401, "Unauthorized".to_string()))
    }

    /// Recorded calls, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<ClaimCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of calls made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

#[async_trait]
impl Claimer for MockClaimer {
    async fn claim(&self, access_code: &str, token: &SessionToken) -> ClientResult<ClaimAck> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(ClaimCall {
                access_code: access_code.to_string(),
                token: token.expose().to_string(),
            });
        }

        let reply = self.replies.lock().ok().and_then(|mut q| q.pop_front());
        match reply {
            None => Ok(ClaimAck::default()),
            Some(MockClaimReply::Accept(data)) => Ok(ClaimAck {
                data,
                message: None,
            }),
            Some(MockClaimReply::Reject(http_status, message)) => Err(ClientError::ClaimRejected {
                http_status,
                message,
            }),
            Some(MockClaimReply::Transport(message)) => Err(ClientError::Transport(message)),
        }
    }
}

/// Identity source that remembers every secret it hands out.
///
/// Lets tests assert that no secret leaks into persisted output.
#[derive(Debug, Clone, Default)]
pub struct CapturingIdentitySource {
    issued: Arc<Mutex<Vec<(Address, String)>>>,
}

impl CapturingIdentitySource {
    /// Create a new capturing source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Addresses issued so far.
    #[must_use]
    pub fn addresses(&self) -> Vec<Address> {
        self.issued
            .lock()
            .map(|v| v.iter().map(|(a, _)| *a).collect())
            .unwrap_or_default()
    }

    /// Hex secrets issued so far.
    #[must_use]
    pub fn secrets(&self) -> Vec<String> {
        self.issued
            .lock()
            .map(|v| v.iter().map(|(_, s)| s.clone()).collect())
            .unwrap_or_default()
    }
}

impl IdentitySource for CapturingIdentitySource {
    fn generate(&self) -> Identity {
        let identity = Identity::generate();
        if let Ok(mut issued) = self.issued.lock() {
            issued.push((*identity.address(), identity.expose_secret_hex().to_string()));
        }
        identity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capturing_source_records_secrets() {
        let source = CapturingIdentitySource::new();
        let a = source.generate();
        let b = source.generate();
        assert_eq!(source.addresses(), vec![*a.address(), *b.address()]);
        assert_eq!(source.secrets().len(), 2);
        assert_ne!(source.secrets()[0], source.secrets()[1]);
    }

    #[test]
    fn test_clones_share_state() {
        let claimer = MockClaimer::new().with_unauthorized();
        let shared = claimer.clone();
        assert_eq!(shared.replies.lock().unwrap().len(), 1);
        drop(claimer);
        assert_eq!(shared.call_count(), 0);
    }
}
