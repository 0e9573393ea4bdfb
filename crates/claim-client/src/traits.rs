//! Seams between the workflow controller and the remote service.

use async_trait::async_trait;
use claim_crypto::{Address, EthSignature};
use serde_json::Value;

use crate::error::ClientResult;
use crate::token::SessionToken;

/// Exchanges a signed challenge for a session token.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Prove control of `address` by presenting `signature` over `message`.
    async fn authenticate(
        &self,
        address: &Address,
        message: &str,
        signature: &EthSignature,
    ) -> ClientResult<SessionToken>;
}

/// Submits an access code on behalf of an authenticated wallet.
#[async_trait]
pub trait Claimer: Send + Sync {
    /// Claim `access_code` using `token`.
    async fn claim(&self, access_code: &str, token: &SessionToken) -> ClientResult<ClaimAck>;
}

/// Acknowledgement returned by a successful claim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimAck {
    /// The `data` payload of the response, `Null` when absent.
    pub data: Value,
    /// The remote message, if any.
    pub message: Option<String>,
}
