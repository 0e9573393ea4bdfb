//! Wallet authentication client.

use async_trait::async_trait;
use claim_crypto::{Address, EthSignature};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::envelope::{Envelope, remote_message};
use crate::error::{ClientError, ClientResult};
use crate::settings::ClientSettings;
use crate::token::SessionToken;
use crate::traits::Authenticator;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthRequest<'a> {
    wallet_address: &'a str,
    message: &'a str,
    signature: &'a str,
}

/// HTTP client for the authentication endpoint.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: Client,
    url: String,
}

impl AuthClient {
    /// Create a client with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(settings: &ClientSettings) -> ClientResult<Self> {
        Ok(Self::with_http(settings.build_http_client()?, settings))
    }

    /// Create a client sharing an existing HTTP client.
    #[must_use]
    pub fn with_http(http: Client, settings: &ClientSettings) -> Self {
        Self {
            http,
            url: settings.auth_url.clone(),
        }
    }
}

#[async_trait]
impl Authenticator for AuthClient {
    async fn authenticate(
        &self,
        address: &Address,
        message: &str,
        signature: &EthSignature,
    ) -> ClientResult<SessionToken> {
        let wallet_address = address.to_checksum();
        let signature = signature.to_hex();
        let body = AuthRequest {
            wallet_address: &wallet_address,
            message,
            signature: &signature,
        };

        debug!(url = %self.url, address = %wallet_address, "Authenticating wallet");

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::transport(&e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::transport(&e))?;

        if !status.is_success() {
            let message = remote_message(&text);
            warn!(status = %status, message = %message, "Authentication request failed");
            return Err(ClientError::AuthenticationFailed {
                http_status: status.as_u16(),
                message,
            });
        }

        let envelope = Envelope::parse(&text)?;
        if !envelope.is_success() {
            return Err(ClientError::AuthenticationFailed {
                http_status: status.as_u16(),
                message: envelope.message_or(&text),
            });
        }

        let token = SessionToken::new(envelope.token().ok_or(ClientError::MissingToken)?);
        debug!(token = %token.fingerprint(), "Session token issued");
        Ok(token)
    }
}
