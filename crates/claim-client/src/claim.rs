//! Access-code claim client.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderName, HeaderValue};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::envelope::{Envelope, remote_message};
use crate::error::{ClientError, ClientResult};
use crate::settings::ClientSettings;
use crate::token::SessionToken;
use crate::traits::{ClaimAck, Claimer};

/// Likely causes of a 401 on the claim endpoint.
pub const UNAUTHORIZED_HINTS: &[&str] = &[
    "the session token is invalid",
    "the session token has expired",
    "the authorization value is not framed as `jwt <token>`",
    "the wallet is not registered with the service",
];

/// HTTP client for the claim endpoint.
#[derive(Debug, Clone)]
pub struct ClaimClient {
    http: Client,
    url: String,
    access_code_field: String,
    auth_header: HeaderName,
    token_scheme: String,
}

impl ClaimClient {
    /// Create a client with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the configured
    /// header name is invalid.
    pub fn new(settings: &ClientSettings) -> ClientResult<Self> {
        Self::with_http(settings.build_http_client()?, settings)
    }

    /// Create a client sharing an existing HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidHeader`] if the configured header name
    /// is invalid.
    pub fn with_http(http: Client, settings: &ClientSettings) -> ClientResult<Self> {
        Ok(Self {
            http,
            url: settings.claim_url.clone(),
            access_code_field: settings.access_code_field.clone(),
            auth_header: settings.auth_header_name()?,
            token_scheme: settings.token_scheme.clone(),
        })
    }

    fn request_body(&self, access_code: &str) -> Value {
        let mut body = Map::new();
        body.insert(
            self.access_code_field.clone(),
            Value::String(access_code.to_string()),
        );
        Value::Object(body)
    }
}

#[async_trait]
impl Claimer for ClaimClient {
    async fn claim(&self, access_code: &str, token: &SessionToken) -> ClientResult<ClaimAck> {
        let mut auth_value = HeaderValue::try_from(token.authorization_value(&self.token_scheme))
            .map_err(|e| ClientError::InvalidHeader(format!("session token: {e}")))?;
        auth_value.set_sensitive(true);

        debug!(url = %self.url, field = %self.access_code_field, "Submitting claim");

        let response = self
            .http
            .post(&self.url)
            .header(self.auth_header.clone(), auth_value)
            .json(&self.request_body(access_code))
            .send()
            .await
            .map_err(|e| ClientError::transport(&e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::transport(&e))?;

        if !status.is_success() {
            let err = ClientError::ClaimRejected {
                http_status: status.as_u16(),
                message: remote_message(&text),
            };
            if err.is_unauthorized() {
                warn!(
                    header = %self.auth_header,
                    scheme = %self.token_scheme,
                    hints = ?UNAUTHORIZED_HINTS,
                    "Claim unauthorized (401)"
                );
            }
            return Err(err);
        }

        let envelope = Envelope::parse(&text)?;
        if !envelope.is_success() {
            return Err(ClientError::ClaimRejected {
                http_status: status.as_u16(),
                message: envelope.message_or(&text),
            });
        }

        Ok(ClaimAck {
            data: envelope.data,
            message: envelope.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings_for(server: &MockServer) -> ClientSettings {
        ClientSettings::new(
            format!("{}/auth", server.uri()),
            format!("{}/claim", server.uri()),
        )
    }

    #[tokio::test]
    async fn test_success_returns_ack() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/claim"))
            .and(header("authorization", "jwt tok-123"))
            .and(body_json(json!({"accessCode": "CODE42"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"code": 200, "data": {"position": 7}, "message": "ok"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ClaimClient::new(&settings_for(&server)).unwrap();
        let ack = client
            .claim("CODE42", &SessionToken::new("tok-123"))
            .await
            .unwrap();
        assert_eq!(ack.data, json!({"position": 7}));
        assert_eq!(ack.message.as_deref(), Some("ok"));
    }

    #[tokio::test]
    async fn test_prefixed_token_not_doubled() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "jwt tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 200})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ClaimClient::new(&settings_for(&server)).unwrap();
        client
            .claim("CODE42", &SessionToken::new("jwt tok-123"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_custom_field_and_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-session", "Bearer tok"))
            .and(body_json(json!({"inviteCode": "CODE42"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 200})))
            .expect(1)
            .mount(&server)
            .await;

        let settings = settings_for(&server)
            .with_access_code_field("inviteCode")
            .with_authorization("X-Session", "Bearer");
        let client = ClaimClient::new(&settings).unwrap();
        client
            .claim("CODE42", &SessionToken::new("tok"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized"})),
            )
            .mount(&server)
            .await;

        let client = ClaimClient::new(&settings_for(&server)).unwrap();
        let err = client
            .claim("CODE42", &SessionToken::new("tok"))
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
        assert!(err.to_string().contains("Unauthorized"));
        assert!(!err.to_string().contains("tok"));
    }

    #[tokio::test]
    async fn test_non_200_code_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"code": 409, "message": "Code already used"})),
            )
            .mount(&server)
            .await;

        let client = ClaimClient::new(&settings_for(&server)).unwrap();
        let err = client
            .claim("CODE42", &SessionToken::new("tok"))
            .await
            .unwrap_err();
        match err {
            ClientError::ClaimRejected {
                http_status,
                message,
            } => {
                assert_eq!(http_status, 200);
                assert_eq!(message, "Code already used");
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_transport() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"code": 200}))
                    .set_delay(Duration::from_millis(800)),
            )
            .mount(&server)
            .await;

        let settings = settings_for(&server).with_timeout(Duration::from_millis(100));
        let err = ClaimClient::new(&settings)
            .unwrap()
            .claim("CODE42", &SessionToken::new("tok"))
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert!(!err.is_unauthorized());
    }
}
