//! Claim Client - HTTP clients for the remote enrollment service.
//!
//! Two calls are made per cycle:
//!
//! 1. [`AuthClient`] posts `{ walletAddress, message, signature }` and
//!    receives a [`SessionToken`].
//! 2. [`ClaimClient`] posts the access code with the token in an
//!    authorization header and receives a [`ClaimAck`].
//!
//! Both sit behind the [`Authenticator`] and [`Claimer`] traits so the
//! workflow controller can be driven by mocks.
//!
//! # Example
//!
//! ```rust,no_run
//! use claim_client::prelude::*;
//! use claim_crypto::Identity;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = ClientSettings::new(
//!     "https://api.example.com/auth/connect",
//!     "https://api.example.com/waitlist/join",
//! );
//! let http = settings.build_http_client()?;
//! let auth = AuthClient::with_http(http.clone(), &settings);
//! let claim = ClaimClient::with_http(http, &settings)?;
//!
//! let identity = Identity::generate();
//! let signature = identity.sign_message(b"hello")?;
//! let token = auth.authenticate(identity.address(), "hello", &signature).await?;
//! let ack = claim.claim("CODE42", &token).await?;
//! println!("claimed: {}", ack.data);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod auth;
mod claim;
mod envelope;
mod error;
mod settings;
mod token;
mod traits;

pub use auth::AuthClient;
pub use claim::{ClaimClient, UNAUTHORIZED_HINTS};
pub use error::{ClientError, ClientResult};
pub use settings::{ClientSettings, DEFAULT_TIMEOUT};
pub use token::SessionToken;
pub use traits::{Authenticator, ClaimAck, Claimer};
