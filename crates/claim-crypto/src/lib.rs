//! Claim Crypto - ephemeral wallet identities for the claim workflow.
//!
//! This crate provides:
//! - secp256k1 identities generated from the OS CSPRNG, never persisted
//! - EIP-55 checksummed addresses derived from the public key
//! - EIP-191 `personal_sign` signatures and address recovery
//!
//! # Example
//!
//! ```
//! use claim_crypto::{Identity, recover_address};
//!
//! let identity = Identity::generate();
//! let message = b"prove control";
//! let signature = identity.sign_message(message).unwrap();
//!
//! let signer = recover_address(message, &signature).unwrap();
//! assert_eq!(signer, *identity.address());
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod address;
mod error;
mod identity;
mod signature;

pub use address::{Address, keccak256};
pub use error::{CryptoError, CryptoResult};
pub use identity::{Identity, IdentitySource, RandomIdentitySource};
pub use signature::{EthSignature, hash_personal_message, recover_address};
