//! Ephemeral secp256k1 identities.
//!
//! An [`Identity`] lives for exactly one claim cycle. The secret scalar is
//! held in a zeroizing buffer and cleared when the identity is dropped; it is
//! never serialized and never shown by `Debug`.

use libsecp256k1::{Message, PublicKey, SecretKey};
use rand::RngCore;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::address::Address;
use crate::error::{CryptoError, CryptoResult};
use crate::signature::{EthSignature, hash_personal_message};

/// A wallet identity: secret key plus its derived address.
pub struct Identity {
    secret: Zeroizing<[u8; 32]>,
    address: Address,
}

impl Identity {
    /// Generate a new random identity from the OS CSPRNG.
    ///
    /// Draws that fall outside the curve order are discarded and redrawn.
    #[must_use]
    pub fn generate() -> Self {
        loop {
            let mut secret = Zeroizing::new([0u8; 32]);
            OsRng.fill_bytes(&mut secret[..]);
            if let Ok(identity) = Self::from_secret_bytes(&secret) {
                return identity;
            }
        }
    }

    /// Create from a 32-byte secret key.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidSecretKey`] if the bytes are zero or not
    /// below the curve order.
    pub fn from_secret_bytes(bytes: &[u8; 32]) -> CryptoResult<Self> {
        let secret_key = SecretKey::parse(bytes)
            .map_err(|e| CryptoError::InvalidSecretKey(format!("{e:?}")))?;
        let public_key = PublicKey::from_secret_key(&secret_key);
        let address = Address::from_uncompressed_public_key(&public_key.serialize());

        Ok(Self {
            secret: Zeroizing::new(*bytes),
            address,
        })
    }

    /// The public address. Stable for the lifetime of the identity.
    #[must_use]
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Sign `message` with the EIP-191 personal-message scheme.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::SigningFailed`] if the held secret no longer
    /// parses as a valid key.
    pub fn sign_message(&self, message: &[u8]) -> CryptoResult<EthSignature> {
        let secret_key = SecretKey::parse(&self.secret)
            .map_err(|e| CryptoError::SigningFailed(format!("{e:?}")))?;
        let digest = hash_personal_message(message);
        let (signature, recovery_id) = libsecp256k1::sign(&Message::parse(&digest), &secret_key);
        Ok(EthSignature::from_parts(
            signature.serialize(),
            recovery_id.serialize(),
        ))
    }

    /// Export the secret key as `0x`-prefixed hex (careful - sensitive!).
    ///
    /// Only intended for leak checks in tests. The returned string is
    /// zeroized on drop.
    #[must_use]
    pub fn expose_secret_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(format!("0x{}", hex::encode(*self.secret)))
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Source of fresh identities, one per claim cycle.
pub trait IdentitySource: Send + Sync {
    /// Produce a brand-new identity. Never returns a previously issued one.
    fn generate(&self) -> Identity;
}

/// Default [`IdentitySource`] backed by the OS CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdentitySource;

impl IdentitySource for RandomIdentitySource {
    fn generate(&self) -> Identity {
        Identity::generate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::recover_address;

    const KNOWN_SECRET: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    fn known_identity() -> Identity {
        let bytes: [u8; 32] = hex::decode(KNOWN_SECRET).unwrap().try_into().unwrap();
        Identity::from_secret_bytes(&bytes).unwrap()
    }

    #[test]
    fn test_known_address() {
        let identity = known_identity();
        assert_eq!(
            identity.address().to_string(),
            "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23"
        );
    }

    #[test]
    fn test_generation_is_fresh() {
        let a = Identity::generate();
        let b = Identity::generate();
        assert_ne!(a.address(), b.address());
    }

    #[test]
    fn test_sign_recovers_signer() {
        let identity = Identity::generate();
        let message = b"Welcome\n\nSign this message to join.";

        let signature = identity.sign_message(message).unwrap();
        assert!(matches!(signature.v(), 27 | 28));

        let recovered = recover_address(message, &signature).unwrap();
        assert_eq!(recovered, *identity.address());

        // A different message recovers a different signer.
        let other = recover_address(b"tampered", &signature).unwrap();
        assert_ne!(other, *identity.address());
    }

    #[test]
    fn test_signing_is_deterministic() {
        let identity = known_identity();
        let first = identity.sign_message(b"Some data").unwrap();
        let second = identity.sign_message(b"Some data").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_secret_rejected() {
        let result = Identity::from_secret_bytes(&[0u8; 32]);
        assert!(matches!(result, Err(CryptoError::InvalidSecretKey(_))));
    }

    #[test]
    fn test_debug_hides_secret() {
        let identity = known_identity();
        let debug = format!("{identity:?}");
        assert!(!debug.contains(KNOWN_SECRET));
        assert!(debug.contains("0x2c7536E3605D9C16a7a3D7b1898e529396a65c23"));
    }

    #[test]
    fn test_expose_secret_hex() {
        let identity = known_identity();
        assert_eq!(
            identity.expose_secret_hex().as_str(),
            format!("0x{KNOWN_SECRET}")
        );
    }

    #[test]
    fn test_random_source() {
        let source = RandomIdentitySource;
        let a = source.generate();
        let b = source.generate();
        assert_ne!(a.address(), b.address());
    }
}
