//! EIP-191 personal-message signatures.
//!
//! Signatures are 65 bytes, `r || s || v`, with `v` in `{27, 28}` as
//! produced by wallet `personal_sign` implementations.

use std::fmt;

use libsecp256k1::{Message, RecoveryId, Signature};

use crate::address::{Address, keccak256};
use crate::error::{CryptoError, CryptoResult};

const PERSONAL_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Offset added to the recovery id in the `v` byte.
const V_OFFSET: u8 = 27;

/// Hash a message the way `personal_sign` does before signing.
#[must_use]
pub fn hash_personal_message(message: &[u8]) -> [u8; 32] {
    let header = format!("{PERSONAL_MESSAGE_PREFIX}{}", message.len());
    let mut data = Vec::with_capacity(header.len().saturating_add(message.len()));
    data.extend_from_slice(header.as_bytes());
    data.extend_from_slice(message);
    keccak256(&data)
}

/// A recoverable secp256k1 signature over a personal message.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EthSignature([u8; 65]);

impl EthSignature {
    pub(crate) fn from_parts(rs: [u8; 64], recovery_id: u8) -> Self {
        let mut bytes = [0u8; 65];
        bytes[..64].copy_from_slice(&rs);
        bytes[64] = recovery_id.saturating_add(V_OFFSET);
        Self(bytes)
    }

    /// Try to create from a slice.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidSignatureLength`] if the slice is not exactly 65 bytes.
    pub fn try_from_slice(slice: &[u8]) -> CryptoResult<Self> {
        let bytes: [u8; 65] = slice
            .try_into()
            .map_err(|_| CryptoError::InvalidSignatureLength {
                expected: 65,
                actual: slice.len(),
            })?;
        Ok(Self(bytes))
    }

    /// Get the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    /// The `v` byte.
    #[must_use]
    pub const fn v(&self) -> u8 {
        self.0[64]
    }

    /// Encode as `0x`-prefixed hex, the wire format expected by the remote service.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Decode from hex, with or without the `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid hex or not 65 bytes.
    pub fn from_hex(s: &str) -> CryptoResult<Self> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped).map_err(|_| CryptoError::InvalidHexEncoding)?;
        Self::try_from_slice(&bytes)
    }

    fn recovery_id(&self) -> CryptoResult<RecoveryId> {
        // Accept both the `{27, 28}` wallet form and the raw `{0, 1}` form.
        let v = self.v();
        let raw = v.checked_sub(V_OFFSET).unwrap_or(v);
        RecoveryId::parse(raw).map_err(|_| CryptoError::InvalidRecoveryId(v))
    }
}

impl fmt::Debug for EthSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EthSignature({}...)", &self.to_hex()[..18])
    }
}

impl fmt::Display for EthSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Recover the address that produced `signature` over `message`.
///
/// # Errors
///
/// Returns an error if the signature is malformed or recovery fails.
pub fn recover_address(message: &[u8], signature: &EthSignature) -> CryptoResult<Address> {
    let digest = hash_personal_message(message);
    let msg = Message::parse(&digest);

    let mut rs = [0u8; 64];
    rs.copy_from_slice(&signature.as_bytes()[..64]);
    let sig = Signature::parse_standard(&rs).map_err(|_| CryptoError::RecoveryFailed)?;
    let recovery_id = signature.recovery_id()?;

    let public_key =
        libsecp256k1::recover(&msg, &sig, &recovery_id).map_err(|_| CryptoError::RecoveryFailed)?;
    Ok(Address::from_uncompressed_public_key(&public_key.serialize()))
}
