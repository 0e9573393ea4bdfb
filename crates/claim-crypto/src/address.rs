//! Account addresses derived from secp256k1 public keys.
//!
//! An address is the last 20 bytes of the Keccak-256 hash of the
//! uncompressed public key (without the `0x04` tag byte). The textual form
//! is `0x`-prefixed hex with EIP-55 mixed-case checksumming.

use std::fmt;
use std::str::FromStr;

use sha3::{Digest, Keccak256};

use crate::error::{CryptoError, CryptoResult};

/// Compute the Keccak-256 digest of `data`.
#[must_use]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Keccak256::digest(data));
    out
}

/// A 20-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 20]);

impl Address {
    /// Create from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Derive the address of an uncompressed SEC1 public key (65 bytes, `0x04` tag).
    #[must_use]
    pub fn from_uncompressed_public_key(public_key: &[u8; 65]) -> Self {
        let digest = keccak256(&public_key[1..]);
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&digest[12..]);
        Self(bytes)
    }

    /// Get the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Render with the EIP-55 checksum casing, `0x`-prefixed.
    #[must_use]
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = keccak256(lower.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        // Each hash byte carries the casing bits for two hex characters.
        for (pair, byte) in lower.as_bytes().chunks(2).zip(hash.iter()) {
            for (ch, mask) in pair.iter().zip([0x80u8, 0x08u8]) {
                let ch = char::from(*ch);
                if ch.is_ascii_alphabetic() && byte & mask != 0 {
                    out.push(ch.to_ascii_uppercase());
                } else {
                    out.push(ch);
                }
            }
        }
        out
    }
}

impl FromStr for Address {
    type Err = CryptoError;

    /// Parse a `0x`-prefixed (or bare) hex address. Casing is not checked.
    fn from_str(s: &str) -> CryptoResult<Self> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped).map_err(|_| CryptoError::InvalidHexEncoding)?;
        let bytes: [u8; 20] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidAddress(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_checksum())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}
