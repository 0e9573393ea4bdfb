//! Cryptographic error types.

use thiserror::Error;

/// Errors that can occur during identity and signature operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The secret key bytes are not a valid secp256k1 scalar.
    #[error("invalid secret key: {0}")]
    InvalidSecretKey(String),

    /// Invalid signature length.
    #[error("invalid signature length: expected {expected}, got {actual}")]
    InvalidSignatureLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// Invalid hex encoding.
    #[error("invalid hex encoding")]
    InvalidHexEncoding,

    /// Invalid address (wrong length or encoding).
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The recovery byte of a signature is out of range.
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    /// Public key recovery from a signature failed.
    #[error("signature recovery failed")]
    RecoveryFailed,

    /// Signing failed because of an internal key fault.
    #[error("signing failed: {0}")]
    SigningFailed(String),
}

/// Result type for cryptographic operations.
pub type CryptoResult<T> = Result<T, CryptoError>;
