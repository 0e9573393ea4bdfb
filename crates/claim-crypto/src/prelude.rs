//! Prelude module - commonly used types for convenient import.
//!
//! Use `use claim_crypto::prelude::*;` to import all essential types.

// Errors
pub use crate::{CryptoError, CryptoResult};

// Identities
pub use crate::{Address, Identity, IdentitySource, RandomIdentitySource};

// Signatures
pub use crate::{EthSignature, recover_address};
