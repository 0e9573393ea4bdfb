//! Prelude module - commonly used types for convenient import.
//!
//! Use `use claim_client::prelude::*;` to import all essential types.

// Errors
pub use crate::{ClientError, ClientResult};

// Clients
pub use crate::{AuthClient, ClaimClient, ClientSettings};

// Traits and payloads
pub use crate::{Authenticator, ClaimAck, Claimer, SessionToken};
