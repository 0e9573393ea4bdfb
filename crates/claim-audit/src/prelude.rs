//! Prelude module - commonly used types for convenient import.
//!
//! Use `use claim_audit::prelude::*;` to import all essential types.

pub use crate::{AuditError, AuditLog, AuditResult, AuditStats, ClaimRecord, ClaimStatus};
