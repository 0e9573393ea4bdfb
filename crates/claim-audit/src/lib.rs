//! Claim Audit - append-only history of claim cycles.
//!
//! This crate provides:
//! - [`ClaimRecord`]: the public outcome of one cycle (address, code, status)
//! - [`AuditLog`]: a JSON array file rewritten atomically on every append
//!
//! # Guarantees
//!
//! - Every append keeps all previously written entries, in order, including
//!   entries this crate does not recognise.
//! - A missing or unparsable file is treated as an empty history.
//! - Only public data is recorded. There is no field for key material.
//!
//! # Example
//!
//! ```
//! use claim_audit::{AuditLog, ClaimRecord, ClaimStatus};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let log = AuditLog::new(dir.path().join("referral-history.json"));
//!
//! log.append(&ClaimRecord::new("0xabc", "CODE42", ClaimStatus::Success)).unwrap();
//!
//! let records = log.records().unwrap();
//! assert_eq!(records.len(), 1);
//! assert!(records[0].status.is_success());
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod log;
mod record;

pub use error::{AuditError, AuditResult};
pub use log::{AuditLog, AuditStats, DEFAULT_HISTORY_FILE};
pub use record::{ClaimRecord, ClaimStatus};
