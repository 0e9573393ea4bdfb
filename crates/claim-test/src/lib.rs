//! Claim Test - shared test utilities for the claim workflow.
//!
//! Mocks for the remote service seams, a recording observer and fixtures.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use claim_audit::AuditLog;
//! use claim_runtime::Workflow;
//! use claim_test::{MockAuthenticator, MockClaimer, RecordingObserver, test_workflow_settings};
//!
//! #[tokio::test]
//! async fn test_rejected_claim() {
//!     let dir = tempfile::tempdir().unwrap();
//!     let claimer = MockClaimer::new().with_unauthorized();
//!     let observer = Arc::new(RecordingObserver::new());
//!
//!     let workflow = Workflow::new(
//!         MockAuthenticator::new(),
//!         claimer.clone(),
//!         AuditLog::new(dir.path().join("history.json")),
//!         test_workflow_settings(1),
//!     )
//!     .with_observer(observer.clone());
//!
//!     let summary = workflow.run().await.unwrap();
//!     assert_eq!(summary.failed, 1);
//!     assert_eq!(claimer.call_count(), 1);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod fixtures;
pub mod mocks;
pub mod observer;

pub use fixtures::*;
pub use mocks::*;
pub use observer::*;
