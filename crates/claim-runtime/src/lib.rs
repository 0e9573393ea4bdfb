//! Claim Runtime - the workflow controller.
//!
//! A [`Workflow`] runs a configured number of strictly sequential cycles.
//! Each cycle creates a fresh identity, signs the challenge message, trades
//! the signature for a session token, submits the access code and appends a
//! claim record. Stage failures are recorded and the run continues; the
//! controller pauses for a random [`DelayRange`] sample between cycles.
//!
//! Progress is reported through a [`CycleObserver`], keeping presentation
//! out of the control flow.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use claim_audit::AuditLog;
//! use claim_client::{AuthClient, ClaimClient, ClientSettings};
//! use claim_runtime::prelude::*;
//!
//! # async fn example(config: claim_config::Config) -> Result<(), Box<dyn std::error::Error>> {
//! let client_settings = ClientSettings::from_config(&config);
//! let workflow = Workflow::new(
//!     AuthClient::new(&client_settings)?,
//!     ClaimClient::new(&client_settings)?,
//!     AuditLog::new(&config.audit.path),
//!     WorkflowSettings::from_config(&config),
//! )
//! .with_observer(Arc::new(TracingObserver));
//!
//! let summary = workflow.run().await?;
//! println!("{} of {} claims accepted", summary.succeeded, summary.total);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod delay;
mod error;
mod observer;
mod stage;
mod workflow;

pub use delay::DelayRange;
pub use error::{CycleError, RunError, RunResult};
pub use observer::{CycleObserver, NoopObserver, ShutdownNotice, TracingObserver};
pub use stage::Stage;
pub use workflow::{CycleReport, RunSummary, Workflow, WorkflowSettings};
