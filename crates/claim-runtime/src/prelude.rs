//! Prelude module - commonly used types for convenient import.
//!
//! Use `use claim_runtime::prelude::*;` to import all essential types.

// Errors
pub use crate::{CycleError, RunError, RunResult};

// Workflow
pub use crate::{CycleReport, DelayRange, RunSummary, Stage, Workflow, WorkflowSettings};

// Observers
pub use crate::{CycleObserver, NoopObserver, ShutdownNotice, TracingObserver};
