//! Checkpoint callbacks for presentation and logging.
//!
//! The controller reports progress through [`CycleObserver`] only; it never
//! writes to the console itself.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use claim_audit::ClaimRecord;
use claim_crypto::Address;
use tracing::{debug, info, warn};

use crate::error::CycleError;
use crate::stage::Stage;
use crate::workflow::RunSummary;

/// Receives workflow checkpoints. Every method defaults to a no-op.
pub trait CycleObserver: Send + Sync {
    /// The run is about to execute `total` cycles.
    fn on_run_start(&self, _total: u32) {}

    /// Cycle `index` generated a fresh identity for `address`.
    fn on_cycle_start(&self, _index: u32, _total: u32, _address: &Address) {}

    /// A stage of cycle `index` completed.
    fn on_stage_ok(&self, _index: u32, _stage: Stage) {}

    /// Cycle `index` stopped at `error.stage()`.
    fn on_stage_failed(&self, _index: u32, _error: &CycleError) {}

    /// The record for cycle `index` was persisted.
    fn on_record_written(&self, _index: u32, _record: &ClaimRecord) {}

    /// The controller is pausing after cycle `index`.
    fn on_pause(&self, _index: u32, _delay: Duration) {}

    /// All cycles finished.
    fn on_run_end(&self, _summary: &RunSummary) {}

    /// The process is being interrupted after `completed` of `total` cycles.
    fn on_interrupt(&self, _completed: u32, _total: u32) {}
}

/// Observer that ignores every checkpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CycleObserver for NoopObserver {}

/// Observer that emits structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CycleObserver for TracingObserver {
    fn on_run_start(&self, total: u32) {
        info!(cycles = total, "Starting claim run");
    }

    fn on_cycle_start(&self, index: u32, total: u32, address: &Address) {
        info!(cycle = index, total, address = %address, "Cycle started");
    }

    fn on_stage_ok(&self, index: u32, stage: Stage) {
        debug!(cycle = index, stage = %stage, "Stage completed");
    }

    fn on_stage_failed(&self, index: u32, error: &CycleError) {
        warn!(cycle = index, stage = %error.stage(), error = %error, "Cycle failed");
    }

    fn on_record_written(&self, index: u32, record: &ClaimRecord) {
        debug!(cycle = index, status = %record.status, "Claim record written");
    }

    fn on_pause(&self, index: u32, delay: Duration) {
        debug!(cycle = index, delay_ms = delay.as_millis(), "Pausing before next cycle");
    }

    fn on_run_end(&self, summary: &RunSummary) {
        info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Claim run finished"
        );
    }

    fn on_interrupt(&self, completed: u32, total: u32) {
        warn!(completed, total, "Claim run interrupted");
    }
}

/// Handle for reporting an interrupt to the workflow's observer.
///
/// Nothing secret outlives a cycle, so this carries no cleanup duty.
#[derive(Clone)]
pub struct ShutdownNotice {
    observer: Arc<dyn CycleObserver>,
    completed: Arc<AtomicU32>,
    total: u32,
}

impl ShutdownNotice {
    pub(crate) fn new(observer: Arc<dyn CycleObserver>, completed: Arc<AtomicU32>, total: u32) -> Self {
        Self {
            observer,
            completed,
            total,
        }
    }

    /// Cycles whose record has been written so far.
    #[must_use]
    pub fn completed(&self) -> u32 {
        self.completed.load(Ordering::SeqCst)
    }

    /// Tell the observer the run is being interrupted.
    pub fn notify(&self) {
        self.observer.on_interrupt(self.completed(), self.total);
    }
}

impl std::fmt::Debug for ShutdownNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShutdownNotice")
            .field("completed", &self.completed())
            .field("total", &self.total)
            .finish_non_exhaustive()
    }
}
