//! An observer that records every checkpoint.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use claim_audit::{ClaimRecord, ClaimStatus};
use claim_crypto::Address;
use claim_runtime::{CycleError, CycleObserver, RunSummary, Stage};

/// A checkpoint as seen by [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedEvent {
    /// Run started.
    RunStart {
        /// Configured cycles.
        total: u32,
    },
    /// Cycle started.
    CycleStart {
        /// Cycle index.
        index: u32,
        /// Fresh identity's address.
        address: Address,
    },
    /// Stage completed.
    StageOk {
        /// Cycle index.
        index: u32,
        /// Completed stage.
        stage: Stage,
    },
    /// Cycle failed.
    StageFailed {
        /// Cycle index.
        index: u32,
        /// Failing stage.
        stage: Stage,
        /// Rendered error.
        error: String,
    },
    /// Record persisted.
    RecordWritten {
        /// Cycle index.
        index: u32,
        /// Recorded status.
        status: ClaimStatus,
    },
    /// Pause before the next cycle.
    Pause {
        /// Cycle index just finished.
        index: u32,
        /// Sampled delay.
        delay: Duration,
    },
    /// Run finished.
    RunEnd {
        /// Cycles executed.
        total: u32,
        /// Accepted claims.
        succeeded: u32,
    },
    /// Run interrupted.
    Interrupted {
        /// Cycles completed.
        completed: u32,
    },
}

/// Records every checkpoint with the instant it arrived.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<(Instant, ObservedEvent)>>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: ObservedEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push((Instant::now(), event));
        }
    }

    /// All events, in arrival order.
    #[must_use]
    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events
            .lock()
            .map(|e| e.iter().map(|(_, ev)| ev.clone()).collect())
            .unwrap_or_default()
    }

    /// Stages that failed, by cycle.
    #[must_use]
    pub fn failures(&self) -> Vec<(u32, Stage)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ObservedEvent::StageFailed { index, stage, .. } => Some((index, stage)),
                _ => None,
            })
            .collect()
    }

    /// Elapsed time between each record write and the next cycle start.
    #[must_use]
    pub fn inter_cycle_gaps(&self) -> Vec<Duration> {
        let Ok(events) = self.events.lock() else {
            return Vec::new();
        };

        let mut gaps = Vec::new();
        let mut last_record: Option<Instant> = None;
        for (at, event) in events.iter() {
            match event {
                ObservedEvent::RecordWritten { .. } => last_record = Some(*at),
                ObservedEvent::CycleStart { .. } => {
                    if let Some(prev) = last_record.take() {
                        gaps.push(at.saturating_duration_since(prev));
                    }
                },
                _ => {},
            }
        }
        gaps
    }

    /// Sampled delays reported through `on_pause`.
    #[must_use]
    pub fn pauses(&self) -> Vec<Duration> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ObservedEvent::Pause { delay, .. } => Some(delay),
                _ => None,
            })
            .collect()
    }
}

impl CycleObserver for RecordingObserver {
    fn on_run_start(&self, total: u32) {
        self.push(ObservedEvent::RunStart { total });
    }

    fn on_cycle_start(&self, index: u32, _total: u32, address: &Address) {
        self.push(ObservedEvent::CycleStart {
            index,
            address: *address,
        });
    }

    fn on_stage_ok(&self, index: u32, stage: Stage) {
        self.push(ObservedEvent::StageOk { index, stage });
    }

    fn on_stage_failed(&self, index: u32, error: &CycleError) {
        self.push(ObservedEvent::StageFailed {
            index,
            stage: error.stage(),
            error: error.to_string(),
        });
    }

    fn on_record_written(&self, index: u32, record: &ClaimRecord) {
        self.push(ObservedEvent::RecordWritten {
            index,
            status: record.status,
        });
    }

    fn on_pause(&self, index: u32, delay: Duration) {
        self.push(ObservedEvent::Pause { index, delay });
    }

    fn on_run_end(&self, summary: &RunSummary) {
        self.push(ObservedEvent::RunEnd {
            total: summary.total,
            succeeded: summary.succeeded,
        });
    }

    fn on_interrupt(&self, completed: u32, _total: u32) {
        self.push(ObservedEvent::Interrupted { completed });
    }
}
