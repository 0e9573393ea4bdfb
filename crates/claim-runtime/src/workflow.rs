//! The claim workflow controller.
//!
//! Each cycle runs `Generate → Sign → Authenticate → Claim → Record`. A failed
//! stage skips straight to `Record`; only an unwritable history stops the run.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use claim_audit::{AuditLog, ClaimRecord, ClaimStatus};
use claim_client::{Authenticator, ClaimAck, Claimer};
use claim_config::Config;
use claim_crypto::{Address, EthSignature, IdentitySource, RandomIdentitySource};

use crate::delay::DelayRange;
use crate::error::{CycleError, RunError, RunResult};
use crate::observer::{CycleObserver, NoopObserver, ShutdownNotice};
use crate::stage::Stage;

/// Per-run parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct WorkflowSettings {
    /// Message signed by every identity.
    pub challenge_message: String,
    /// Access code submitted on every claim.
    pub access_code: String,
    /// Number of cycles to run.
    pub cycles: u32,
    /// Pause between cycles.
    pub delay: DelayRange,
}

impl WorkflowSettings {
    /// Take the run parameters from a validated configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            challenge_message: config.protocol.challenge_message.clone(),
            access_code: config.referral.access_code.clone(),
            cycles: config.referral.cycles,
            delay: DelayRange::new(config.referral.delay_ms.min, config.referral.delay_ms.max),
        }
    }
}

impl std::fmt::Debug for WorkflowSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let masked: String = self.access_code.chars().take(3).collect();
        f.debug_struct("WorkflowSettings")
            .field("challenge_message", &self.challenge_message)
            .field("access_code", &format!("{masked}***"))
            .field("cycles", &self.cycles)
            .field("delay", &self.delay)
            .finish()
    }
}

/// What one cycle produced.
#[derive(Debug)]
pub struct CycleReport {
    /// 1-based cycle index.
    pub index: u32,
    /// Address of the cycle's identity.
    pub address: Address,
    /// The persisted record.
    pub record: ClaimRecord,
    /// Claim acknowledgement, or the reason the cycle failed.
    pub outcome: Result<ClaimAck, CycleError>,
}

impl CycleReport {
    /// Whether the claim was accepted.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Totals for a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Cycles executed.
    pub total: u32,
    /// Cycles whose claim was accepted.
    pub succeeded: u32,
    /// Cycles that failed at any stage.
    pub failed: u32,
    /// Records written during this run, in order.
    pub records: Vec<ClaimRecord>,
}

impl RunSummary {
    fn push(&mut self, record: ClaimRecord) {
        self.total = self.total.saturating_add(1);
        if record.status.is_success() {
            self.succeeded = self.succeeded.saturating_add(1);
        } else {
            self.failed = self.failed.saturating_add(1);
        }
        self.records.push(record);
    }
}

/// Drives claim cycles against an [`Authenticator`] and a [`Claimer`].
pub struct Workflow<A, C> {
    authenticator: A,
    claimer: C,
    identities: Arc<dyn IdentitySource>,
    audit: AuditLog,
    settings: WorkflowSettings,
    observer: Arc<dyn CycleObserver>,
    completed: Arc<AtomicU32>,
}

impl<A, C> Workflow<A, C>
where
    A: Authenticator,
    C: Claimer,
{
    /// Create a workflow with random identities and no observer.
    #[must_use]
    pub fn new(authenticator: A, claimer: C, audit: AuditLog, settings: WorkflowSettings) -> Self {
        Self {
            authenticator,
            claimer,
            identities: Arc::new(RandomIdentitySource),
            audit,
            settings,
            observer: Arc::new(NoopObserver),
            completed: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Replace the identity source.
    #[must_use]
    pub fn with_identity_source(mut self, identities: Arc<dyn IdentitySource>) -> Self {
        self.identities = identities;
        self
    }

    /// Replace the observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn CycleObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Run parameters.
    #[must_use]
    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    /// The history this workflow appends to.
    #[must_use]
    pub fn audit_log(&self) -> &AuditLog {
        &self.audit
    }

    /// Handle for reporting an interrupt while [`run`](Self::run) is pending.
    #[must_use]
    pub fn shutdown_notice(&self) -> ShutdownNotice {
        ShutdownNotice::new(
            Arc::clone(&self.observer),
            Arc::clone(&self.completed),
            self.settings.cycles,
        )
    }

    /// Run every configured cycle in order, pausing between them.
    ///
    /// The count reported by [`ShutdownNotice`] restarts at zero.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Audit`] if a record cannot be written. Cycle
    /// failures are recorded, not returned.
    pub async fn run(&self) -> RunResult<RunSummary> {
        let total = self.settings.cycles;
        self.completed.store(0, Ordering::SeqCst);
        self.observer.on_run_start(total);

        let mut summary = RunSummary::default();
        for index in 1..=total {
            let report = self.run_cycle(index).await?;
            summary.push(report.record);

            if index < total {
                let delay = self.settings.delay.sample();
                if !delay.is_zero() {
                    self.observer.on_pause(index, delay);
                    tokio::time::sleep(delay).await;
                }
            }
        }

        self.observer.on_run_end(&summary);
        Ok(summary)
    }

    /// Run a single cycle and append its record.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Audit`] if the record cannot be written.
    pub async fn run_cycle(&self, index: u32) -> RunResult<CycleReport> {
        let (address, signed) = self.generate_and_sign(index);

        let outcome = match signed {
            Ok(signature) => self.exchange(index, &address, &signature).await,
            Err(e) => Err(e),
        };

        if let Err(e) = &outcome {
            self.observer.on_stage_failed(index, e);
        }

        let status = if outcome.is_ok() {
            ClaimStatus::Success
        } else {
            ClaimStatus::Failed
        };
        let record = ClaimRecord::new(address.to_checksum(), &self.settings.access_code, status);

        self.audit
            .append(&record)
            .map_err(|source| RunError::Audit {
                cycle: index,
                source,
            })?;
        self.completed.fetch_add(1, Ordering::SeqCst);
        self.observer.on_stage_ok(index, Stage::Record);
        self.observer.on_record_written(index, &record);

        Ok(CycleReport {
            index,
            address,
            record,
            outcome,
        })
    }

    /// Generate an identity and sign the challenge. The identity is dropped
    /// before this returns.
    fn generate_and_sign(&self, index: u32) -> (Address, Result<EthSignature, CycleError>) {
        let identity = self.identities.generate();
        let address = *identity.address();
        self.observer
            .on_cycle_start(index, self.settings.cycles, &address);
        self.observer.on_stage_ok(index, Stage::Generate);

        let signed = identity
            .sign_message(self.settings.challenge_message.as_bytes())
            .map_err(CycleError::Signing);
        if signed.is_ok() {
            self.observer.on_stage_ok(index, Stage::Sign);
        }
        (address, signed)
    }

    async fn exchange(
        &self,
        index: u32,
        address: &Address,
        signature: &EthSignature,
    ) -> Result<ClaimAck, CycleError> {
        let token = self
            .authenticator
            .authenticate(address, &self.settings.challenge_message, signature)
            .await
            .map_err(CycleError::Authentication)?;
        self.observer.on_stage_ok(index, Stage::Authenticate);

        let ack = self
            .claimer
            .claim(&self.settings.access_code, &token)
            .await
            .map_err(CycleError::Claim)?;
        self.observer.on_stage_ok(index, Stage::Claim);

        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use claim_client::{ClientError, ClientResult, SessionToken};

    use super::*;

    /// Issues a token unless `fail_all` is set.
    #[derive(Default)]
    struct StubAuth {
        fail_all: bool,
        calls: Mutex<u32>,
    }

    #[async_trait]
    impl Authenticator for StubAuth {
        async fn authenticate(
            &self,
            address: &Address,
            _message: &str,
            signature: &EthSignature,
        ) -> ClientResult<SessionToken> {
            let mut calls = self.calls.lock().unwrap();
            *calls = calls.saturating_add(1);
            drop(calls);
            if self.fail_all {
                return Err(ClientError::AuthenticationFailed {
                    http_status: 200,
                    message: "Invalid signature".to_string(),
                });
            }
            // Prove the signature really came from the address.
            let recovered = claim_crypto::recover_address(b"challenge", signature).unwrap();
            assert_eq!(&recovered, address);
            Ok(SessionToken::new("tok"))
        }
    }

    #[derive(Default)]
    struct StubClaim {
        reject: bool,
        calls: Mutex<u32>,
    }

    #[async_trait]
    impl Claimer for StubClaim {
        async fn claim(&self, access_code: &str, token: &SessionToken) -> ClientResult<ClaimAck> {
            let mut calls = self.calls.lock().unwrap();
            *calls = calls.saturating_add(1);
            drop(calls);
            assert_eq!(access_code, "CODE42");
            assert_eq!(token.expose(), "tok");
            if self.reject {
                return Err(ClientError::ClaimRejected {
                    http_status: 401,
                    message: "Unauthorized".to_string(),
                });
            }
            Ok(ClaimAck::default())
        }
    }

    #[derive(Default)]
    struct StageLog(Mutex<Vec<(u32, Stage)>>);

    impl CycleObserver for StageLog {
        fn on_stage_ok(&self, index: u32, stage: Stage) {
            self.0.lock().unwrap().push((index, stage));
        }
    }

    fn settings(cycles: u32) -> WorkflowSettings {
        WorkflowSettings {
            challenge_message: "challenge".to_string(),
            access_code: "CODE42".to_string(),
            cycles,
            delay: DelayRange::NONE,
        }
    }

    fn audit() -> (tempfile::TempDir, AuditLog) {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("history.json"));
        (dir, log)
    }

    #[tokio::test]
    async fn test_successful_run() {
        let (_dir, log) = audit();
        let workflow = Workflow::new(StubAuth::default(), StubClaim::default(), log, settings(3));

        let summary = workflow.run().await.unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 3);
        assert_eq!(summary.failed, 0);

        let records = workflow.audit_log().records().unwrap();
        assert_eq!(records, summary.records);
        let addresses: HashSet<_> = records.iter().map(|r| r.address.clone()).collect();
        assert_eq!(addresses.len(), 3);
        assert_eq!(workflow.shutdown_notice().completed(), 3);
    }

    #[tokio::test]
    async fn test_completed_count_restarts_each_run() {
        let (_dir, log) = audit();
        let workflow = Workflow::new(StubAuth::default(), StubClaim::default(), log, settings(2));
        let notice = workflow.shutdown_notice();

        workflow.run().await.unwrap();
        workflow.run().await.unwrap();
        assert_eq!(notice.completed(), 2);
        assert_eq!(workflow.audit_log().records().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_auth_failure_skips_claim() {
        let (_dir, log) = audit();
        let auth = StubAuth {
            fail_all: true,
            ..Default::default()
        };
        let workflow = Workflow::new(auth, StubClaim::default(), log, settings(2));

        let summary = workflow.run().await.unwrap();
        assert_eq!(summary.failed, 2);
        assert_eq!(*workflow.authenticator.calls.lock().unwrap(), 2);
        assert_eq!(*workflow.claimer.calls.lock().unwrap(), 0);
        assert!(
            summary
                .records
                .iter()
                .all(|r| r.status == ClaimStatus::Failed)
        );
    }

    #[tokio::test]
    async fn test_claim_rejection_continues_run() {
        let (_dir, log) = audit();
        let claim = StubClaim {
            reject: true,
            ..Default::default()
        };
        let workflow = Workflow::new(StubAuth::default(), claim, log, settings(3));

        let report = workflow.run_cycle(1).await.unwrap();
        assert!(!report.is_success());
        let err = report.outcome.unwrap_err();
        assert_eq!(err.stage(), Stage::Claim);
        assert!(err.is_unauthorized());

        let summary = workflow.run().await.unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(workflow.audit_log().records().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_stage_order() {
        let (_dir, log) = audit();
        let stages = Arc::new(StageLog::default());
        let workflow = Workflow::new(StubAuth::default(), StubClaim::default(), log, settings(1))
            .with_observer(stages.clone());

        workflow.run().await.unwrap();
        let seen: Vec<Stage> = stages.0.lock().unwrap().iter().map(|(_, s)| *s).collect();
        assert_eq!(
            seen,
            vec![
                Stage::Generate,
                Stage::Sign,
                Stage::Authenticate,
                Stage::Claim,
                Stage::Record
            ]
        );
    }

    #[tokio::test]
    async fn test_unwritable_history_aborts() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the rename fail.
        let path = dir.path().join("history.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("blocker"), b"x").unwrap();

        let workflow = Workflow::new(
            StubAuth::default(),
            StubClaim::default(),
            AuditLog::new(path),
            settings(2),
        );
        let err = workflow.run().await.unwrap_err();
        assert!(matches!(err, RunError::Audit { cycle: 1, .. }));
    }

    #[test]
    fn test_settings_debug_masks_code() {
        let debug = format!("{:?}", settings(1));
        assert!(!debug.contains("CODE42"));
        assert!(debug.contains("COD***"));
    }
}
