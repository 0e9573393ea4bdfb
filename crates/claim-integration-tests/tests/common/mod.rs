//! Shared test harness for integration tests.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use claim_audit::AuditLog;
use claim_client::{AuthClient, ClaimClient, ClientSettings};
use claim_config::Config;
use claim_runtime::{DelayRange, Workflow, WorkflowSettings};
use claim_test::{
    CapturingIdentitySource, RecordingObserver, TEST_AUTH_PATH, TEST_CLAIM_PATH, test_config,
};
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A mock remote service plus a workflow wired against it.
#[allow(dead_code)]
pub struct Harness {
    /// The mock HTTP service.
    pub server: MockServer,
    /// Configuration pointing at `server`.
    pub config: Config,
    /// Records every identity handed to the workflow.
    pub identities: CapturingIdentitySource,
    /// Records every checkpoint.
    pub observer: Arc<RecordingObserver>,
    /// Holds the history file.
    _dir: TempDir,
}

#[allow(dead_code)]
impl Harness {
    /// Start a mock service and a config for `cycles` cycles without delay.
    pub async fn start(cycles: u32) -> Self {
        let server = MockServer::start().await;
        let dir = TempDir::new().expect("failed to create tempdir");

        let mut config = test_config(&server.uri());
        config.referral.cycles = cycles;
        config.audit.path = dir
            .path()
            .join("referral-history.json")
            .display()
            .to_string();

        Self {
            server,
            config,
            identities: CapturingIdentitySource::new(),
            observer: Arc::new(RecordingObserver::new()),
            _dir: dir,
        }
    }

    /// Set the inter-cycle delay bounds.
    pub fn with_delay(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.config.referral.delay_ms.min = min_ms;
        self.config.referral.delay_ms.max = max_ms;
        self
    }

    /// Path of the history file.
    pub fn history_path(&self) -> PathBuf {
        PathBuf::from(&self.config.audit.path)
    }

    /// The history file.
    pub fn audit_log(&self) -> AuditLog {
        AuditLog::new(self.history_path())
    }

    /// Build a workflow using the real HTTP clients.
    pub fn workflow(&self) -> Workflow<AuthClient, ClaimClient> {
        self.workflow_with_settings(ClientSettings::from_config(&self.config))
    }

    /// Build a workflow whose HTTP clients give up after `timeout`.
    pub fn workflow_with_timeout(&self, timeout: Duration) -> Workflow<AuthClient, ClaimClient> {
        self.workflow_with_settings(ClientSettings::from_config(&self.config).with_timeout(timeout))
    }

    fn workflow_with_settings(&self, settings: ClientSettings) -> Workflow<AuthClient, ClaimClient> {
        self.config.validate().expect("harness config must be valid");

        Workflow::new(
            AuthClient::new(&settings).expect("auth client"),
            ClaimClient::new(&settings).expect("claim client"),
            self.audit_log(),
            WorkflowSettings::from_config(&self.config),
        )
        .with_identity_source(Arc::new(self.identities.clone()))
        .with_observer(self.observer.clone())
    }

    /// Auth endpoint answers `body` with HTTP 200.
    pub async fn mount_auth(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path(TEST_AUTH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Auth endpoint issues `token`.
    pub async fn mount_auth_token(&self, token: &str) {
        self.mount_auth(json!({"code": 200, "data": {"token": token}}))
            .await;
    }

    /// Claim endpoint answers with `status` and `body`, expecting `calls` hits.
    pub async fn mount_claim(&self, status: u16, body: Value, calls: u64) {
        Mock::given(method("POST"))
            .and(path(TEST_CLAIM_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// Claim endpoint accepts every request, expecting `calls` hits.
    pub async fn mount_claim_ok(&self, calls: u64) {
        self.mount_claim(200, json!({"code": 200, "data": {"joined": true}}), calls)
            .await;
    }

    /// Raw contents of the history file.
    pub fn history_text(&self) -> String {
        std::fs::read_to_string(self.history_path()).expect("history file")
    }
}

/// Delay range configured by the harness.
#[allow(dead_code)]
pub fn delay_of(config: &Config) -> DelayRange {
    DelayRange::new(config.referral.delay_ms.min, config.referral.delay_ms.max)
}
