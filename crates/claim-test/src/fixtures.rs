//! Test fixtures for common types.

use claim_config::Config;
use claim_runtime::{DelayRange, WorkflowSettings};

/// Access code used by fixtures.
pub const TEST_ACCESS_CODE: &str = "TESTCODE";

/// Challenge message used by fixtures.
pub const TEST_CHALLENGE: &str = "Sign this message to join the test waitlist.";

/// Auth endpoint path used by [`test_config`].
pub const TEST_AUTH_PATH: &str = "/auth/wallet";

/// Claim endpoint path used by [`test_config`].
pub const TEST_CLAIM_PATH: &str = "/waitlist/join";

/// A valid configuration pointing at `base_url` with no inter-cycle delay.
#[must_use]
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config.api.app_url = "https://app.example.com".to_string();
    config.api.endpoints.auth = TEST_AUTH_PATH.to_string();
    config.api.endpoints.claim = TEST_CLAIM_PATH.to_string();
    config.referral.access_code = TEST_ACCESS_CODE.to_string();
    config.referral.cycles = 1;
    config.referral.delay_ms.min = 0;
    config.referral.delay_ms.max = 0;
    config.http.timeout_secs = 5;
    config
}

/// Workflow settings for `cycles` cycles with no delay.
#[must_use]
pub fn test_workflow_settings(cycles: u32) -> WorkflowSettings {
    WorkflowSettings {
        challenge_message: TEST_CHALLENGE.to_string(),
        access_code: TEST_ACCESS_CODE.to_string(),
        cycles,
        delay: DelayRange::NONE,
    }
}
