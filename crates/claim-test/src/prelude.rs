//! Prelude module - commonly used test utilities.
//!
//! Use `use claim_test::prelude::*;` to import all essential types.

pub use crate::{
    CapturingIdentitySource, MockAuthReply, MockAuthenticator, MockClaimReply, MockClaimer,
    ObservedEvent, RecordingObserver, TEST_ACCESS_CODE, TEST_CHALLENGE, test_config,
    test_workflow_settings,
};
