//! History file behaviour across runs.

mod common;

use claim_audit::ClaimStatus;
use common::Harness;
use serde_json::{Value, json};

#[tokio::test]
async fn test_runs_append_to_existing_history() {
    let h = Harness::start(2).await;
    h.mount_auth_token("tok").await;
    h.mount_claim_ok(4).await;

    h.workflow().run().await.unwrap();
    h.workflow().run().await.unwrap();

    let records = h.audit_log().records().unwrap();
    assert_eq!(records.len(), 4);
    let timestamps: Vec<&str> = records.iter().map(|r| r.timestamp.as_str()).collect();
    let mut sorted = timestamps.clone();
    sorted.sort_unstable();
    assert_eq!(timestamps, sorted);
}

#[tokio::test]
async fn test_foreign_entries_preserved() {
    let h = Harness::start(1).await;
    h.mount_auth_token("tok").await;
    h.mount_claim_ok(1).await;

    let legacy = json!([{"note": "imported by hand", "when": "yesterday"}]);
    std::fs::write(h.history_path(), serde_json::to_string_pretty(&legacy).unwrap()).unwrap();

    h.workflow().run().await.unwrap();

    let entries: Vec<Value> = serde_json::from_str(&h.history_text()).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], legacy[0]);
    assert_eq!(entries[1]["status"], "success");
    assert_eq!(entries[1]["accessCode"], claim_test::TEST_ACCESS_CODE);

    let stats = h.audit_log().stats().unwrap();
    assert_eq!(stats.unrecognized, 1);
}

#[tokio::test]
async fn test_corrupt_history_treated_as_empty() {
    let h = Harness::start(1).await;
    h.mount_auth(json!({"code": 500, "message": "down"})).await;
    h.mount_claim_ok(0).await;

    std::fs::write(h.history_path(), "{ not json").unwrap();

    h.workflow().run().await.unwrap();

    let records = h.audit_log().records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, ClaimStatus::Failed);
}

#[tokio::test]
async fn test_history_is_pretty_printed() {
    let h = Harness::start(1).await;
    h.mount_auth_token("tok").await;
    h.mount_claim_ok(1).await;

    h.workflow().run().await.unwrap();

    let text = h.history_text();
    assert!(text.starts_with("[\n  {\n    \"timestamp\""));
}
