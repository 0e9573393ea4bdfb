//! Inter-cycle delay behaviour.

mod common;

use std::time::Duration;

use claim_test::ObservedEvent;
use common::{Harness, delay_of};

/// Allowance for scheduling and identity generation between cycles.
const JITTER: Duration = Duration::from_millis(150);

#[tokio::test]
async fn test_zero_delay_has_no_pause() {
    let h = Harness::start(4).await.with_delay(0, 0);
    h.mount_auth_token("tok").await;
    h.mount_claim_ok(4).await;

    h.workflow().run().await.unwrap();

    assert!(h.observer.pauses().is_empty());
    let gaps = h.observer.inter_cycle_gaps();
    assert_eq!(gaps.len(), 3);
    assert!(gaps.iter().all(|gap| *gap < JITTER));
}

#[tokio::test]
async fn test_gaps_within_configured_range() {
    let h = Harness::start(4).await.with_delay(60, 140);
    h.mount_auth_token("tok").await;
    h.mount_claim_ok(4).await;

    h.workflow().run().await.unwrap();

    let range = delay_of(&h.config);
    let pauses = h.observer.pauses();
    assert_eq!(pauses.len(), 3);
    assert!(pauses.iter().all(|p| range.contains(*p)));

    for gap in h.observer.inter_cycle_gaps() {
        assert!(gap >= Duration::from_millis(60), "gap too short: {gap:?}");
        assert!(
            gap <= Duration::from_millis(140).saturating_add(JITTER),
            "gap too long: {gap:?}"
        );
    }
}

#[tokio::test]
async fn test_no_pause_after_last_cycle() {
    let h = Harness::start(2).await.with_delay(30, 30);
    h.mount_auth_token("tok").await;
    h.mount_claim_ok(2).await;

    h.workflow().run().await.unwrap();

    let events = h.observer.events();
    let last_pause = events
        .iter()
        .rposition(|e| matches!(e, ObservedEvent::Pause { .. }))
        .unwrap();
    let last_cycle = events
        .iter()
        .rposition(|e| matches!(e, ObservedEvent::CycleStart { .. }))
        .unwrap();
    assert!(last_pause < last_cycle);
    assert!(matches!(events.last(), Some(ObservedEvent::RunEnd { .. })));
}
