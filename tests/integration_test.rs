//! Integration tests for loadbus
//!
//! These tests verify end-to-end behavior of the bus, provider, and
//! subscribers working together.

use std::time::Duration;

use loadbus::config::SweepConfig;
use loadbus::provider::{LoadingProvider, ProviderRequest};
use loadbus::{LoadingBus, PageLoadSentry};
use tokio::time::Instant;

// =============================================================================
// Bus + provider lifecycle
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_provider_starts_and_stops() {
    let bus = LoadingBus::new();
    let provider = LoadingProvider::new(bus, SweepConfig::default());
    let sender = provider.sender();

    let task = tokio::spawn(provider.run());

    // Give it time to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    let send_result = sender.send(ProviderRequest::Shutdown).await;
    assert!(send_result.is_ok(), "Should be able to send shutdown");

    let result = tokio::time::timeout(Duration::from_secs(5), task).await;
    assert!(result.is_ok(), "Provider should shut down gracefully");
}

#[tokio::test(start_paused = true)]
async fn test_minimum_visible_scenario() {
    // start(1000) at t=0, end at t=10: the overlay holds until t>=1000,
    // and the sweep at t=1001 hides it.
    let bus = LoadingBus::new();
    let t0 = Instant::now();

    let handle = bus.request_start(Duration::from_millis(1000));
    assert_eq!(handle.instant(), t0 + Duration::from_millis(1000));
    assert!(bus.is_visible());

    tokio::time::sleep(Duration::from_millis(10)).await;
    bus.request_end(handle);

    assert_eq!(bus.snapshot().active, 0);
    assert!(bus.is_visible(), "minimum-visible window must hold");

    tokio::time::sleep(Duration::from_millis(991)).await;
    bus.sweep_elapsed();

    assert!(!bus.is_visible());
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_operations_scenario() {
    // start(500) at t=0 and start(2000) at t=100 aggregate to
    // next_hide_at = t0+2100; the first ending early changes nothing.
    let bus = LoadingBus::new();
    let t0 = Instant::now();

    let first = bus.request_start(Duration::from_millis(500));
    tokio::time::sleep(Duration::from_millis(100)).await;
    let second = bus.request_start(Duration::from_millis(2000));

    assert_eq!(bus.snapshot().next_hide_at, Some(t0 + Duration::from_millis(2100)));

    bus.request_end(first);
    assert_eq!(bus.snapshot().next_hide_at, Some(t0 + Duration::from_millis(2100)));
    assert!(bus.is_visible());

    bus.request_end(second);
    tokio::time::sleep(Duration::from_millis(2001)).await;
    bus.sweep_elapsed();
    assert!(!bus.is_visible());
}

#[tokio::test(start_paused = true)]
async fn test_provider_hides_overlay_without_manual_sweep() {
    let bus = LoadingBus::new();
    let config = SweepConfig {
        interval_ms: 250,
        ..Default::default()
    };
    let provider = LoadingProvider::new(bus.clone(), config);
    let sender = provider.sender();
    let task = tokio::spawn(provider.run());

    let sentry = PageLoadSentry::new(&bus, Duration::from_millis(300));
    tokio::time::sleep(Duration::from_millis(50)).await;
    drop(sentry);

    assert!(bus.is_visible(), "window still open after unmount");

    // The tick after the deadline purges it; allow two full intervals
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(!bus.is_visible());

    sender.send(ProviderRequest::Shutdown).await.unwrap();
    tokio::time::timeout(Duration::from_secs(5), task).await.unwrap().unwrap();
}

// =============================================================================
// Subscribers
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_subscriber_observes_full_lifecycle() {
    let bus = LoadingBus::new();
    let mut sub = bus.subscribe();

    // Initial delivery
    let state = sub.changed().await.unwrap();
    assert_eq!(state.active, 0);
    assert!(!state.visible());

    let handle = bus.request_start(Duration::from_millis(200));
    let state = sub.changed().await.unwrap();
    assert_eq!(state.active, 1);
    assert!(state.visible());

    bus.request_end(handle);
    let state = sub.changed().await.unwrap();
    assert_eq!(state.active, 0);
    assert!(state.visible(), "deadline still pending");

    tokio::time::sleep(Duration::from_millis(201)).await;
    bus.sweep_elapsed();
    let state = sub.changed().await.unwrap();
    assert_eq!(state.next_hide_at, None);
    assert!(!state.visible());
}

#[tokio::test(start_paused = true)]
async fn test_multiple_subscribers_see_the_same_states() {
    let bus = LoadingBus::new();
    let mut first = bus.subscribe();
    let mut second = bus.subscribe();

    assert_eq!(first.changed().await.unwrap().active, 0);
    assert_eq!(second.changed().await.unwrap().active, 0);

    let _handle = bus.request_start(Duration::from_millis(100));

    let a = first.changed().await.unwrap();
    let b = second.changed().await.unwrap();
    assert_eq!(a, b);
    assert_eq!(a.active, 1);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_subscriber_does_not_stall_the_bus() {
    let bus = LoadingBus::new();

    let sub = bus.subscribe();
    drop(sub);

    // Mutations after the drop must not error or leak the registration
    let handle = bus.request_start(Duration::from_millis(100));
    bus.request_end(handle);
    assert_eq!(bus.subscriber_count(), 0);
}

// =============================================================================
// Aggregation across independent call sites
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_concurrent_call_sites_aggregate() {
    let bus = LoadingBus::new();

    let mut tasks = Vec::new();
    for i in 0..8u64 {
        let bus = bus.clone();
        tasks.push(tokio::spawn(async move {
            let _guard = bus.guard(Duration::from_millis(500));
            tokio::time::sleep(Duration::from_millis(50 + i * 10)).await;
        }));
    }

    // Overlay stays up while any task is pending or within its window
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(bus.is_visible());

    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(bus.snapshot().active, 0);
    assert!(bus.is_visible(), "windows still open");

    tokio::time::sleep(Duration::from_millis(500)).await;
    bus.sweep_elapsed();
    assert!(!bus.is_visible());
}
