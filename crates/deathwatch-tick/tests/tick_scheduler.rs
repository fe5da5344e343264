//! Tests for the fixed-rate tick scheduler.
//!
//! Uses `tokio::time::pause()` (via `start_paused`) so `sleep_until`
//! resolves deterministically as the test advances the clock.

use std::time::Duration;

use deathwatch_tick::{TickConfig, TickScheduler};

fn config_10hz() -> TickConfig {
    TickConfig {
        rate_hz: 10,
        initial_jitter_us: 0,
    }
}

// =========================================================================
// TickConfig
// =========================================================================

#[test]
fn test_default_config_is_10hz() {
    let cfg = TickConfig::default();
    assert_eq!(cfg.rate_hz, 10);
    assert_eq!(cfg.period(), Duration::from_millis(100));
}

#[test]
fn test_validated_clamps_zero_rate() {
    let cfg = TickConfig {
        rate_hz: 0,
        initial_jitter_us: 0,
    }
    .validated();
    assert_eq!(cfg.rate_hz, 1);
}

#[test]
fn test_validated_clamps_excessive_rate() {
    let cfg = TickConfig {
        rate_hz: 10_000,
        initial_jitter_us: 0,
    }
    .validated();
    assert_eq!(cfg.rate_hz, TickConfig::MAX_RATE_HZ);
}

#[test]
fn test_period_20hz() {
    assert_eq!(TickConfig::with_rate(20).period(), Duration::from_millis(50));
}

// =========================================================================
// Scheduler
// =========================================================================

#[test]
fn test_scheduler_initial_state() {
    let s = TickScheduler::new(config_10hz());
    assert_eq!(s.tick_count(), 0);
    assert_eq!(s.rate_hz(), 10);
    assert_eq!(s.period(), Duration::from_millis(100));
}

#[tokio::test(start_paused = true)]
async fn test_ticks_fire_at_fixed_period() {
    let mut s = TickScheduler::new(config_10hz());

    let info = s.wait_for_tick().await;
    assert_eq!(info.tick, 1);
    assert!(!info.late);

    let info = s.wait_for_tick().await;
    assert_eq!(info.tick, 2);
    assert!(!info.late);
    assert_eq!(s.tick_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_late_tick_runs_late_without_catch_up() {
    let mut s = TickScheduler::new(config_10hz());
    s.wait_for_tick().await;

    // Simulate the loop stalling for half a second.
    tokio::time::advance(Duration::from_millis(500)).await;

    let info = s.wait_for_tick().await;
    assert_eq!(info.tick, 2);
    assert!(info.late);

    // The missed ticks are gone, not replayed: the next tick is a full
    // period out, so only one more fires in the next 100 ms.
    let info = s.wait_for_tick().await;
    assert_eq!(info.tick, 3);
    assert!(!info.late);
}

#[tokio::test(start_paused = true)]
async fn test_tick_numbers_are_monotonic() {
    let mut s = TickScheduler::with_rate(20);
    let mut last = 0;
    for _ in 0..5 {
        let info = s.wait_for_tick().await;
        assert_eq!(info.tick, last + 1);
        last = info.tick;
    }
}
