//! Fixed-rate tick scheduler for the Deathwatch countdown updater.
//!
//! The respawn core polls its dead-player registry at a fixed real-time
//! rate, decoupled from the event bus. This crate owns that cadence.
//!
//! Missed ticks are never batched or replayed: if the loop falls behind,
//! the late tick simply runs late with current timestamps and the next
//! tick is scheduled a full period from *now*. Countdown text computed
//! from wall-clock deadlines stays correct either way, and a catch-up
//! burst would only spam the UI.
//!
//! # Integration
//!
//! ```ignore
//! let mut scheduler = TickScheduler::with_rate(10);
//! loop {
//!     scheduler.wait_for_tick().await;
//!     module.lock().tick();
//! }
//! ```

use std::time::Duration;

use rand::Rng;
use tokio::time::{self, Instant};
use tracing::{debug, trace, warn};

/// Configuration for the tick scheduler.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Tick rate in Hz. Clamped to `1..=MAX_RATE_HZ`.
    pub rate_hz: u32,
    /// Random jitter (0–max µs) added to the *first* tick so schedulers
    /// created at the same instant don't all fire together.
    pub initial_jitter_us: u64,
}

impl TickConfig {
    /// Maximum supported tick rate.
    pub const MAX_RATE_HZ: u32 = 128;

    /// Config for a given rate with default jitter.
    pub fn with_rate(rate_hz: u32) -> Self {
        Self {
            rate_hz,
            ..Self::default()
        }
    }

    /// Clamp out-of-range values so the config is safe to use.
    pub fn validated(mut self) -> Self {
        if self.rate_hz == 0 {
            warn!("rate_hz of 0 is not supported — clamping to 1");
            self.rate_hz = 1;
        }
        if self.rate_hz > Self::MAX_RATE_HZ {
            warn!(
                rate = self.rate_hz,
                max = Self::MAX_RATE_HZ,
                "rate_hz exceeds maximum — clamping"
            );
            self.rate_hz = Self::MAX_RATE_HZ;
        }
        self
    }

    /// Duration of a single tick.
    pub fn period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.rate_hz as f64)
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            rate_hz: 10,
            initial_jitter_us: 2_000, // 0–2 ms default jitter
        }
    }
}

/// Information about a tick that just fired.
#[derive(Debug, Clone, Copy)]
pub struct TickInfo {
    /// Monotonically increasing tick number (starts at 1).
    pub tick: u64,
    /// `true` if this tick fired more than a full period late.
    pub late: bool,
}

/// Fixed-rate tick scheduler.
///
/// One scheduler per countdown updater; owned by whatever starts the
/// update loop and dropped to stop it.
pub struct TickScheduler {
    config: TickConfig,
    period: Duration,
    tick_count: u64,
    next_tick: Instant,
}

impl TickScheduler {
    /// Create a scheduler from config. The first tick is scheduled with
    /// optional jitter.
    pub fn new(config: TickConfig) -> Self {
        let config = config.validated();
        let period = config.period();

        let jitter = if config.initial_jitter_us > 0 {
            Duration::from_micros(rand::rng().random_range(0..config.initial_jitter_us))
        } else {
            Duration::ZERO
        };

        debug!(
            rate_hz = config.rate_hz,
            period_ms = period.as_secs_f64() * 1000.0,
            "tick scheduler created"
        );

        Self {
            config,
            period,
            tick_count: 0,
            next_tick: Instant::now() + period + jitter,
        }
    }

    /// A scheduler for a specific rate with default settings.
    pub fn with_rate(rate_hz: u32) -> Self {
        Self::new(TickConfig::with_rate(rate_hz))
    }

    /// Wait until the next tick is due.
    ///
    /// A late wakeup is reported through [`TickInfo::late`] and the next
    /// deadline is set a full period from now — there is no catch-up.
    pub async fn wait_for_tick(&mut self) -> TickInfo {
        time::sleep_until(self.next_tick).await;

        let now = Instant::now();
        self.tick_count += 1;

        let late_by = now.saturating_duration_since(self.next_tick);
        let late = late_by > self.period;
        if late {
            warn!(
                tick = self.tick_count,
                late_ms = late_by.as_secs_f64() * 1000.0,
                "tick fired late — continuing from now"
            );
            self.next_tick = now + self.period;
        } else {
            self.next_tick += self.period;
        }

        trace!(tick = self.tick_count, late, "tick fired");

        TickInfo {
            tick: self.tick_count,
            late,
        }
    }

    /// Ticks fired so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// The configured rate in Hz.
    pub fn rate_hz(&self) -> u32 {
        self.config.rate_hz
    }

    /// The fixed tick period.
    pub fn period(&self) -> Duration {
        self.period
    }
}
