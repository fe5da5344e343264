//! Configuration: the raw external surface and the immutable [`Settings`]
//! the module runs on.

use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

/// The shortest countdown the module will run. Shorter configured delays
/// are floored, not rejected.
pub const MIN_DELAY: Duration = Duration::from_secs(1);

/// Raw configuration as it arrives from a level / match definition.
///
/// Every field has a default, so a partial (or empty) document is valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RespawnConfig {
    /// Countdown duration as a string: `"500ms"`, `"2s"`, `"1m"`.
    pub delay: String,
    /// Respawn automatically at the deadline instead of waiting for input.
    pub auto: bool,
    /// Black out the screen while dead.
    pub blackout: bool,
    /// Leave the dead player in open spectator-like state instead of
    /// mounting them on the hiding proxy.
    pub spectate: bool,
    /// Prefer the player's bed / checkpoint spawn when one is set.
    pub bed: bool,
}

impl Default for RespawnConfig {
    fn default() -> Self {
        Self {
            delay: "2s".to_string(),
            auto: false,
            blackout: false,
            spectate: false,
            bed: false,
        }
    }
}

/// Errors from turning a [`RespawnConfig`] into [`Settings`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The delay string could not be parsed.
    #[error("invalid delay {0:?}: expected a duration like \"500ms\", \"2s\" or \"1m\"")]
    InvalidDelay(String),
}

/// Immutable policy for the respawn module. Fixed at construction.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Countdown duration, already floored to [`MIN_DELAY`].
    pub delay: Duration,
    /// Automatic vs. manual respawn at the deadline.
    pub auto: bool,
    /// Apply blindness while dead.
    pub blackout: bool,
    /// Mount the dead player on the invisible immobilizing proxy.
    /// Inverse of the `spectate` config flag.
    pub hide_via_proxy: bool,
    /// Use the bed spawn when the player has one.
    pub prefer_bed: bool,
}

impl Settings {
    /// Build settings from raw config, parsing and flooring the delay.
    pub fn from_config(config: &RespawnConfig) -> Result<Self, ConfigError> {
        let parsed = parse_duration(&config.delay)
            .ok_or_else(|| ConfigError::InvalidDelay(config.delay.clone()))?;
        let delay = if parsed < MIN_DELAY {
            warn!(configured = %config.delay, "delay below 1s — flooring");
            MIN_DELAY
        } else {
            parsed
        };
        Ok(Self {
            delay,
            auto: config.auto,
            blackout: config.blackout,
            hide_via_proxy: !config.spectate,
            prefer_bed: config.bed,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(2),
            auto: false,
            blackout: false,
            hide_via_proxy: true,
            prefer_bed: false,
        }
    }
}

/// Parse `"500ms"`, `"2s"`, `"1.5m"` style duration strings.
fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    let split = s.find(|c: char| !c.is_ascii_digit() && c != '.')?;
    let (number, unit) = s.split_at(split);
    let value: f64 = number.parse().ok()?;
    let seconds = match unit {
        "ms" => value / 1000.0,
        "s" => value,
        "m" => value * 60.0,
        _ => return None,
    };
    // Rejects negatives, non-finite values, and anything beyond what a
    // Duration can represent — config is external input.
    Duration::try_from_secs_f64(seconds).ok()
}
