//! The localized-text seam between the respawn core and the host.
//!
//! The core decides *which* message a player sees and with what numbers;
//! the host decides the final wording. The `Display` impl provides the
//! English defaults; a localizing host matches on the variant instead.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A message the respawn core asks the host to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    /// Death title, shown once on the title line.
    Died,
    /// Subtitle: the deadline has passed and a click is needed.
    RespawnClick,
    /// Subtitle: counting down to an automatic respawn.
    RespawnAuto { remaining: f64 },
    /// Subtitle: counting down until a manual respawn becomes possible.
    RespawnSchedule { remaining: f64 },
    /// Chat broadcast replacing the host's own death message.
    DeathBroadcast { name: String },
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Died => write!(f, "You died!"),
            Self::RespawnClick => write!(f, "Click to respawn"),
            Self::RespawnAuto { remaining } => {
                write!(f, "Respawning in {remaining:.1}s")
            }
            Self::RespawnSchedule { remaining } => {
                write!(f, "Click to respawn in {remaining:.1}s")
            }
            Self::DeathBroadcast { name } => write!(f, "{name} died"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_renders_one_decimal() {
        let msg = Message::RespawnAuto { remaining: 1.2345 };
        assert_eq!(msg.to_string(), "Respawning in 1.2s");
        let msg = Message::RespawnSchedule { remaining: 0.96 };
        assert_eq!(msg.to_string(), "Click to respawn in 1.0s");
    }

    #[test]
    fn test_broadcast_includes_name() {
        let msg = Message::DeathBroadcast {
            name: "Steve".into(),
        };
        assert_eq!(msg.to_string(), "Steve died");
    }
}
