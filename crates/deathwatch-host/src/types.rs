//! Identity and world types shared between the respawn core and the host.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A unique identifier for a player.
///
/// Newtype over `u64` so a player id can never be confused with an entity
/// or world id, even though all three are plain integers underneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A unique identifier for a non-player entity (the respawn proxy, mostly).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E-{}", self.0)
    }
}

/// A unique identifier for a world / zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldId(pub u32);

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "W-{}", self.0)
    }
}

/// A position in a world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub world: WorldId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    pub fn new(world: WorldId, x: f64, y: f64, z: f64) -> Self {
        Self { world, x, y, z }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:.1}, {:.1}, {:.1})", self.world, self.x, self.y, self.z)
    }
}

/// The interaction modes a player can be in.
///
/// `Survival` is the default interactive mode; `Creative` is used as the
/// non-interactive holding mode while a player is dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Survival,
    Creative,
}

/// Status effects the respawn core applies or removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// Blacks out the screen of a dead player.
    Blindness,
    /// Hides the respawn proxy from everyone.
    Invisibility,
    /// Pins the respawn proxy in place.
    Slowness,
}

/// A concrete application of a status effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectApplication {
    pub effect: Effect,
    pub amplifier: u8,
    /// `None` means the effect never expires on its own.
    pub duration: Option<Duration>,
}

impl EffectApplication {
    /// An effect that lasts until explicitly removed.
    pub const fn permanent(effect: Effect, amplifier: u8) -> Self {
        Self {
            effect,
            amplifier,
            duration: None,
        }
    }
}

/// The kinds of rideable entity the host distinguishes for exit handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// The invisible, immobile stand-in a dead player is mounted on.
    RespawnProxy,
    /// Anything else — boats, mounts, minecarts. Exits are never blocked.
    Other,
}

/// Player input actions the host reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputAction {
    LeftClickAir,
    LeftClickBlock,
    RightClickAir,
    RightClickBlock,
}

impl InputAction {
    /// Whether this is a primary (left-click) action, the manual respawn
    /// trigger.
    pub fn is_primary(self) -> bool {
        matches!(self, Self::LeftClickAir | Self::LeftClickBlock)
    }
}

/// Why a teleport happened. A respawn teleport is neither a natural game
/// respawn nor an administrative command, so it uses `Unspecified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeleportCause {
    Unspecified,
    Natural,
    Command,
}
