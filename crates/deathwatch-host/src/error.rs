//! Error types for fallible host operations.

use crate::types::{EntityId, PlayerId, WorldId};

/// Errors a host may report for entity and teleport operations.
///
/// None of these are fatal to the respawn core — callers log a warning
/// and skip the side effect.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The player is no longer connected.
    #[error("player {0} is offline")]
    PlayerOffline(PlayerId),

    /// The entity no longer exists.
    #[error("entity {0} not found")]
    EntityMissing(EntityId),

    /// The world is not loaded.
    #[error("world {0} not loaded")]
    WorldMissing(WorldId),

    /// Anything else the host wants to surface.
    #[error("host operation failed: {0}")]
    Other(String),
}
