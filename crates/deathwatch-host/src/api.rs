//! The `Host` trait — every service the respawn core needs from the game
//! server it runs inside.

use crate::error::HostError;
use crate::message::Message;
use crate::types::{
    Effect, EffectApplication, EntityId, GameMode, Location, PlayerId, TeleportCause,
};

/// The opaque services a game server provides to the respawn core.
///
/// All methods take `&self`; implementations are expected to use interior
/// mutability (a real host fronts its own entity storage, test doubles
/// record calls). Player-state methods are infallible by contract — a host
/// that cannot apply them to an offline player simply drops the request.
/// The entity and teleport surface is fallible and callers must treat a
/// failure as a recoverable, loggable skip.
pub trait Host: Send + Sync {
    // --- connection / world queries ---

    /// Whether the player is currently connected.
    fn is_connected(&self, player: PlayerId) -> bool;

    /// Snapshot of every connected player.
    fn online_players(&self) -> Vec<PlayerId>;

    /// The player's display name, for chat broadcasts.
    fn display_name(&self, player: PlayerId) -> String;

    /// The player's current position, if connected.
    fn player_location(&self, player: PlayerId) -> Option<Location>;

    /// The default spawn of the player's current world.
    fn world_spawn(&self, player: PlayerId) -> Location;

    /// The player's bed / checkpoint spawn, if one is set.
    fn bed_spawn(&self, player: PlayerId) -> Option<Location>;

    // --- chat and titles ---

    /// Broadcast a message to every connected player.
    fn broadcast(&self, msg: Message);

    /// Show a message on the player's title line.
    fn show_title(&self, player: PlayerId, msg: Message);

    /// Show a message on the player's subtitle line.
    fn set_subtitle(&self, player: PlayerId, msg: Message);

    /// Clear both title and subtitle.
    fn clear_title(&self, player: PlayerId);

    // --- player state ---

    fn set_game_mode(&self, player: PlayerId, mode: GameMode);

    /// Reset inventory, experience, and transient effects to a clean slate.
    fn reset_player(&self, player: PlayerId);

    fn apply_effect(&self, player: PlayerId, application: EffectApplication);

    /// Remove an effect. Idempotent: removing an absent effect is a no-op.
    fn remove_effect(&self, player: PlayerId, effect: Effect);

    // --- per-observer-pair visibility ---

    /// Stop `viewer` from seeing `target`.
    fn hide_player(&self, viewer: PlayerId, target: PlayerId);

    /// Let `viewer` see `target` again.
    fn show_player(&self, viewer: PlayerId, target: PlayerId);

    // --- entities and movement (fallible) ---

    /// Spawn an immobilizing proxy entity at `at` and return its id.
    fn spawn_proxy(&self, at: Location) -> Result<EntityId, HostError>;

    fn apply_entity_effect(
        &self,
        entity: EntityId,
        application: EffectApplication,
    ) -> Result<(), HostError>;

    /// Mount `rider` on `vehicle`.
    fn mount(&self, rider: PlayerId, vehicle: EntityId) -> Result<(), HostError>;

    /// Despawn an entity.
    fn remove_entity(&self, entity: EntityId) -> Result<(), HostError>;

    fn teleport(
        &self,
        player: PlayerId,
        to: Location,
        cause: TeleportCause,
    ) -> Result<(), HostError>;
}
