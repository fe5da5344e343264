//! External override of the respawn destination.

use deathwatch_host::{Location, PlayerId};

/// A collaborator that may override where a player respawns.
///
/// Resolvers run in registration order. Each sees the destination as left
/// by the previous one; returning `None` keeps it, returning
/// `Some(location)` replaces it. `from_bed` tells the resolver whether
/// the current candidate came from the player's bed spawn.
pub trait SpawnResolver: Send + Sync {
    fn resolve(&self, player: PlayerId, candidate: Location, from_bed: bool) -> Option<Location>;
}

impl<F> SpawnResolver for F
where
    F: Fn(PlayerId, Location, bool) -> Option<Location> + Send + Sync,
{
    fn resolve(&self, player: PlayerId, candidate: Location, from_bed: bool) -> Option<Location> {
        self(player, candidate, from_bed)
    }
}
