//! The dead-player registry: who is dead, and until when.

use std::collections::HashMap;

use deathwatch_host::{EntityId, PlayerId};
use tokio::time::Instant;

/// Registry record for one dead player.
#[derive(Debug, Clone, Copy)]
pub struct DeadEntry {
    /// When the player becomes eligible to respawn. Fixed at creation.
    pub deadline: Instant,
    /// The immobilizing proxy the player rides, once spawned. Tracked so
    /// it can be despawned at respawn or disconnect.
    pub proxy: Option<EntityId>,
}

/// Mapping from player to respawn deadline — the sole mutable state of
/// the respawn core.
///
/// Invariant: a player is present here if and only if they are currently
/// Dead; absence means Alive. Entries are created only by the death
/// interceptor and removed only by the respawn executor or disconnect
/// cleanup.
#[derive(Debug, Default)]
pub struct DeadPlayerRegistry {
    entries: HashMap<PlayerId, DeadEntry>,
}

impl DeadPlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player as dead until `deadline`. Returns `true` if an
    /// entry already existed and was overwritten.
    pub fn register(&mut self, player: PlayerId, deadline: Instant) -> bool {
        self.entries
            .insert(
                player,
                DeadEntry {
                    deadline,
                    proxy: None,
                },
            )
            .is_some()
    }

    /// Record the proxy entity a dead player was mounted on. Returns
    /// `false` if the player is not registered.
    pub fn attach_proxy(&mut self, player: PlayerId, proxy: EntityId) -> bool {
        match self.entries.get_mut(&player) {
            Some(entry) => {
                entry.proxy = Some(proxy);
                true
            }
            None => false,
        }
    }

    /// The respawn deadline for a player, if they are dead.
    pub fn deadline(&self, player: PlayerId) -> Option<Instant> {
        self.entries.get(&player).map(|e| e.deadline)
    }

    /// Whether the player is currently registered as dead.
    pub fn contains(&self, player: PlayerId) -> bool {
        self.entries.contains_key(&player)
    }

    /// Remove and return a player's entry. `None` means the player was
    /// already Alive.
    pub fn remove(&mut self, player: PlayerId) -> Option<DeadEntry> {
        self.entries.remove(&player)
    }

    /// Snapshot of every dead player, so callers can iterate while
    /// entries disappear underneath them.
    pub fn players(&self) -> Vec<PlayerId> {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn pid(id: u64) -> PlayerId {
        PlayerId(id)
    }

    #[test]
    fn test_register_and_query() {
        let mut reg = DeadPlayerRegistry::new();
        let deadline = Instant::now() + Duration::from_secs(2);

        assert!(!reg.register(pid(1), deadline));
        assert!(reg.contains(pid(1)));
        assert_eq!(reg.deadline(pid(1)), Some(deadline));
        assert!(!reg.contains(pid(2)));
        assert_eq!(reg.deadline(pid(2)), None);
    }

    #[test]
    fn test_register_overwrites_existing_entry() {
        let mut reg = DeadPlayerRegistry::new();
        let first = Instant::now() + Duration::from_secs(1);
        let second = first + Duration::from_secs(5);

        reg.register(pid(1), first);
        assert!(reg.register(pid(1), second));
        assert_eq!(reg.deadline(pid(1)), Some(second));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_remove_returns_entry_once() {
        let mut reg = DeadPlayerRegistry::new();
        reg.register(pid(1), Instant::now());
        reg.attach_proxy(pid(1), EntityId(9));

        let entry = reg.remove(pid(1)).unwrap();
        assert_eq!(entry.proxy, Some(EntityId(9)));
        assert!(reg.remove(pid(1)).is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_attach_proxy_requires_registration() {
        let mut reg = DeadPlayerRegistry::new();
        assert!(!reg.attach_proxy(pid(1), EntityId(1)));

        reg.register(pid(1), Instant::now());
        assert!(reg.attach_proxy(pid(1), EntityId(1)));
    }

    #[test]
    fn test_overwrite_clears_stale_proxy() {
        let mut reg = DeadPlayerRegistry::new();
        reg.register(pid(1), Instant::now());
        reg.attach_proxy(pid(1), EntityId(4));

        reg.register(pid(1), Instant::now());
        assert_eq!(reg.remove(pid(1)).unwrap().proxy, None);
    }

    #[test]
    fn test_players_snapshot() {
        let mut reg = DeadPlayerRegistry::new();
        let now = Instant::now();
        reg.register(pid(1), now);
        reg.register(pid(2), now);

        let mut players = reg.players();
        players.sort_by_key(|p| p.0);
        assert_eq!(players, vec![pid(1), pid(2)]);
    }
}
