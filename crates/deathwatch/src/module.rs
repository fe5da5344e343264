//! The death/respawn state machine.
//!
//! One `RespawnModule` per match. Entry points:
//!
//! - [`on_damage`](RespawnModule::on_damage) — intercepts lethal hits
//! - [`tick`](RespawnModule::tick) — the 10 Hz countdown updater
//! - [`on_interact`](RespawnModule::on_interact) — the manual trigger
//! - [`on_vehicle_exit`](RespawnModule::on_vehicle_exit) — proxy guard
//! - [`respawn`](RespawnModule::respawn) — the single Alive transition
//!
//! Both respawn-initiation paths (the updater's deadline check and the
//! manual trigger) converge on [`respawn`](RespawnModule::respawn), which
//! claims the registry entry before any side effect so a concurrent
//! caller sees a plain no-op.

use std::sync::Arc;

use deathwatch_host::{
    Effect, EffectApplication, EntityId, EntityKind, GameMode, Host, InputAction, Message,
    PlayerId, TeleportCause, Verdict,
};
use tokio::time::Instant;
use tracing::{debug, info, trace, warn};

use crate::config::Settings;
use crate::registry::DeadPlayerRegistry;
use crate::resolver::SpawnResolver;

/// How often the countdown updater runs.
pub const UPDATE_RATE_HZ: u32 = 10;

/// Effects applied to the respawn proxy: invisible to everyone, and
/// slowed hard enough that it never moves.
pub const PROXY_EFFECTS: [EffectApplication; 2] = [
    EffectApplication::permanent(Effect::Invisibility, 1),
    EffectApplication::permanent(Effect::Slowness, 10),
];

/// The death/respawn state machine for one match.
pub struct RespawnModule {
    settings: Settings,
    registry: DeadPlayerRegistry,
    host: Arc<dyn Host>,
    resolvers: Vec<Box<dyn SpawnResolver>>,
}

impl RespawnModule {
    pub fn new(settings: Settings, host: Arc<dyn Host>) -> Self {
        Self {
            settings,
            registry: DeadPlayerRegistry::new(),
            host,
            resolvers: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Register a collaborator that may override respawn destinations.
    pub fn add_resolver(&mut self, resolver: impl SpawnResolver + 'static) {
        self.resolvers.push(Box::new(resolver));
    }

    /// Whether the player is currently Dead.
    pub fn is_dead(&self, player: PlayerId) -> bool {
        self.registry.contains(player)
    }

    /// Number of currently dead players.
    pub fn dead_count(&self) -> usize {
        self.registry.len()
    }

    /// The player's respawn deadline, if they are dead.
    pub fn deadline(&self, player: PlayerId) -> Option<Instant> {
        self.registry.deadline(player)
    }

    /// Whether the player is dead *and* their deadline has passed.
    ///
    /// A lookup miss means "not eligible" — an Alive player has nothing
    /// to respawn from.
    pub fn can_respawn(&self, player: PlayerId) -> bool {
        match self.registry.deadline(player) {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    /// Death interceptor. Returns [`Verdict::Cancel`] for a lethal hit,
    /// which the host must honor by skipping its own death handling;
    /// non-lethal damage passes through untouched.
    pub fn on_damage(&mut self, player: PlayerId, damage: f64, health: f64) -> Verdict {
        if health - damage > 0.0 {
            return Verdict::Continue;
        }

        let deadline = Instant::now() + self.settings.delay;
        if self.registry.register(player, deadline) {
            // Should be unreachable while default death handling stays
            // suppressed; keep the fresh deadline if it happens anyway.
            warn!(%player, "lethal damage for an already-dead player — overwriting deadline");
        }
        info!(
            %player,
            damage,
            health,
            delay_s = self.settings.delay.as_secs_f64(),
            "player died — countdown started"
        );

        // The host's own death message never fires once the event is
        // cancelled, so broadcast the replacement here.
        self.host.broadcast(Message::DeathBroadcast {
            name: self.host.display_name(player),
        });

        self.host.reset_player(player);
        self.host.set_game_mode(player, GameMode::Creative);

        if self.settings.blackout {
            self.host
                .apply_effect(player, EffectApplication::permanent(Effect::Blindness, 1));
        }
        if self.settings.hide_via_proxy {
            self.mount_proxy(player);
        }

        for other in self.host.online_players() {
            if other != player {
                self.host.hide_player(other, player);
            }
        }

        // Title line only — the subtitle belongs to the countdown updater.
        self.host.show_title(player, Message::Died);

        Verdict::Cancel
    }

    /// Spawn the invisible immobile proxy at the death location and mount
    /// the player on it. Host failures downgrade to a warning; the player
    /// just stays unmounted.
    fn mount_proxy(&mut self, player: PlayerId) {
        let Some(at) = self.host.player_location(player) else {
            warn!(%player, "no death location available — skipping proxy mount");
            return;
        };
        let proxy = match self.host.spawn_proxy(at) {
            Ok(proxy) => proxy,
            Err(error) => {
                warn!(%player, %error, "failed to spawn respawn proxy");
                return;
            }
        };
        for application in PROXY_EFFECTS {
            if let Err(error) = self.host.apply_entity_effect(proxy, application) {
                warn!(%player, %proxy, %error, "failed to apply proxy effect");
            }
        }
        if let Err(error) = self.host.mount(player, proxy) {
            warn!(%player, %proxy, %error, "failed to mount player on proxy");
        }
        self.registry.attach_proxy(player, proxy);
        debug!(%player, %proxy, "player mounted on respawn proxy");
    }

    /// Countdown updater, invoked at [`UPDATE_RATE_HZ`] once the round
    /// has started. For each dead player: drop disconnected entries,
    /// execute due automatic respawns, or refresh the subtitle.
    pub fn tick(&mut self) {
        let now = Instant::now();
        for player in self.registry.players() {
            // Entries may vanish mid-iteration (manual respawn between
            // snapshot and here); a missing deadline is just "skip".
            let Some(deadline) = self.registry.deadline(player) else {
                continue;
            };

            if !self.host.is_connected(player) {
                if let Some(entry) = self.registry.remove(player) {
                    debug!(%player, "dead player disconnected — dropping entry");
                    self.despawn_proxy(player, entry.proxy);
                }
            } else if now >= deadline {
                if self.settings.auto {
                    self.respawn(player);
                } else {
                    self.host.set_subtitle(player, Message::RespawnClick);
                }
            } else {
                let remaining = (deadline - now).as_secs_f64();
                let msg = if self.settings.auto {
                    Message::RespawnAuto { remaining }
                } else {
                    Message::RespawnSchedule { remaining }
                };
                trace!(%player, remaining, "countdown update");
                self.host.set_subtitle(player, msg);
            }
        }
    }

    /// Manual respawn trigger. Never consumes the input — other modules
    /// still see the click.
    pub fn on_interact(&mut self, player: PlayerId, action: InputAction) -> Verdict {
        if action.is_primary()
            && !self.settings.auto
            && self.is_dead(player)
            && self.can_respawn(player)
        {
            self.respawn(player);
        }
        Verdict::Continue
    }

    /// Proxy guard: deny leaving the respawn proxy while dead. Exits from
    /// anything else, or by Alive players, pass through.
    pub fn on_vehicle_exit(&self, rider: PlayerId, vehicle: EntityKind) -> Verdict {
        if vehicle == EntityKind::RespawnProxy && self.is_dead(rider) {
            trace!(%rider, "denying proxy exit while dead");
            Verdict::Cancel
        } else {
            Verdict::Continue
        }
    }

    /// The single Alive transition, shared by the updater and the manual
    /// trigger.
    ///
    /// Claims the registry entry before any side effect: a second call —
    /// or a concurrent tick — finds no entry and does nothing, so the
    /// teleport and visibility restore can never run twice.
    pub fn respawn(&mut self, player: PlayerId) {
        let Some(entry) = self.registry.remove(player) else {
            return;
        };
        self.despawn_proxy(player, entry.proxy);

        // Bed spawn when configured and set, default world spawn otherwise.
        let (candidate, from_bed) = match self.settings.prefer_bed {
            true => match self.host.bed_spawn(player) {
                Some(bed) => (bed, true),
                None => (self.host.world_spawn(player), false),
            },
            false => (self.host.world_spawn(player), false),
        };
        let mut destination = candidate;
        for resolver in &self.resolvers {
            if let Some(overridden) = resolver.resolve(player, destination, from_bed) {
                destination = overridden;
            }
        }

        self.host.remove_effect(player, Effect::Blindness);
        self.host.set_game_mode(player, GameMode::Survival);
        self.host.clear_title(player);

        // Not a natural game respawn and not an administrative teleport.
        if let Err(error) = self
            .host
            .teleport(player, destination, TeleportCause::Unspecified)
        {
            warn!(%player, %error, "respawn teleport failed");
        }

        for other in self.host.online_players() {
            if other != player {
                self.host.show_player(other, player);
            }
        }

        info!(%player, %destination, from_bed, "player respawned");
    }

    fn despawn_proxy(&self, player: PlayerId, proxy: Option<EntityId>) {
        if let Some(proxy) = proxy {
            if let Err(error) = self.host.remove_entity(proxy) {
                warn!(%player, %proxy, %error, "failed to despawn respawn proxy");
            }
        }
    }
}
