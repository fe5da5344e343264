//! Skirmish: a minimal in-memory host running the Deathwatch module.
//!
//! Two players are online. One takes a lethal hit, rides the countdown
//! down, and respawns on a click. Run with `RUST_LOG=debug` to watch the
//! module's own tracing output alongside the console host.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use deathwatch::{ModuleHandle, RespawnConfig, RespawnModule, Settings};
use deathwatch_host::{
    Effect, EffectApplication, EntityId, EventBus, GameEvent, GameMode, Host, HostError,
    InputAction, Location, Message, PlayerId, TeleportCause, WorldId,
};
use tracing_subscriber::EnvFilter;

const WORLD: WorldId = WorldId(0);

/// A console host: every request the module makes is printed.
struct ConsoleHost {
    online: Vec<PlayerId>,
    names: HashMap<PlayerId, &'static str>,
    next_entity: Mutex<u64>,
}

impl ConsoleHost {
    fn new() -> Arc<Self> {
        let names = HashMap::from([(PlayerId(1), "Astrid"), (PlayerId(2), "Bjorn")]);
        Arc::new(Self {
            online: names.keys().copied().collect(),
            names,
            next_entity: Mutex::new(100),
        })
    }
}

impl Host for ConsoleHost {
    fn is_connected(&self, player: PlayerId) -> bool {
        self.online.contains(&player)
    }

    fn online_players(&self) -> Vec<PlayerId> {
        self.online.clone()
    }

    fn display_name(&self, player: PlayerId) -> String {
        self.names.get(&player).copied().unwrap_or("?").to_string()
    }

    fn player_location(&self, _player: PlayerId) -> Option<Location> {
        Some(Location::new(WORLD, 12.0, 64.0, -3.0))
    }

    fn world_spawn(&self, _player: PlayerId) -> Location {
        Location::new(WORLD, 0.0, 70.0, 0.0)
    }

    fn bed_spawn(&self, _player: PlayerId) -> Option<Location> {
        None
    }

    fn broadcast(&self, msg: Message) {
        println!("[chat] {msg}");
    }

    fn show_title(&self, player: PlayerId, msg: Message) {
        println!("[title -> {}] {msg}", self.display_name(player));
    }

    fn set_subtitle(&self, player: PlayerId, msg: Message) {
        println!("[subtitle -> {}] {msg}", self.display_name(player));
    }

    fn clear_title(&self, player: PlayerId) {
        println!("[title -> {}] (cleared)", self.display_name(player));
    }

    fn set_game_mode(&self, player: PlayerId, mode: GameMode) {
        println!("[mode] {} -> {mode:?}", self.display_name(player));
    }

    fn reset_player(&self, player: PlayerId) {
        println!("[reset] {}", self.display_name(player));
    }

    fn apply_effect(&self, player: PlayerId, application: EffectApplication) {
        println!(
            "[effect] {} +{:?} x{}",
            self.display_name(player),
            application.effect,
            application.amplifier
        );
    }

    fn remove_effect(&self, player: PlayerId, effect: Effect) {
        println!("[effect] {} -{effect:?}", self.display_name(player));
    }

    fn hide_player(&self, viewer: PlayerId, target: PlayerId) {
        println!(
            "[visibility] {} no longer sees {}",
            self.display_name(viewer),
            self.display_name(target)
        );
    }

    fn show_player(&self, viewer: PlayerId, target: PlayerId) {
        println!(
            "[visibility] {} sees {} again",
            self.display_name(viewer),
            self.display_name(target)
        );
    }

    fn spawn_proxy(&self, at: Location) -> Result<EntityId, HostError> {
        let mut next = self.next_entity.lock().unwrap_or_else(|p| p.into_inner());
        let id = EntityId(*next);
        *next += 1;
        println!("[entity] proxy {id} spawned at {at}");
        Ok(id)
    }

    fn apply_entity_effect(
        &self,
        entity: EntityId,
        application: EffectApplication,
    ) -> Result<(), HostError> {
        println!("[entity] {entity} +{:?}", application.effect);
        Ok(())
    }

    fn mount(&self, rider: PlayerId, vehicle: EntityId) -> Result<(), HostError> {
        println!("[entity] {} mounted on {vehicle}", self.display_name(rider));
        Ok(())
    }

    fn remove_entity(&self, entity: EntityId) -> Result<(), HostError> {
        println!("[entity] {entity} despawned");
        Ok(())
    }

    fn teleport(
        &self,
        player: PlayerId,
        to: Location,
        _cause: TeleportCause,
    ) -> Result<(), HostError> {
        println!("[teleport] {} -> {to}", self.display_name(player));
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // The kind of document a match definition would carry.
    let config: RespawnConfig =
        serde_json::from_str(r#"{ "delay": "3s", "auto": false, "blackout": true }"#)
            .expect("config parses");
    let settings = Settings::from_config(&config).expect("config is valid");

    let host = ConsoleHost::new();
    let mut module = RespawnModule::new(settings, host.clone());
    module.add_resolver(|_player: PlayerId, candidate: Location, _from_bed: bool| {
        // A stand-in for another module nudging the respawn point.
        Some(Location::new(candidate.world, candidate.x + 1.0, candidate.y, candidate.z))
    });

    let mut bus = EventBus::new();
    let handle = ModuleHandle::attach(module, &mut bus);

    println!("-- round starts --");
    bus.dispatch(&GameEvent::RoundStart);

    println!("-- Astrid takes a lethal hit --");
    let dispatch = bus.dispatch(&GameEvent::Damage {
        player: PlayerId(1),
        damage: 12.0,
        health: 8.0,
    });
    assert!(dispatch.cancelled, "host default death handling is suppressed");

    // Impatient click halfway through the countdown: ignored.
    tokio::time::sleep(Duration::from_millis(1500)).await;
    println!("-- Astrid clicks too early --");
    bus.dispatch(&GameEvent::Interact {
        player: PlayerId(1),
        action: InputAction::LeftClickAir,
    });

    // Click after the deadline: respawn.
    tokio::time::sleep(Duration::from_millis(1800)).await;
    println!("-- Astrid clicks again --");
    bus.dispatch(&GameEvent::Interact {
        player: PlayerId(1),
        action: InputAction::LeftClickAir,
    });

    handle.unload(&mut bus);
    println!("-- module unloaded --");
}
