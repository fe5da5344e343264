//! Module lifecycle: event wiring and the countdown updater task.
//!
//! [`ModuleHandle::attach`] registers the module's four event handlers on
//! the bus and returns the handle that owns their subscriptions. The
//! round-start handler spawns the 10 Hz updater task (once);
//! [`ModuleHandle::unload`] cancels every subscription and aborts the
//! task, leaving no dangling timers.

use std::sync::{Arc, Mutex, MutexGuard};

use deathwatch_host::{EventBus, GameEvent, Priority, Subscription, Verdict};
use deathwatch_tick::TickScheduler;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::module::{RespawnModule, UPDATE_RATE_HZ};

/// Lock with poison recovery. Every mutation through the module is
/// single-key, so state left by a panicking handler is still consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

type UpdaterSlot = Arc<Mutex<Option<JoinHandle<()>>>>;

/// Owns a wired [`RespawnModule`]: its bus subscriptions and, after round
/// start, the updater task.
pub struct ModuleHandle {
    module: Arc<Mutex<RespawnModule>>,
    subscriptions: Vec<Subscription>,
    updater: UpdaterSlot,
}

impl ModuleHandle {
    /// Wire the module into the bus.
    ///
    /// Must be called from within a tokio runtime — the round-start
    /// handler spawns the updater task.
    ///
    /// The damage and interact handlers register at [`Priority::Early`]:
    /// the interceptor has to cancel the event before the host's default
    /// death handling, and the manual trigger has to see the click before
    /// any module that reinterprets the same input.
    pub fn attach(module: RespawnModule, bus: &mut EventBus) -> Self {
        let module = Arc::new(Mutex::new(module));
        let updater: UpdaterSlot = Arc::new(Mutex::new(None));
        let mut subscriptions = Vec::with_capacity(4);

        let m = Arc::clone(&module);
        subscriptions.push(bus.subscribe(Priority::Early, move |event| match *event {
            GameEvent::Damage {
                player,
                damage,
                health,
            } => lock(&m).on_damage(player, damage, health),
            _ => Verdict::Continue,
        }));

        let m = Arc::clone(&module);
        subscriptions.push(bus.subscribe(Priority::Early, move |event| match *event {
            GameEvent::Interact { player, action } => lock(&m).on_interact(player, action),
            _ => Verdict::Continue,
        }));

        let m = Arc::clone(&module);
        subscriptions.push(bus.subscribe(Priority::Normal, move |event| match *event {
            GameEvent::VehicleExit { rider, vehicle } => lock(&m).on_vehicle_exit(rider, vehicle),
            _ => Verdict::Continue,
        }));

        let m = Arc::clone(&module);
        let slot = Arc::clone(&updater);
        subscriptions.push(bus.subscribe(Priority::Normal, move |event| {
            if matches!(event, GameEvent::RoundStart) {
                start_updater(&m, &slot);
            }
            Verdict::Continue
        }));

        info!(subscriptions = subscriptions.len(), "respawn module attached");

        Self {
            module,
            subscriptions,
            updater,
        }
    }

    /// A handle to the module itself, for queries and resolver
    /// registration after attach.
    pub fn module(&self) -> Arc<Mutex<RespawnModule>> {
        Arc::clone(&self.module)
    }

    /// Whether the updater task has been started by a round start.
    pub fn updater_running(&self) -> bool {
        lock(&self.updater).is_some()
    }

    /// Tear down: cancel every subscription and stop the updater.
    pub fn unload(mut self, bus: &mut EventBus) {
        for subscription in self.subscriptions.drain(..) {
            bus.unsubscribe(subscription);
        }
        if let Some(task) = lock(&self.updater).take() {
            task.abort();
        }
        info!("respawn module unloaded");
    }
}

/// Spawn the 10 Hz updater task into `slot`, unless one is already
/// running (a second round start is ignored).
fn start_updater(module: &Arc<Mutex<RespawnModule>>, slot: &UpdaterSlot) {
    let mut slot = lock(slot);
    if slot.is_some() {
        debug!("updater already running — ignoring round start");
        return;
    }
    let module = Arc::clone(module);
    *slot = Some(tokio::spawn(async move {
        let mut scheduler = TickScheduler::with_rate(UPDATE_RATE_HZ);
        loop {
            scheduler.wait_for_tick().await;
            lock(&module).tick();
        }
    }));
    info!(rate_hz = UPDATE_RATE_HZ, "respawn updater started");
}
