//! Explicit-subscription event bus.
//!
//! Handlers are registered with a priority band and get back a
//! [`Subscription`] token; cancelling the token at teardown removes the
//! handler. This keeps the wiring deterministic and inspectable — there is
//! no reflective handler discovery, and a unit test can drive a module
//! through a bare `EventBus` with no host runtime at all.

use crate::types::{EntityKind, InputAction, PlayerId};

/// A notification dispatched through the bus.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A player took damage. `health` is the pre-damage value.
    Damage {
        player: PlayerId,
        damage: f64,
        health: f64,
    },
    /// A player performed an input action.
    Interact {
        player: PlayerId,
        action: InputAction,
    },
    /// A rider is trying to leave a vehicle.
    VehicleExit {
        rider: PlayerId,
        vehicle: EntityKind,
    },
    /// The match / round has begun.
    RoundStart,
}

/// What a handler wants done with the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Let default handling proceed.
    Continue,
    /// Suppress default handling. Later handlers still run and can
    /// observe nothing — cancellation is a flag on the dispatch result,
    /// not a short-circuit.
    Cancel,
}

/// The outcome of dispatching one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// `true` if any handler returned [`Verdict::Cancel`]. The host must
    /// honor this by skipping its default handling of the event.
    pub cancelled: bool,
}

/// Dispatch ordering. `Early` handlers run before `Normal`, `Normal`
/// before `Late`; within a band, registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Early,
    Normal,
    Late,
}

/// Token returned by [`EventBus::subscribe`]. Pass it back to
/// [`EventBus::unsubscribe`] to remove the handler.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    id: u64,
}

impl Subscription {
    /// The bus-unique id of this subscription.
    pub fn id(&self) -> u64 {
        self.id
    }
}

struct Entry {
    id: u64,
    priority: Priority,
    handler: Box<dyn FnMut(&GameEvent) -> Verdict + Send>,
}

/// An in-process event bus with explicit, cancellable subscriptions.
#[derive(Default)]
pub struct EventBus {
    /// Kept sorted by `(priority, id)` so dispatch is a plain scan.
    entries: Vec<Entry>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler and return its subscription token.
    pub fn subscribe<F>(&mut self, priority: Priority, handler: F) -> Subscription
    where
        F: FnMut(&GameEvent) -> Verdict + Send + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        let entry = Entry {
            id,
            priority,
            handler: Box::new(handler),
        };
        let at = self
            .entries
            .partition_point(|e| (e.priority, e.id) <= (priority, id));
        self.entries.insert(at, entry);
        Subscription { id }
    }

    /// Remove a handler. Returns `false` if the token was already
    /// cancelled.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != subscription.id);
        self.entries.len() != before
    }

    /// Dispatch an event to every handler in priority order.
    pub fn dispatch(&mut self, event: &GameEvent) -> Dispatch {
        let mut cancelled = false;
        for entry in &mut self.entries {
            if (entry.handler)(event) == Verdict::Cancel {
                cancelled = true;
            }
        }
        Dispatch { cancelled }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn test_dispatch_runs_in_priority_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();

        let o = Arc::clone(&order);
        bus.subscribe(Priority::Late, move |_| {
            o.lock().unwrap().push("late");
            Verdict::Continue
        });
        let o = Arc::clone(&order);
        bus.subscribe(Priority::Early, move |_| {
            o.lock().unwrap().push("early");
            Verdict::Continue
        });
        let o = Arc::clone(&order);
        bus.subscribe(Priority::Normal, move |_| {
            o.lock().unwrap().push("normal");
            Verdict::Continue
        });

        bus.dispatch(&GameEvent::RoundStart);
        assert_eq!(*order.lock().unwrap(), vec!["early", "normal", "late"]);
    }

    #[test]
    fn test_cancel_flags_dispatch_without_short_circuit() {
        let ran = Arc::new(Mutex::new(0u32));
        let mut bus = EventBus::new();

        bus.subscribe(Priority::Early, |_| Verdict::Cancel);
        let r = Arc::clone(&ran);
        bus.subscribe(Priority::Late, move |_| {
            *r.lock().unwrap() += 1;
            Verdict::Continue
        });

        let result = bus.dispatch(&GameEvent::RoundStart);
        assert!(result.cancelled);
        assert_eq!(*ran.lock().unwrap(), 1);
    }

    #[test]
    fn test_unsubscribe_removes_handler() {
        let mut bus = EventBus::new();
        let sub = bus.subscribe(Priority::Normal, |_| Verdict::Cancel);
        assert_eq!(bus.subscriber_count(), 1);

        assert!(bus.unsubscribe(sub));
        assert_eq!(bus.subscriber_count(), 0);
        assert!(!bus.dispatch(&GameEvent::RoundStart).cancelled);
    }

    #[test]
    fn test_same_priority_keeps_registration_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        for name in ["a", "b", "c"] {
            let o = Arc::clone(&order);
            bus.subscribe(Priority::Normal, move |_| {
                o.lock().unwrap().push(name);
                Verdict::Continue
            });
        }
        bus.dispatch(&GameEvent::RoundStart);
        assert_eq!(*order.lock().unwrap(), vec!["a", "b", "c"]);
    }
}
