//! Host abstraction layer for Deathwatch.
//!
//! The respawn core never talks to a concrete game server. Everything it
//! needs from the host — player queries, chat, titles, visibility, entity
//! spawning, teleports — goes through the [`Host`] trait, and every
//! notification it consumes arrives through the [`EventBus`].
//!
//! # Key types
//!
//! - [`Host`] — the opaque services a game server must provide
//! - [`EventBus`] / [`Subscription`] — explicit, cancellable event wiring
//! - [`GameEvent`] — the notifications the respawn core consumes
//! - [`Message`] — the localized-text seam (hosts may re-render)

mod api;
mod error;
mod events;
mod message;
mod types;

pub use api::Host;
pub use error::HostError;
pub use events::{Dispatch, EventBus, GameEvent, Priority, Subscription, Verdict};
pub use message::Message;
pub use types::{
    Effect, EffectApplication, EntityId, EntityKind, GameMode, InputAction, Location, PlayerId,
    TeleportCause, WorldId,
};
