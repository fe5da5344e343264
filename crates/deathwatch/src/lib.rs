//! # Deathwatch
//!
//! Replaces a game server's "die instantly, respawn instantly" flow with a
//! timed countdown. A player who takes lethal damage enters a Dead state
//! for a configured delay, sees a live countdown on their subtitle line,
//! and returns to Alive either automatically at the deadline or on a
//! primary-click input, depending on configuration. While dead the player
//! is hidden from everyone else, optionally blinded, and optionally
//! mounted on an invisible immobile proxy entity.
//!
//! Per-player state machine:
//!
//! ```text
//!   Alive ──(lethal damage)──→ Dead(deadline) ──(deadline reached,
//!       ↑                            │           auto or click)
//!       └────────────────────────────┘
//! ```
//!
//! `Dead` also exits via disconnect cleanup — the entry is dropped with no
//! Alive transition. There are no other transitions; the host's own death
//! handling is suppressed while a player is registered dead, so `Dead`
//! cannot be re-entered.
//!
//! # Concurrency
//!
//! The core assumes the host dispatches events and the countdown updater
//! runs on one logical game-loop thread. Because a tokio host may not
//! guarantee that, all module state sits behind a single mutex: the event
//! handlers and the 10 Hz updater task funnel through it, and every
//! mutation is single-key, so the only race worth guarding is a
//! double-respawn at the deadline boundary — solved by making
//! [`RespawnModule::respawn`] a no-op when the registry entry is gone.
//!
//! # Key types
//!
//! - [`RespawnModule`] — the death/respawn state machine
//! - [`ModuleHandle`] — event wiring and the updater lifecycle
//! - [`Settings`] / [`RespawnConfig`] — immutable policy and its raw form
//! - [`DeadPlayerRegistry`] — who is dead, and until when
//! - [`SpawnResolver`] — external override of the respawn destination

mod config;
mod lifecycle;
mod module;
mod registry;
mod resolver;

pub use config::{ConfigError, MIN_DELAY, RespawnConfig, Settings};
pub use lifecycle::ModuleHandle;
pub use module::{PROXY_EFFECTS, RespawnModule, UPDATE_RATE_HZ};
pub use registry::{DeadEntry, DeadPlayerRegistry};
pub use resolver::SpawnResolver;
