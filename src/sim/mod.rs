//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - Fixed timestep only (one tick = one update)
//! - Seeded RNG only
//! - No rendering, audio, or input dependencies; those arrive as queued
//!   commands and leave as effect/sound events

pub mod collision;
pub mod effects;
pub mod entity;
pub mod physics;
pub mod response;
pub mod state;
pub mod tick;

pub use collision::test_collision;
pub use effects::{Anchor, Effect, EffectKind, FxQueue};
pub use entity::{Body, Heading, Layer, LayerMask, Planet, Projectile, RegenPool, Ship, ShipId};
pub use state::{GamePhase, GameState};
pub use tick::{Command, apply_command, tick};
