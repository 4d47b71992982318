//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Bounded timesteps only (see [`clock::FrameClock`])
//! - Seeded RNG only
//! - Entity ids from a monotonic counter
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::FrameClock;
pub use collision::{Rect, overlaps};
pub use state::{
    Entity, EntityKind, EntityView, GamePhase, GameState, HazardKind, Player, Playfield, Snapshot,
    SpawnState,
};
pub use tick::{TickInput, tick};
