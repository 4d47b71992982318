//! Ember Dash - an endless lane-runner simulation engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (stepper, spawning, collisions, state)
//! - `runner`: Frame driver wiring the clock, input latch, and persistence
//! - `persistence`: Durable local scores and fire-and-forget result submission
//! - `tuning`: Data-driven game balance
//!
//! The engine renders nothing. Each tick leaves the state ready to project
//! into a read-only [`sim::Snapshot`] for whatever presentation layer sits
//! on top.

pub mod highscores;
pub mod persistence;
pub mod runner;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use runner::Game;
pub use tuning::Tuning;

/// Fixed geometry and timing constants
pub mod consts {
    /// Logical playfield width
    pub const GAME_WIDTH: f32 = 900.0;
    /// Logical playfield height
    pub const GAME_HEIGHT: f32 = 600.0;
    /// Number of vertical lanes
    pub const LANE_COUNT: usize = 5;

    /// Player hitbox
    pub const PLAYER_WIDTH: f32 = 42.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    /// Distance from the bottom edge up to the player's top edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 110.0;

    /// Bonus pickups are square
    pub const BONUS_SIZE: f32 = 26.0;
    /// How far past the bottom edge an entity may drift before removal
    pub const DESPAWN_MARGIN: f32 = 100.0;

    /// Nominal timestep substituted for pathological frame deltas
    pub const NOMINAL_DT: f32 = 1.0 / 60.0;
    /// Target frame interval; faster frames are skipped, not ticked
    pub const TARGET_FRAME_DT: f32 = 1.0 / 60.0;
    /// Hard cap on a single accepted tick delta (two nominal frames)
    pub const MAX_TICK_DT: f32 = 0.033;
    /// Raw deltas beyond this are a stalled clock, not gameplay time
    pub const MAX_REASONABLE_DT: f32 = 0.5;
}
