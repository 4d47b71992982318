//! Run state and core simulation types
//!
//! Everything a tick reads or writes lives here; the only cross-tick memory
//! outside the entity list and the run scalars is [`SpawnState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Resting state, no simulation ticking
    Menu,
    /// Active run
    Running,
    /// Run ended on an obstacle hit
    GameOver,
}

/// Hazard variants an obstacle can carry
///
/// Purely cosmetic for the simulation (all obstacles collide the same way);
/// the presentation layer picks sprites and copy per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    Congestion,
    Latency,
    AdversarialBot,
    Reorg,
    FeeSpike,
}

impl HazardKind {
    /// The closed set of hazard kinds, in spawn-roll order
    pub const ALL: [HazardKind; 5] = [
        HazardKind::Congestion,
        HazardKind::Latency,
        HazardKind::AdversarialBot,
        HazardKind::Reorg,
        HazardKind::FeeSpike,
    ];
}

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Lethal on contact
    Obstacle(HazardKind),
    /// Collectible, worth a fixed score bonus
    Bonus,
}

impl EntityKind {
    pub fn is_bonus(&self) -> bool {
        matches!(self, EntityKind::Bonus)
    }
}

/// A scrolling entity (obstacle or bonus)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Downward speed in px/s, fixed at spawn time
    pub speed: f32,
    pub kind: EntityKind,
    /// Pending removal (collected bonus or scrolled off the bottom)
    pub dead: bool,
}

impl Entity {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }
}

/// The player's avatar
///
/// `pos.y` never changes after construction; only `pos.x` is mutable, and
/// only through the clamped integration in the tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Player {
    fn new(playfield: &Playfield) -> Self {
        Self {
            pos: Vec2::new(
                playfield.width / 2.0 - PLAYER_WIDTH / 2.0,
                playfield.height - PLAYER_BOTTOM_OFFSET,
            ),
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }
}

/// Playfield geometry: a fixed grid of equal-width vertical lanes
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
    pub lanes: usize,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: GAME_WIDTH,
            height: GAME_HEIGHT,
            lanes: LANE_COUNT,
        }
    }
}

impl Playfield {
    pub fn lane_width(&self) -> f32 {
        self.width / self.lanes as f32
    }

    /// Left edge of the given lane
    pub fn lane_x(&self, lane: usize) -> f32 {
        lane as f32 * self.lane_width()
    }
}

/// Cross-tick spawn memory
///
/// `countdown` is the time until the next wave; `safe_lane` is where the
/// last wave's safe corridor started, anchoring the corridor random walk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnState {
    pub countdown: f32,
    pub safe_lane: usize,
}

impl SpawnState {
    fn reset(lanes: usize) -> Self {
        Self {
            countdown: 0.0,
            safe_lane: lanes / 2,
        }
    }
}

/// Complete run state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed this state's RNG started from
    pub seed: u64,
    /// All gameplay randomness flows through here
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Elapsed run time in seconds, monotonic while running
    pub time: f32,
    /// Monotonic non-decreasing within a run
    pub score: f32,
    /// Current scroll speed in px/s; a pure function of `time`
    pub speed: f32,
    pub playfield: Playfield,
    pub player: Player,
    /// Live entities; order carries no meaning, ids are unique
    pub entities: Vec<Entity>,
    pub spawn: SpawnState,
    pub tuning: Tuning,
    next_id: u32,
}

impl GameState {
    /// Create a fresh state in the menu phase
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let playfield = Playfield::default();
        let speed = tuning.base_scroll_speed;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            time: 0.0,
            score: 0.0,
            speed,
            player: Player::new(&playfield),
            entities: Vec::new(),
            spawn: SpawnState::reset(playfield.lanes),
            playfield,
            tuning,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Begin a run from Menu or GameOver: full reset of score, time, speed,
    /// entities, spawn timers, and player position.
    pub fn start(&mut self) {
        self.time = 0.0;
        self.score = 0.0;
        self.speed = self.tuning.base_scroll_speed;
        self.entities.clear();
        self.spawn = SpawnState::reset(self.playfield.lanes);
        self.player = Player::new(&self.playfield);
        self.phase = GamePhase::Running;
        log::info!("run started (seed {})", self.seed);
    }

    /// Equivalent to `start()`; reads better at call sites after a game over
    pub fn restart(&mut self) {
        self.start();
    }

    /// Recompute playfield dimensions, e.g. on a viewport change.
    ///
    /// Only valid between ticks; the player is re-clamped and re-anchored to
    /// the new bottom edge so the next tick sees consistent geometry.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.playfield.width = width;
        self.playfield.height = height;
        self.player.pos.x = self
            .player
            .pos
            .x
            .clamp(0.0, (width - self.player.width).max(0.0));
        self.player.pos.y = height - PLAYER_BOTTOM_OFFSET;
    }

    /// Current speed as a multiple of the base scroll speed
    pub fn speed_multiplier(&self) -> f32 {
        self.speed / self.tuning.base_scroll_speed
    }

    /// Read-only projection for the presentation layer
    pub fn snapshot(&self, best_score: u64) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score.floor() as u64,
            best_score,
            speed: self.speed,
            speed_multiplier: self.speed_multiplier(),
            time: self.time,
            player: self.player.rect(),
            entities: self
                .entities
                .iter()
                .map(|e| EntityView {
                    id: e.id,
                    x: e.pos.x,
                    y: e.pos.y,
                    width: e.width,
                    height: e.height,
                    kind: e.kind,
                    is_bonus: e.kind.is_bonus(),
                })
                .collect(),
        }
    }
}

/// One entity as the presentation layer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: EntityKind,
    pub is_bonus: bool,
}

/// Read-only snapshot of one tick's committed state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    /// Display score (floored)
    pub score: u64,
    pub best_score: u64,
    pub speed: f32,
    pub speed_multiplier: f32,
    pub time: f32,
    pub player: Rect,
    pub entities: Vec<EntityView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_in_menu() {
        let state = GameState::new(7, Tuning::default());
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.entities.is_empty());
        assert_eq!(state.speed, state.tuning.base_scroll_speed);
    }

    #[test]
    fn test_player_starts_centered() {
        let state = GameState::new(7, Tuning::default());
        let center = state.playfield.width / 2.0;
        assert_eq!(state.player.pos.x + state.player.width / 2.0, center);
        assert_eq!(
            state.player.pos.y,
            state.playfield.height - PLAYER_BOTTOM_OFFSET
        );
    }

    #[test]
    fn test_start_resets_everything() {
        let mut state = GameState::new(7, Tuning::default());
        state.start();
        state.time = 30.0;
        state.score = 1234.0;
        state.speed = 500.0;
        state.player.pos.x = 0.0;
        state.spawn.countdown = 9.0;
        let id = state.next_entity_id();
        state.entities.push(Entity {
            id,
            pos: Vec2::new(0.0, 0.0),
            width: 10.0,
            height: 10.0,
            speed: 220.0,
            kind: EntityKind::Bonus,
            dead: false,
        });

        state.restart();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.time, 0.0);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.speed, state.tuning.base_scroll_speed);
        assert!(state.entities.is_empty());
        assert_eq!(state.spawn.countdown, 0.0);
        assert_eq!(state.spawn.safe_lane, state.playfield.lanes / 2);
    }

    #[test]
    fn test_entity_ids_unique_across_restart() {
        let mut state = GameState::new(7, Tuning::default());
        let a = state.next_entity_id();
        state.restart();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_resize_reclamps_player() {
        let mut state = GameState::new(7, Tuning::default());
        state.player.pos.x = 800.0;
        state.resize(450.0, 300.0);
        assert!(state.player.pos.x <= 450.0 - state.player.width);
        assert_eq!(state.player.pos.y, 300.0 - PLAYER_BOTTOM_OFFSET);
        assert_eq!(state.playfield.lane_width(), 90.0);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::new(7, Tuning::default());
        state.start();
        state.score = 99.7;
        let id = state.next_entity_id();
        state.entities.push(Entity {
            id,
            pos: Vec2::new(10.0, 20.0),
            width: 140.0,
            height: 80.0,
            speed: 220.0,
            kind: EntityKind::Obstacle(HazardKind::Latency),
            dead: false,
        });

        let snap = state.snapshot(1500);
        assert_eq!(snap.score, 99);
        assert_eq!(snap.best_score, 1500);
        assert_eq!(snap.entities.len(), 1);
        assert_eq!(snap.entities[0].id, id);
        assert!(!snap.entities[0].is_bonus);
        assert_eq!(snap.speed_multiplier, 1.0);
    }
}
