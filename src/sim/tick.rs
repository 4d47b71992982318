//! Per-frame simulation step
//!
//! One tick commits in a fixed order: time and score accrue, the player
//! integrates, entities advance and cull, collisions resolve, then the
//! spawner runs. The presentation layer reads a snapshot only after a tick
//! has fully committed.

use super::collision::overlaps;
use super::spawn;
use super::state::{GamePhase, GameState};

/// Directional intent for one tick
///
/// Set and cleared by discrete press/release events upstream; the simulation
/// never polls device state. Both flags set cancel to no movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    /// Net direction in {-1, 0, 1}
    pub fn direction(&self) -> f32 {
        (self.right as i32 - self.left as i32) as f32
    }
}

/// Advance the run by one bounded timestep.
///
/// No-op outside the Running phase. On an obstacle hit the phase flips to
/// GameOver and the tick ends immediately; entities are left exactly as
/// they were at the moment of impact.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.time = (state.time + dt).max(0.0);
    state.score = (state.score + dt * state.tuning.score_per_sec).max(0.0);
    state.speed = state.tuning.speed_at(state.time);

    // Player: velocity derived from intent, hard clamp at the edges
    let max_x = state.playfield.width - state.player.width;
    state.player.pos.x = (state.player.pos.x
        + input.direction() * state.tuning.player_speed_x * dt)
        .clamp(0.0, max_x);

    // Entities scroll down; past the bottom margin they are done
    let cull_y = state.playfield.height + crate::consts::DESPAWN_MARGIN;
    for e in &mut state.entities {
        e.pos.y += e.speed * dt;
        if e.pos.y > cull_y {
            e.dead = true;
        }
    }
    state.entities.retain(|e| !e.dead);

    let player_rect = state.player.rect();

    // First obstacle hit ends the run
    if state
        .entities
        .iter()
        .any(|e| !e.kind.is_bonus() && overlaps(&player_rect, &e.rect()))
    {
        state.phase = GamePhase::GameOver;
        log::info!(
            "game over at t={:.1}s, score {}, {:.2}x speed",
            state.time,
            state.score.floor(),
            state.speed_multiplier()
        );
        return;
    }

    // Bonus pickups: mark dead, award the fixed bump
    let mut picked_up = 0u32;
    for e in &mut state.entities {
        if e.kind.is_bonus() && !e.dead && overlaps(&player_rect, &e.rect()) {
            e.dead = true;
            picked_up += 1;
        }
    }
    if picked_up > 0 {
        state.score += picked_up as f32 * state.tuning.bonus_score;
        log::debug!("picked up {picked_up} bonus(es), score {}", state.score.floor());
    }
    state.entities.retain(|e| !e.dead);

    spawn::update(state, dt);
}
