//! Wave spawning with a guaranteed safe corridor
//!
//! Passability is structural, not probabilistic: each wave first reserves a
//! corridor of lanes the player can always reach, then places obstacles in
//! the remainder. The corridor start index does a random walk of at most one
//! lane per wave, so the safe path drifts but never teleports.

use glam::Vec2;
use rand::Rng;

use super::state::{Entity, EntityKind, GameState, HazardKind};
use crate::consts::*;

/// Advance the spawn countdown, emitting a wave when it expires.
pub fn update(state: &mut GameState, dt: f32) {
    state.spawn.countdown -= dt;
    if state.spawn.countdown > 0.0 {
        return;
    }
    spawn_wave(state);
    state.spawn.countdown = next_delay(state);
}

/// Lanes kept free of obstacles for the current wave.
///
/// Two lanes wide early in a run while the player is still learning lane
/// widths, one lane after that.
pub fn corridor_width(state: &GameState) -> usize {
    let width = if state.time < state.tuning.wide_corridor_until {
        2
    } else {
        1
    };
    width.min(state.playfield.lanes)
}

/// Emit one wave: reserve the safe corridor, place obstacles in the
/// remaining lanes, and maybe drop a bonus inside the corridor.
pub fn spawn_wave(state: &mut GameState) {
    let tun = state.tuning.clone();
    let lanes = state.playfield.lanes;
    let lane_w = state.playfield.lane_width();

    // Corridor random walk, drift bounded to one lane per wave
    let corridor = corridor_width(state);
    let delta: i32 = state.rng.random_range(-1..=1);
    let next_safe =
        (state.spawn.safe_lane as i32 + delta).clamp(0, (lanes - corridor) as i32) as usize;

    let mut free = vec![true; lanes];
    for slot in free.iter_mut().skip(next_safe).take(corridor) {
        *slot = false;
    }

    // Shuffle the lanes left over for obstacles
    let mut available: Vec<usize> = (0..lanes).filter(|&l| free[l]).collect();
    for i in (1..available.len()).rev() {
        let j = state.rng.random_range(0..=i);
        available.swap(i, j);
    }

    let count = tun.max_obstacles_per_wave.min(available.len());
    for &lane in &available[..count] {
        let width = (lane_w - tun.obstacle_lane_margin).max(1.0);
        let height = state
            .rng
            .random_range(tun.obstacle_height_min..tun.obstacle_height_max);
        let kind = HazardKind::ALL[state.rng.random_range(0..HazardKind::ALL.len())];
        let id = state.next_entity_id();
        state.entities.push(Entity {
            id,
            pos: Vec2::new(
                state.playfield.lane_x(lane) + (lane_w - width) / 2.0,
                -height,
            ),
            width,
            height,
            speed: state.speed,
            kind: EntityKind::Obstacle(kind),
            dead: false,
        });
    }

    // Bonuses land inside the corridor so collecting them is never a detour
    if state.rng.random_bool(tun.bonus_chance) {
        let lane = next_safe
            + if corridor > 1 && state.rng.random_bool(0.5) {
                1
            } else {
                0
            };
        let id = state.next_entity_id();
        state.entities.push(Entity {
            id,
            pos: Vec2::new(
                state.playfield.lane_x(lane) + (lane_w - BONUS_SIZE) / 2.0,
                -BONUS_SIZE,
            ),
            width: BONUS_SIZE,
            height: BONUS_SIZE,
            speed: state.speed * tun.bonus_speed_factor,
            kind: EntityKind::Bonus,
            dead: false,
        });
    }

    state.spawn.safe_lane = next_safe;
    log::debug!(
        "wave at t={:.1}s: corridor {} wide at lane {}",
        state.time,
        corridor,
        next_safe
    );
}

/// Seconds until the next wave.
///
/// The base interval shrinks as the run speeds up, but never below the
/// speed-relative floor that keeps consecutive waves a fixed number of
/// pixels apart on screen.
fn next_delay(state: &mut GameState) -> f32 {
    let tun = &state.tuning;
    let base = state
        .rng
        .random_range(tun.spawn_interval_min..tun.spawn_interval_max);
    let freq = 1.0 + (state.time * tun.spawn_freq_ramp_per_sec).min(tun.spawn_freq_cap);
    let min_gap = tun.min_vertical_gap * tun.gap_slack / state.speed;
    (base / freq).max(min_gap)
}
