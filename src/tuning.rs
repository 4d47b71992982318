//! Data-driven game balance
//!
//! One coherent constant set lives in `Tuning::default()`. Everything that
//! shapes difficulty is here; fixed geometry stays in [`crate::consts`].
//! A tuning file is optional: missing or unreadable files fall back to the
//! defaults with a log line.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Gameplay balance knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Scroll speed at t=0, px/s
    pub base_scroll_speed: f32,
    /// Player lateral speed, px/s
    pub player_speed_x: f32,
    /// Linear speed ramp per second of run time
    pub speed_ramp_per_sec: f32,
    /// Ramp saturation: speed plateaus at base * (1 + cap)
    pub speed_ramp_cap: f32,

    /// Spawn interval band, seconds (uniform draw)
    pub spawn_interval_min: f32,
    pub spawn_interval_max: f32,
    /// Spawn frequency ramp; must grow slower than the speed ramp or
    /// high-speed play becomes wall-to-wall obstacles
    pub spawn_freq_ramp_per_sec: f32,
    pub spawn_freq_cap: f32,
    /// Minimum on-screen distance between consecutive waves, px
    pub min_vertical_gap: f32,
    /// Multiplier on the gap when converting it to a time floor
    pub gap_slack: f32,

    /// Chance a wave carries a bonus
    pub bonus_chance: f64,
    /// Bonuses scroll slightly slower than their wave
    pub bonus_speed_factor: f32,
    /// Score awarded per collected bonus
    pub bonus_score: f32,
    /// Continuous score accrual per second survived
    pub score_per_sec: f32,

    /// Obstacle height band, px (uniform draw)
    pub obstacle_height_min: f32,
    pub obstacle_height_max: f32,
    /// Obstacles are this much narrower than their lane, centered
    pub obstacle_lane_margin: f32,
    /// Obstacles placed per wave; the safe corridor holds at any setting
    pub max_obstacles_per_wave: usize,
    /// Safe corridor is two lanes wide until this many seconds in
    pub wide_corridor_until: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_scroll_speed: 220.0,
            player_speed_x: 520.0,
            speed_ramp_per_sec: 0.03,
            speed_ramp_cap: 2.2,

            spawn_interval_min: 1.2,
            spawn_interval_max: 2.0,
            spawn_freq_ramp_per_sec: 0.015,
            spawn_freq_cap: 1.2,
            min_vertical_gap: 120.0,
            gap_slack: 1.8,

            bonus_chance: 0.4,
            bonus_speed_factor: 0.9,
            bonus_score: 50.0,
            score_per_sec: 60.0,

            obstacle_height_min: 70.0,
            obstacle_height_max: 110.0,
            obstacle_lane_margin: 40.0,
            max_obstacles_per_wave: 1,
            wide_corridor_until: 20.0,
        }
    }
}

impl Tuning {
    /// Scroll speed at a given run time: a linear ramp saturating at
    /// base * (1 + cap), never below base.
    pub fn speed_at(&self, time: f32) -> f32 {
        let ramp = 1.0 + (time * self.speed_ramp_per_sec).min(self.speed_ramp_cap);
        (self.base_scroll_speed * ramp).max(self.base_scroll_speed)
    }

    /// Load a tuning file, falling back to defaults on any failure.
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("loaded tuning from {}", path.display());
                    tuning
                }
                Err(err) => {
                    log::warn!("unreadable tuning file {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                log::warn!("cannot read tuning file {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Write the current tuning as pretty JSON.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        std::fs::write(path, json)
    }
}
