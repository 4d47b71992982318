//! Wall-clock frame times to bounded simulation deltas
//!
//! Frame callbacks arrive at whatever rate the host produces them; physics
//! only ever sees a clamped, monotonic delta. Pathological deltas (stalled
//! tab, clock jump, non-finite timestamp) collapse to the nominal step
//! instead of propagating into entity positions.

use crate::consts::*;

/// Frames closer together than the target interval minus this are skipped
const THROTTLE_TOLERANCE: f32 = 1.0e-3;

/// Converts high-resolution timestamps (seconds) into tick deltas.
///
/// Frames arriving faster than [`TARGET_FRAME_DT`] are skipped without
/// advancing the baseline, so their elapsed time folds into the next
/// accepted frame rather than being lost.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fresh baseline. Call when a run starts so the first frame
    /// after a menu wait does not see the whole wait as a delta.
    pub fn reset(&mut self, now: f64) {
        self.last = Some(now);
    }

    /// Offer a frame timestamp; returns the delta to simulate, if any.
    pub fn frame(&mut self, now: f64) -> Option<f32> {
        let Some(last) = self.last else {
            self.last = Some(now);
            return None;
        };

        let raw = (now - last) as f32;

        // Throttle: too soon, wait for the next frame (baseline unchanged)
        if raw >= 0.0 && raw < TARGET_FRAME_DT - THROTTLE_TOLERANCE {
            return None;
        }

        self.last = Some(now);

        if !raw.is_finite() || raw < 0.0 || raw > MAX_REASONABLE_DT {
            log::debug!("abnormal frame delta {raw}s, substituting nominal step");
            return Some(NOMINAL_DT);
        }

        Some(raw.min(MAX_TICK_DT))
    }
}
