//! Frame driver around the simulation
//!
//! [`Game`] owns the run state, the frame clock, the latched input intent,
//! and the persistence collaborators. Each frame it asks the clock for a
//! bounded delta, ticks, and watches for the GameOver transition to do the
//! one-shot handoff: best-score write to the durable store and a
//! fire-and-forget report to the result sink.

use crate::highscores::HighScores;
use crate::persistence::{NullSink, ResultSink, ScoreReport, ScoreStore, SubmitOutcome};
use crate::sim::{FrameClock, GamePhase, GameState, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

/// One playable game instance
pub struct Game {
    state: GameState,
    clock: FrameClock,
    input: TickInput,
    scores: HighScores,
    store: Option<ScoreStore>,
    sink: Box<dyn ResultSink>,
    last_phase: GamePhase,
}

impl Game {
    /// New game in the menu phase, no durable store, discarding sink
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let state = GameState::new(seed, tuning);
        let last_phase = state.phase;
        Self {
            state,
            clock: FrameClock::new(),
            input: TickInput::default(),
            scores: HighScores::new(),
            store: None,
            sink: Box::new(NullSink),
            last_phase,
        }
    }

    /// Attach a durable store; the leaderboard is read from it immediately
    pub fn with_store(mut self, store: ScoreStore) -> Self {
        self.scores = store.load();
        self.store = Some(store);
        self
    }

    /// Attach a result sink for run submissions
    pub fn with_sink(mut self, sink: Box<dyn ResultSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    pub fn best_score(&self) -> u64 {
        self.scores.best()
    }

    /// Latch the directional intent until the next change
    pub fn set_input(&mut self, left: bool, right: bool) {
        self.input = TickInput { left, right };
    }

    /// Menu or GameOver to Running, with a fresh clock baseline
    pub fn start(&mut self, now: f64) {
        self.state.start();
        self.clock.reset(now);
        self.last_phase = self.state.phase;
    }

    /// Full reset and immediate new run
    pub fn restart(&mut self, now: f64) {
        self.start(now);
    }

    /// Offer a frame timestamp (seconds). Returns true if a tick ran.
    ///
    /// Outside the Running phase this never ticks, so a stopped game can
    /// keep receiving frame callbacks harmlessly.
    pub fn frame(&mut self, now: f64) -> bool {
        if self.state.phase != GamePhase::Running {
            return false;
        }
        let Some(dt) = self.clock.frame(now) else {
            return false;
        };

        tick(&mut self.state, &self.input, dt);

        if self.state.phase == GamePhase::GameOver && self.last_phase == GamePhase::Running {
            self.on_game_over();
        }
        self.last_phase = self.state.phase;
        true
    }

    /// Read-only projection of the last committed tick
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot(self.best_score())
    }

    /// Drain one pending submission outcome, if any arrived
    pub fn poll_submit_outcome(&mut self) -> Option<SubmitOutcome> {
        self.sink.try_outcome()
    }

    /// Return to the menu without starting a new run
    pub fn to_menu(&mut self) {
        if self.state.phase == GamePhase::GameOver {
            self.state.phase = GamePhase::Menu;
            self.last_phase = GamePhase::Menu;
        }
    }

    fn on_game_over(&mut self) {
        let report = ScoreReport {
            score: self.state.score.floor() as u64,
            speed_multiplier: self.state.speed_multiplier(),
            time_played: self.state.time,
        };

        if let Some(rank) =
            self.scores
                .add_score(report.score, report.speed_multiplier, report.time_played)
        {
            log::info!("run ranked #{rank} with {}", report.score);
        }
        if let Some(store) = &self.store {
            if let Err(err) = store.save(&self.scores) {
                // Local persistence trouble never interrupts the game over
                log::warn!("could not save high scores: {err}");
            }
        }

        self.sink.submit(report);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::persistence::ThreadedSink;

    const FRAME: f64 = 1.0 / 60.0;

    /// Sink recording the last submitted score, synchronously
    struct RecordingSink(Arc<AtomicU64>);

    impl ResultSink for RecordingSink {
        fn submit(&mut self, report: ScoreReport) {
            self.0.store(report.score + 1, Ordering::SeqCst);
        }
        fn try_outcome(&mut self) -> Option<SubmitOutcome> {
            None
        }
    }

    fn run_until_game_over(game: &mut Game, max_frames: usize) {
        let mut now = 0.0;
        game.start(now);
        for _ in 0..max_frames {
            now += FRAME;
            game.frame(now);
            if game.state().phase == GamePhase::GameOver {
                return;
            }
        }
        panic!("run never ended in {max_frames} frames");
    }

    #[test]
    fn test_no_frames_tick_in_menu() {
        let mut game = Game::new(1, Tuning::default());
        assert!(!game.frame(0.0));
        assert!(!game.frame(1.0));
        assert_eq!(game.state().time, 0.0);
    }

    #[test]
    fn test_menu_wait_does_not_leak_into_first_tick() {
        let mut game = Game::new(1, Tuning::default());
        // A long menu idle, then start: the first tick must be one frame
        game.start(100.0);
        assert!(game.frame(100.0 + FRAME));
        assert!(game.state().time < 0.02);
    }

    #[test]
    fn test_game_over_submits_once() {
        let submitted = Arc::new(AtomicU64::new(0));
        let mut game = Game::new(3, Tuning::default())
            .with_sink(Box::new(RecordingSink(submitted.clone())));

        // Park the player at the left wall and wait for the walk to find it
        game.set_input(true, false);
        run_until_game_over(&mut game, 60 * 600);

        let recorded = submitted.load(Ordering::SeqCst);
        assert!(recorded > 0, "no report submitted");
        assert_eq!(recorded - 1, game.state().score.floor() as u64);

        // Further frames do not tick or resubmit
        let mut now = 1000.0;
        for _ in 0..30 {
            now += FRAME;
            assert!(!game.frame(now));
        }
        assert_eq!(submitted.load(Ordering::SeqCst), recorded);
    }

    #[test]
    fn test_game_over_persists_best_score() {
        let dir = std::env::temp_dir().join("ember_dash_runner_test");
        std::fs::create_dir_all(&dir).unwrap();
        let store = ScoreStore::new(&dir);
        std::fs::remove_file(store.path()).ok();

        let mut game = Game::new(3, Tuning::default()).with_store(store.clone());
        game.set_input(true, false);
        run_until_game_over(&mut game, 60 * 600);

        let score = game.state().score.floor() as u64;
        assert_eq!(game.best_score(), score);
        assert_eq!(store.load().best(), score);
        std::fs::remove_file(store.path()).ok();
    }

    #[test]
    fn test_restart_begins_a_fresh_run() {
        let mut game = Game::new(3, Tuning::default());
        game.set_input(true, false);
        run_until_game_over(&mut game, 60 * 600);
        let best = game.best_score();

        game.restart(2000.0);
        assert_eq!(game.state().phase, GamePhase::Running);
        assert_eq!(game.state().score, 0.0);
        assert!(game.state().entities.is_empty());
        // Best score survives the reset
        assert_eq!(game.best_score(), best);
        assert!(game.frame(2000.0 + FRAME));
    }

    #[test]
    fn test_threaded_sink_outcome_arrives_later() {
        let mut game = Game::new(3, Tuning::default())
            .with_sink(Box::new(ThreadedSink::new(|_| Ok(()))));
        game.set_input(true, false);
        run_until_game_over(&mut game, 60 * 600);

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(2);
        let mut outcome = None;
        while std::time::Instant::now() < deadline {
            outcome = game.poll_submit_outcome();
            if outcome.is_some() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert_eq!(outcome, Some(SubmitOutcome::Delivered));
    }

    #[test]
    fn test_snapshot_after_every_tick() {
        let mut game = Game::new(12, Tuning::default());
        let mut now = 0.0;
        game.start(now);
        for _ in 0..120 {
            now += FRAME;
            if game.frame(now) {
                let snap = game.snapshot();
                assert_eq!(snap.phase, game.state().phase);
                assert_eq!(snap.entities.len(), game.state().entities.len());
            }
        }
    }
}
