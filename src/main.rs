//! Ember Dash headless demo
//!
//! Runs the simulation without a presentation layer: a small autopilot
//! chases the safe corridor while synthetic 60 Hz frames drive the clock.
//! Prints the final report and the submission outcome.
//!
//! Usage: ember-dash [seed] [max-seconds]

use std::time::{Duration, Instant};

use ember_dash::persistence::{ScoreStore, ThreadedSink};
use ember_dash::sim::{GamePhase, GameState, spawn};
use ember_dash::{Game, Tuning};

const FRAME: f64 = 1.0 / 60.0;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random);
    let max_seconds: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(120.0);

    log::info!("ember-dash demo, seed {seed}, up to {max_seconds}s");

    let store = ScoreStore::new(std::env::temp_dir());
    let sink = ThreadedSink::new(|report| {
        log::info!(
            "delivering run: score {}, {:.2}x, {:.1}s",
            report.score,
            report.speed_multiplier,
            report.time_played
        );
        Ok(())
    });

    let mut game = Game::new(seed, Tuning::default())
        .with_store(store)
        .with_sink(Box::new(sink));

    let mut now = 0.0_f64;
    game.start(now);

    while game.state().phase == GamePhase::Running && now < max_seconds {
        now += FRAME;
        let (left, right) = steer(game.state());
        game.set_input(left, right);
        game.frame(now);
    }

    let snap = game.snapshot();
    println!(
        "run over: score {}, best {}, {:.2}x speed, {:.1}s survived",
        snap.score, snap.best_score, snap.speed_multiplier, snap.time
    );

    // Give the sink a moment to report back
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if let Some(outcome) = game.poll_submit_outcome() {
            println!("submission: {outcome:?}");
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
}

/// Chase the middle of the safe corridor with a small deadzone.
fn steer(state: &GameState) -> (bool, bool) {
    let lane_w = state.playfield.lane_width();
    let corridor = spawn::corridor_width(state) as f32;
    let target = state.playfield.lane_x(state.spawn.safe_lane) + corridor * lane_w / 2.0;
    let center = state.player.pos.x + state.player.width / 2.0;
    if center < target - 4.0 {
        (false, true)
    } else if center > target + 4.0 {
        (true, false)
    } else {
        (false, false)
    }
}
