//! Score submission and durable local storage
//!
//! The simulation never blocks on persistence. A [`ScoreReport`] is handed
//! to a [`ResultSink`] exactly once per completed run; delivery happens off
//! the game loop and the outcome comes back on a side channel the caller
//! drains whenever convenient. Local durable state (best score, top-10
//! history) lives in [`ScoreStore`].

pub mod store;

pub use store::{ScoreStore, StoreError};

use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
use std::thread::JoinHandle;

use serde::{Deserialize, Serialize};

/// Final result of one completed run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Floored final score
    pub score: u64,
    /// Speed relative to the base scroll speed when the run ended
    pub speed_multiplier: f32,
    /// Seconds survived
    pub time_played: f32,
}

/// Delivery outcome, reported on the side channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Delivered,
    Failed(String),
}

/// Non-blocking recipient of run results
pub trait ResultSink: Send {
    /// Hand off a completed run. Must return without waiting on delivery.
    fn submit(&mut self, report: ScoreReport);

    /// Drain the next delivery outcome, if one has arrived.
    fn try_outcome(&mut self) -> Option<SubmitOutcome>;
}

/// Sink that drops reports; for menus, tests, and offline play
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ResultSink for NullSink {
    fn submit(&mut self, report: ScoreReport) {
        log::debug!("discarding score report {report:?}");
    }

    fn try_outcome(&mut self) -> Option<SubmitOutcome> {
        None
    }
}

/// Runs a delivery function on a worker thread, one report at a time.
///
/// Dropping the sink closes the report channel and joins the worker, so
/// teardown is deterministic; a report already in flight finishes first.
pub struct ThreadedSink {
    reports: Option<Sender<ScoreReport>>,
    outcomes: Receiver<SubmitOutcome>,
    worker: Option<JoinHandle<()>>,
}

impl ThreadedSink {
    /// Spawn the worker around a delivery function. The function's error
    /// string becomes the `Failed` outcome; it is logged either way.
    pub fn new<F>(mut deliver: F) -> Self
    where
        F: FnMut(ScoreReport) -> Result<(), String> + Send + 'static,
    {
        let (report_tx, report_rx) = channel::<ScoreReport>();
        let (outcome_tx, outcome_rx) = channel::<SubmitOutcome>();

        let worker = std::thread::spawn(move || {
            for report in report_rx {
                let outcome = match deliver(report) {
                    Ok(()) => {
                        log::info!("score {} submitted", report.score);
                        SubmitOutcome::Delivered
                    }
                    Err(err) => {
                        log::warn!("score submission failed: {err}");
                        SubmitOutcome::Failed(err)
                    }
                };
                if outcome_tx.send(outcome).is_err() {
                    break;
                }
            }
        });

        Self {
            reports: Some(report_tx),
            outcomes: outcome_rx,
            worker: Some(worker),
        }
    }
}

impl ResultSink for ThreadedSink {
    fn submit(&mut self, report: ScoreReport) {
        let sent = self
            .reports
            .as_ref()
            .map(|tx| tx.send(report).is_ok())
            .unwrap_or(false);
        if !sent {
            log::warn!("result sink worker is gone, dropping report {report:?}");
        }
    }

    fn try_outcome(&mut self) -> Option<SubmitOutcome> {
        match self.outcomes.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

impl Drop for ThreadedSink {
    fn drop(&mut self) {
        drop(self.reports.take());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
