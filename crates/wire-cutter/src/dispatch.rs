//! Parallel classification of many configurations.
//!
//! A feeder thread pushes configurations into a bounded channel, a fixed pool
//! of workers solves them, and the calling thread folds the results into a
//! `Tally`. Results arrive in completion order. Only the calling thread
//! touches the tally.

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, unbounded, RecvTimeoutError};
use log::{debug, info, trace};
use serde::Serialize;

use crate::solver::{solve, CancelToken, SolveReport, SolverConfig};
use crate::tally::Tally;
use crate::wires::{Configuration, CutSequence};

/// How often the aggregator wakes up to check for cancellation
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Settings for a parallel run
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Number of worker threads
    pub workers: usize,
    /// Time between progress reports
    pub progress_interval: Duration,
    /// Stop after this many accepted configurations
    pub limit: Option<usize>,
    /// Cancel the run after this long
    pub time_limit: Option<Duration>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            progress_interval: Duration::from_secs(10),
            limit: None,
            time_limit: None,
        }
    }
}

/// Available parallelism, or 4 when it cannot be determined
pub fn default_workers() -> usize {
    thread::available_parallelism().map_or(4, |n| n.get())
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Every configuration was classified
    Completed,
    /// The accepted limit was reached
    LimitReached,
    /// The time limit expired
    TimeLimit,
    /// The cancel token was set from outside
    Cancelled,
}

/// Snapshot of a running search
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    pub tally: Tally,
    pub total: usize,
    pub elapsed: Duration,
}

impl Progress {
    /// Share of configurations checked so far
    pub fn percent_done(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * self.tally.total_checked as f64 / self.total as f64
        }
    }

    /// Configurations checked per second
    pub fn rate(&self) -> f64 {
        self.tally.rate(self.elapsed.as_secs_f64())
    }
}

/// Something the caller may want to display
#[derive(Debug)]
pub enum RunEvent<'a> {
    Accepted {
        config: &'a Configuration,
        cuts: &'a CutSequence,
    },
    Progress(Progress),
}

/// Final state of a run
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub progress: Progress,
    pub stop_reason: StopReason,
}

impl RunSummary {
    pub fn tally(&self) -> &Tally {
        &self.progress.tally
    }

    pub fn interrupted(&self) -> bool {
        matches!(self.stop_reason, StopReason::TimeLimit | StopReason::Cancelled)
    }
}

/// Classify every configuration in `games` on a pool of worker threads.
///
/// `on_event` is called from the calling thread for each accepted
/// configuration and for every progress report. Setting `cancel` stops the
/// run; outcomes still in flight are dropped.
pub fn run<F>(
    games: Vec<Configuration>,
    solver: &SolverConfig,
    config: &DispatchConfig,
    cancel: &CancelToken,
    mut on_event: F,
) -> RunSummary
where
    F: FnMut(RunEvent<'_>),
{
    let total = games.len();
    let workers = config.workers.max(1);
    let start_time = Instant::now();
    let deadline = config.time_limit.map(|limit| start_time + limit);

    info!(
        "Searching {total} configurations on {workers} workers (cuts {}..={})",
        solver.min_cuts, solver.max_cuts
    );

    let (job_tx, job_rx) = bounded::<Configuration>(workers * 4);
    let (result_tx, result_rx) = unbounded::<(Configuration, SolveReport)>();

    // Internal stop signal for the feeder and workers, set when the run ends
    // for any reason
    let stop = CancelToken::new();

    let mut tally = Tally::new();
    let mut stop_reason = StopReason::Completed;

    thread::scope(|scope| {
        let feeder_stop = stop.clone();
        scope.spawn(move || {
            for game in games {
                if feeder_stop.is_cancelled() || job_tx.send(game).is_err() {
                    debug!("Feeder stopped early");
                    return;
                }
            }
        });

        for id in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let stop = stop.clone();
            scope.spawn(move || {
                debug!("Worker {id} started");
                for game in job_rx.iter() {
                    let Some(report) = solve(&game, solver, &stop) else {
                        break;
                    };
                    if result_tx.send((game, report)).is_err() {
                        break;
                    }
                }
                debug!("Worker {id} finished");
            });
        }
        drop(job_rx);
        drop(result_tx);

        let mut progress_time = Instant::now();
        loop {
            if cancel.is_cancelled() {
                stop_reason = StopReason::Cancelled;
                break;
            }
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                stop_reason = StopReason::TimeLimit;
                break;
            }
            if config.limit.is_some_and(|limit| tally.accepted >= limit) {
                if tally.total_checked < total {
                    stop_reason = StopReason::LimitReached;
                }
                break;
            }

            match result_rx.recv_timeout(POLL_INTERVAL) {
                Ok((game, report)) => {
                    trace!("{game}: {:?}", report.outcome);
                    tally.record(&report.outcome);
                    if let Some(cuts) = report.outcome.solution() {
                        on_event(RunEvent::Accepted {
                            config: &game,
                            cuts,
                        });
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            if progress_time.elapsed() >= config.progress_interval {
                progress_time = Instant::now();
                let progress = Progress {
                    tally,
                    total,
                    elapsed: start_time.elapsed(),
                };
                info!(
                    "Progress: {:.1} % at {:.2} games per second",
                    progress.percent_done(),
                    progress.rate()
                );
                on_event(RunEvent::Progress(progress));
            }
        }

        if stop_reason != StopReason::Completed {
            debug!("Stopping workers: {stop_reason:?}");
        }
        // Anything still in flight is discarded
        stop.cancel();
        drop(result_rx);
    });

    if stop_reason == StopReason::Completed && tally.total_checked < total {
        stop_reason = StopReason::Cancelled;
    }

    let summary = RunSummary {
        progress: Progress {
            tally,
            total,
            elapsed: start_time.elapsed(),
        },
        stop_reason,
    };
    info!(
        "Checked {} of {total} configurations ({:?})",
        tally.total_checked, stop_reason
    );
    summary
}
