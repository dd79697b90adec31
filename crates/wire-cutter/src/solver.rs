//! Exhaustive search for the shortest cut sequence that wins a configuration.
//!
//! Lengths are tried in increasing order, and every ordered selection of
//! positions of that length is played. The search stops at the first winning
//! sequence. If it is shorter than the configured minimum, the configuration
//! is rejected as too easy, even if longer solutions exist.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::WireError;
use crate::executor::is_solution;
use crate::wires::{Color, Configuration, CutSequence};

/// Configuration for the solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Solutions shorter than this are too easy
    pub min_cuts: usize,
    /// Longest cut sequence to try
    pub max_cuts: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            min_cuts: 6,
            max_cuts: 7,
        }
    }
}

impl SolverConfig {
    /// Check the bounds against the number of wires
    pub fn validate(&self, num_wires: usize) -> Result<(), WireError> {
        if self.min_cuts > self.max_cuts
            || self.max_cuts > num_wires
            || num_wires < Color::ALL.len()
        {
            return Err(WireError::InvalidBounds {
                min_cuts: self.min_cuts,
                max_cuts: self.max_cuts,
                num_wires,
            });
        }
        Ok(())
    }
}

/// Why a configuration was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Solvable with fewer cuts than the minimum
    TooEasy,
    /// No sequence up to the maximum length wins
    Impossible,
}

/// Classification of one configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Solved(CutSequence),
    Rejected(Rejection),
}

impl Outcome {
    pub fn solution(&self) -> Option<&CutSequence> {
        match self {
            Outcome::Solved(cuts) => Some(cuts),
            Outcome::Rejected(_) => None,
        }
    }
}

/// Result of searching one configuration
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub outcome: Outcome,
    /// First winning sequence found, also set when it was too easy
    pub shortest: Option<CutSequence>,
    /// Number of cut sequences played
    pub permutations_tested: usize,
    /// Time elapsed in milliseconds
    pub time_elapsed_ms: u64,
}

/// Shared flag asking running searches to stop
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Cancel this token when the process receives Ctrl-C.
    ///
    /// Only one handler can be installed per process.
    pub fn cancel_on_interrupt(&self) -> Result<(), WireError> {
        let token = self.clone();
        ctrlc::set_handler(move || token.cancel()).map_err(|e| WireError::Interrupt(e.to_string()))
    }
}

/// Search `config` for a qualifying cut sequence.
///
/// Returns `None` if `cancel` was set before the search finished.
pub fn solve(
    config: &Configuration,
    solver: &SolverConfig,
    cancel: &CancelToken,
) -> Option<SolveReport> {
    let start_time = Instant::now();
    let num_wires = config.len();
    let mut permutations_tested: usize = 0;

    for length in 0..=solver.max_cuts.min(num_wires) {
        for cuts in (0..num_wires).permutations(length) {
            if cancel.is_cancelled() {
                debug!("Search cancelled after {permutations_tested} sequences: {config}");
                return None;
            }
            permutations_tested += 1;

            if is_solution(config, &cuts) {
                let cuts = CutSequence::from_permutation(&cuts);
                let outcome = if length >= solver.min_cuts {
                    Outcome::Solved(cuts.clone())
                } else {
                    Outcome::Rejected(Rejection::TooEasy)
                };
                return Some(SolveReport {
                    outcome,
                    shortest: Some(cuts),
                    permutations_tested,
                    time_elapsed_ms: start_time.elapsed().as_millis() as u64,
                });
            }
        }
    }

    Some(SolveReport {
        outcome: Outcome::Rejected(Rejection::Impossible),
        shortest: None,
        permutations_tested,
        time_elapsed_ms: start_time.elapsed().as_millis() as u64,
    })
}
