//! Plays a cut sequence against a configuration.
//!
//! Each play starts from a fresh `WireState`. Cuts are applied in order and
//! the play stops at the first cut that breaks a rule.

use serde::Serialize;

use crate::rules::{is_legal_cut, victory};
use crate::wires::{Configuration, WireState};

/// How a play of a cut sequence ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// Every cut was legal and no danger wire remains
    Victory,
    /// A cut was attempted after the game was already won
    CutAfterVictory,
    /// No rule allows the cut
    IllegalCut,
    /// Every cut was legal but danger wires remain
    DangerRemaining,
}

/// Result of playing a cut sequence
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub status: ExecutionStatus,
    /// Cuts applied before the play stopped
    pub cuts_applied: usize,
    /// Step index (0-based) of the offending cut, if any
    pub failed_step: Option<usize>,
    pub state: WireState,
    pub solved: bool,
}

/// Play `cuts` on a fresh copy of `config`
pub fn execute(config: &Configuration, cuts: &[usize]) -> ExecutionResult {
    let mut state = WireState::from_configuration(config);

    for (step, &cut) in cuts.iter().enumerate() {
        // No extra cuts are allowed once the game is won
        if victory(&state) {
            return ExecutionResult {
                status: ExecutionStatus::CutAfterVictory,
                cuts_applied: step,
                failed_step: Some(step),
                state,
                solved: false,
            };
        }

        if !is_legal_cut(&state, cut) {
            return ExecutionResult {
                status: ExecutionStatus::IllegalCut,
                cuts_applied: step,
                failed_step: Some(step),
                state,
                solved: false,
            };
        }

        state.cut(cut);
    }

    let solved = victory(&state);
    ExecutionResult {
        status: if solved {
            ExecutionStatus::Victory
        } else {
            ExecutionStatus::DangerRemaining
        },
        cuts_applied: cuts.len(),
        failed_step: None,
        state,
        solved,
    }
}

/// Check whether `cuts` is a complete, rule-abiding solution
pub fn is_solution(config: &Configuration, cuts: &[usize]) -> bool {
    let mut state = WireState::from_configuration(config);
    for &cut in cuts {
        if victory(&state) || !is_legal_cut(&state, cut) {
            return false;
        }
        state.cut(cut);
    }
    victory(&state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wires::{Color::*, NUM_WIRES};

    fn example() -> Configuration {
        Configuration::new(&[Green, Red, Red, Blue, Yellow, Red, Green, Blue], NUM_WIRES).unwrap()
    }

    #[test]
    fn test_empty_sequence_leaves_danger() {
        let config = example();
        assert!(!is_solution(&config, &[]));

        let result = execute(&config, &[]);
        assert_eq!(result.status, ExecutionStatus::DangerRemaining);
        assert_eq!(result.cuts_applied, 0);
    }

    #[test]
    fn test_cut_without_matching_rule() {
        let config = example();
        // Red wire at position 1 has a red neighbour, no rule covers it
        assert!(!is_solution(&config, &[1]));

        let result = execute(&config, &[4, 1]);
        assert_eq!(result.status, ExecutionStatus::IllegalCut);
        assert_eq!(result.failed_step, Some(1));
        assert_eq!(result.cuts_applied, 1);
        assert!(result.state.is_cut(4));
    }

    #[test]
    fn test_single_cut_victory() {
        let config = Configuration::new(
            &[Yellow, Yellow, Yellow, Blue, Green, Red, Blue, Blue],
            NUM_WIRES,
        )
        .unwrap();
        assert!(is_solution(&config, &[5]));

        let result = execute(&config, &[5]);
        assert_eq!(result.status, ExecutionStatus::Victory);
        assert!(result.solved);
    }

    #[test]
    fn test_no_cuts_after_victory() {
        let config = Configuration::new(
            &[Yellow, Yellow, Yellow, Blue, Green, Red, Blue, Blue],
            NUM_WIRES,
        )
        .unwrap();
        assert!(!is_solution(&config, &[5, 3]));

        let result = execute(&config, &[5, 3]);
        assert_eq!(result.status, ExecutionStatus::CutAfterVictory);
        assert_eq!(result.failed_step, Some(1));
    }

    #[test]
    fn test_execute_agrees_with_is_solution() {
        let config = Configuration::new(
            &[Green, Blue, Red, Blue, Blue, Yellow, Red, Red],
            NUM_WIRES,
        )
        .unwrap();
        for cuts in [&[5usize, 1, 2, 3, 6, 4, 7][..], &[5, 1], &[0], &[]] {
            assert_eq!(execute(&config, cuts).solved, is_solution(&config, cuts));
        }
        assert!(is_solution(&config, &[5, 1, 2, 3, 6, 4, 7]));
    }
}
