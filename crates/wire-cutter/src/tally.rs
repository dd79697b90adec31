//! Running counts of classified configurations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::solver::{Outcome, Rejection};

/// Counts per outcome category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub accepted: usize,
    pub too_easy: usize,
    pub impossible: usize,
    pub total_checked: usize,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one outcome
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Solved(_) => self.accepted += 1,
            Outcome::Rejected(Rejection::TooEasy) => self.too_easy += 1,
            Outcome::Rejected(Rejection::Impossible) => self.impossible += 1,
        }
        self.total_checked += 1;
    }

    /// Share of `count` in all checked configurations, 0 when nothing was checked
    pub fn percentage(&self, count: usize) -> f64 {
        if self.total_checked == 0 {
            0.0
        } else {
            100.0 * count as f64 / self.total_checked as f64
        }
    }

    /// Configurations checked per second
    pub fn rate(&self, elapsed_secs: f64) -> f64 {
        if elapsed_secs <= 0.0 {
            0.0
        } else {
            self.total_checked as f64 / elapsed_secs
        }
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, count) in [
            ("accepted", self.accepted),
            ("too easy", self.too_easy),
            ("impossible", self.impossible),
        ] {
            writeln!(
                f,
                "- {count} games {label} ({:.2} %)",
                self.percentage(count)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wires::{CutSequence, NUM_WIRES};

    #[test]
    fn test_record_counts_each_category() {
        let mut tally = Tally::new();
        tally.record(&Outcome::Solved(
            CutSequence::new(&[0, 1, 2, 3, 4, 5], NUM_WIRES).unwrap(),
        ));
        tally.record(&Outcome::Rejected(Rejection::TooEasy));
        tally.record(&Outcome::Rejected(Rejection::TooEasy));
        tally.record(&Outcome::Rejected(Rejection::Impossible));

        assert_eq!(
            tally,
            Tally {
                accepted: 1,
                too_easy: 2,
                impossible: 1,
                total_checked: 4,
            }
        );
        assert_eq!(
            tally.accepted + tally.too_easy + tally.impossible,
            tally.total_checked
        );
        assert_eq!(tally.percentage(tally.too_easy), 50.0);
    }

    #[test]
    fn test_empty_tally_has_zero_percentages() {
        let tally = Tally::new();
        assert_eq!(tally.percentage(0), 0.0);
        assert_eq!(tally.rate(0.0), 0.0);
        assert_eq!(
            tally.to_string(),
            "- 0 games accepted (0.00 %)\n\
             - 0 games too easy (0.00 %)\n\
             - 0 games impossible (0.00 %)\n"
        );
    }
}
