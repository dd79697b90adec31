//! Wire cutting puzzle search.
//!
//! This crate enumerates every wire layout that uses all four colors,
//! searches each one for the shortest rule-abiding sequence of cuts that
//! removes every red wire, and keeps only the layouts whose shortest
//! solution needs enough cuts to be interesting.

pub mod dispatch;
pub mod error;
pub mod executor;
pub mod generator;
pub mod rules;
pub mod settings;
pub mod solver;
pub mod tally;
pub mod wires;

// Re-export main types
pub use dispatch::{run, DispatchConfig, Progress, RunEvent, RunSummary, StopReason};
pub use error::WireError;
pub use executor::{execute, is_solution, ExecutionResult, ExecutionStatus};
pub use generator::{configurations, generate};
pub use rules::{is_legal_cut, legal_rules, victory, Rule, RULES};
pub use settings::{SearchOverrides, SearchSettings};
pub use solver::{solve, CancelToken, Outcome, Rejection, SolveReport, SolverConfig};
pub use tally::Tally;
pub use wires::{Color, Configuration, CutSequence, WireState, NUM_WIRES};
