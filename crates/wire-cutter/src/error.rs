//! Errors raised when building configurations, cut sequences and settings.

use thiserror::Error;

use crate::wires::Color;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("Wrong number of wires, expected {expected} but got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("Configuration does not use every color, {0} is missing")]
    MissingColor(Color),
    #[error("Unknown wire color {0:?}")]
    UnknownColor(String),
    #[error("Cut position {position} is out of range for {num_wires} wires")]
    PositionOutOfRange { position: usize, num_wires: usize },
    #[error("Position {0} is cut more than once")]
    DuplicateCut(usize),
    #[error(
        "Invalid cut bounds: need min_cuts ({min_cuts}) <= max_cuts ({max_cuts}) \
         <= wires ({num_wires}) and at least 4 wires"
    )]
    InvalidBounds {
        min_cuts: usize,
        max_cuts: usize,
        num_wires: usize,
    },
    #[error("Invalid settings: {0}")]
    Settings(String),
    #[error("Cannot install interrupt handler: {0}")]
    Interrupt(String),
}
