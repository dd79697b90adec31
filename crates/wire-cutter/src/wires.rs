//! Wire data model: colors, configurations, working state and cut sequences.
//!
//! A `Configuration` is the immutable starting layout of a puzzle. Each trial
//! works on its own `WireState` copy, where cut wires become `None`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::WireError;

/// Number of wires in a standard puzzle
pub const NUM_WIRES: usize = 8;

/// Inline capacity for wire and cut storage
pub(crate) type WireVec<T> = SmallVec<[T; NUM_WIRES]>;

/// Wire color. `Red` is the danger color that must be cleared to win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
}

impl Color {
    /// Every color, in declaration order
    pub const ALL: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Yellow];

    /// The color that must be absent for victory
    pub const DANGER: Color = Color::Red;

    pub fn is_danger(self) -> bool {
        self == Self::DANGER
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" | "r" => Ok(Color::Red),
            "green" | "g" => Ok(Color::Green),
            "blue" | "b" => Ok(Color::Blue),
            "yellow" | "y" => Ok(Color::Yellow),
            _ => Err(WireError::UnknownColor(s.to_string())),
        }
    }
}

/// Starting layout of one puzzle, one color per wire position.
///
/// Always uses every color at least once. Deserializing checks only that;
/// the length is not known there, so callers that read a layout from
/// outside compare it against their wire count with [`Configuration::check_len`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct Configuration {
    wires: WireVec<Color>,
}

impl Configuration {
    /// Build a configuration with exactly `num_wires` wires
    pub fn new(colors: &[Color], num_wires: usize) -> Result<Self, WireError> {
        expect_len(colors.len(), num_wires)?;
        Self::from_colors(colors)
    }

    /// Fails unless the layout has exactly `num_wires` wires
    pub fn check_len(&self, num_wires: usize) -> Result<(), WireError> {
        expect_len(self.len(), num_wires)
    }

    /// Parse color names such as `["green", "red", ...]`
    pub fn parse<S: AsRef<str>>(names: &[S], num_wires: usize) -> Result<Self, WireError> {
        let colors = names
            .iter()
            .map(|name| name.as_ref().parse())
            .collect::<Result<Vec<Color>, _>>()?;
        Self::new(&colors, num_wires)
    }

    fn from_colors(colors: &[Color]) -> Result<Self, WireError> {
        if let Some(&missing) = Color::ALL.iter().find(|c| !colors.contains(c)) {
            return Err(WireError::MissingColor(missing));
        }
        Ok(Self {
            wires: colors.iter().copied().collect(),
        })
    }

    /// Skip validation for layouts already known to use every color
    pub(crate) fn from_valid(wires: WireVec<Color>) -> Self {
        debug_assert!(Color::ALL.iter().all(|c| wires.contains(c)));
        Self { wires }
    }

    pub fn len(&self) -> usize {
        self.wires.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wires.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.wires
    }

    pub fn get(&self, position: usize) -> Option<Color> {
        self.wires.get(position).copied()
    }

    /// One `index: color` line per wire
    pub fn listing(&self) -> String {
        self.wires
            .iter()
            .enumerate()
            .map(|(i, color)| format!("{i}: {color}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn expect_len(actual: usize, expected: usize) -> Result<(), WireError> {
    if actual != expected {
        return Err(WireError::WrongLength { expected, actual });
    }
    Ok(())
}

impl TryFrom<Vec<Color>> for Configuration {
    type Error = WireError;

    fn try_from(colors: Vec<Color>) -> Result<Self, Self::Error> {
        Self::from_colors(&colors)
    }
}

impl From<Configuration> for Vec<Color> {
    fn from(config: Configuration) -> Self {
        config.wires.into_vec()
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, color) in self.wires.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{color}")?;
        }
        Ok(())
    }
}

/// Mutable working copy of a configuration during one trial
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireState {
    slots: WireVec<Option<Color>>,
}

impl WireState {
    pub fn from_configuration(config: &Configuration) -> Self {
        Self {
            slots: config.wires.iter().map(|&c| Some(c)).collect(),
        }
    }

    /// Build a state directly from slots, `None` marking a cut wire
    pub fn from_slots(slots: &[Option<Color>]) -> Self {
        Self {
            slots: slots.iter().copied().collect(),
        }
    }

    /// Total positions, cut or not
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Color at a position, `None` if cut or out of range
    pub fn get(&self, position: usize) -> Option<Color> {
        self.slots.get(position).copied().flatten()
    }

    pub fn is_cut(&self, position: usize) -> bool {
        self.get(position).is_none()
    }

    pub fn cut(&mut self, position: usize) {
        if let Some(slot) = self.slots.get_mut(position) {
            *slot = None;
        }
    }

    pub fn slots(&self) -> &[Option<Color>] {
        &self.slots
    }

    /// Remaining wires
    pub fn count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Remaining wires strictly before `index`
    pub fn count_before(&self, index: usize) -> usize {
        let end = index.min(self.slots.len());
        self.slots[..end].iter().flatten().count()
    }

    /// Remaining wires of one color
    pub fn count_color(&self, color: Color) -> usize {
        self.slots.iter().filter(|&&slot| slot == Some(color)).count()
    }

    /// Nearest remaining wire strictly before `index`
    pub fn prev(&self, index: usize) -> Option<Color> {
        let end = index.min(self.slots.len());
        self.slots[..end].iter().rev().find_map(|&slot| slot)
    }

    /// Nearest remaining wire at or after `index`
    pub fn first(&self, index: usize) -> Option<Color> {
        self.slots.get(index..)?.iter().find_map(|&slot| slot)
    }

    /// First remaining wire
    pub fn first_wire(&self) -> Option<Color> {
        self.first(0)
    }

    /// Last remaining wire
    pub fn last_wire(&self) -> Option<Color> {
        self.prev(self.slots.len())
    }
}

/// Ordered list of distinct wire positions to cut
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CutSequence(WireVec<usize>);

impl CutSequence {
    /// Build a sequence, checking range and uniqueness of positions
    pub fn new(positions: &[usize], num_wires: usize) -> Result<Self, WireError> {
        let mut seen: WireVec<usize> = SmallVec::new();
        for &position in positions {
            if position >= num_wires {
                return Err(WireError::PositionOutOfRange {
                    position,
                    num_wires,
                });
            }
            if seen.contains(&position) {
                return Err(WireError::DuplicateCut(position));
            }
            seen.push(position);
        }
        Ok(Self(seen))
    }

    /// Positions from the search, which are distinct by construction
    pub(crate) fn from_permutation(positions: &[usize]) -> Self {
        Self(positions.iter().copied().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn positions(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for CutSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, position) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{position}")?;
        }
        Ok(())
    }
}
