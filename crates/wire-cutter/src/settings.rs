//! Search settings, loaded from an optional TOML file.
//!
//! ```toml
//! num_wires = 8
//! min_cuts = 6
//! max_cuts = 7
//! workers = 4
//! progress_interval = 10
//! seed = 42
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dispatch::{default_workers, DispatchConfig};
use crate::error::WireError;
use crate::solver::SolverConfig;
use crate::wires::NUM_WIRES;

/// Every knob of a search run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchSettings {
    pub num_wires: usize,
    pub min_cuts: usize,
    pub max_cuts: usize,
    pub workers: usize,
    /// Seconds between progress reports
    pub progress_interval: u64,
    /// Shuffle the configurations before searching
    pub shuffle: bool,
    /// Shuffle seed, random when absent
    pub seed: Option<u64>,
    /// Seconds before the run is cancelled
    pub time_limit: Option<u64>,
    /// Stop after this many accepted configurations
    pub limit: Option<usize>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        let solver = SolverConfig::default();
        Self {
            num_wires: NUM_WIRES,
            min_cuts: solver.min_cuts,
            max_cuts: solver.max_cuts,
            workers: default_workers(),
            progress_interval: 10,
            shuffle: true,
            seed: None,
            time_limit: None,
            limit: None,
        }
    }
}

/// Values given on the command line, each replacing the file or default value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOverrides {
    pub num_wires: Option<usize>,
    pub min_cuts: Option<usize>,
    pub max_cuts: Option<usize>,
    pub workers: Option<usize>,
    pub progress_interval: Option<u64>,
    pub seed: Option<u64>,
    /// Turns shuffling off; there is no flag to turn it back on
    pub no_shuffle: bool,
    pub time_limit: Option<u64>,
    pub limit: Option<usize>,
}

impl SearchSettings {
    pub fn from_toml(text: &str) -> Result<Self, WireError> {
        toml::from_str(text).map_err(|e| WireError::Settings(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, WireError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| WireError::Settings(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    /// Read `path` if given, otherwise start from the defaults, then apply
    /// `overrides`
    pub fn resolve(path: Option<&Path>, overrides: &SearchOverrides) -> Result<Self, WireError> {
        let settings = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(settings.with_overrides(overrides))
    }

    pub fn with_overrides(self, overrides: &SearchOverrides) -> Self {
        Self {
            num_wires: overrides.num_wires.unwrap_or(self.num_wires),
            min_cuts: overrides.min_cuts.unwrap_or(self.min_cuts),
            max_cuts: overrides.max_cuts.unwrap_or(self.max_cuts),
            workers: overrides.workers.unwrap_or(self.workers),
            progress_interval: overrides.progress_interval.unwrap_or(self.progress_interval),
            shuffle: self.shuffle && !overrides.no_shuffle,
            seed: overrides.seed.or(self.seed),
            time_limit: overrides.time_limit.or(self.time_limit),
            limit: overrides.limit.or(self.limit),
        }
    }

    pub fn solver(&self) -> SolverConfig {
        SolverConfig {
            min_cuts: self.min_cuts,
            max_cuts: self.max_cuts,
        }
    }

    pub fn dispatch(&self) -> DispatchConfig {
        DispatchConfig {
            workers: self.workers,
            progress_interval: Duration::from_secs(self.progress_interval),
            limit: self.limit,
            time_limit: self.time_limit.map(Duration::from_secs),
        }
    }

    pub fn validate(&self) -> Result<(), WireError> {
        if self.workers == 0 {
            return Err(WireError::Settings("workers must be at least 1".to_string()));
        }
        if self.limit == Some(0) {
            return Err(WireError::Settings("limit must be at least 1".to_string()));
        }
        self.solver().validate(self.num_wires)
    }
}
