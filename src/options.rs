use crate::error::{Result, SkipListError};

/// Default ceiling on node heights.
pub const DEFAULT_MAX_LEVEL: usize = 16;

/// Default promotion probability.
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Construction parameters for a `SkipList`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    /// Highest level any node may reach. Must be at least 1.
    pub max_level: usize,
    /// Chance that a node present on level `n` is also present on `n + 1`.
    /// Must lie strictly between 0 and 1.
    pub probability: f64,
    /// Seed for the height generator. `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_level: DEFAULT_MAX_LEVEL,
            probability: DEFAULT_PROBABILITY,
            seed: None,
        }
    }
}

impl Options {
    pub fn new(max_level: usize, probability: f64) -> Options {
        Options {
            max_level,
            probability,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Options {
        self.seed = Some(seed);
        self
    }

    /// Rejects out of range parameters. Nothing is ever clamped.
    pub fn validate(&self) -> Result<()> {
        validate(self.max_level, self.probability)
    }
}

pub(crate) fn validate(max_level: usize, probability: f64) -> Result<()> {
    if max_level == 0 {
        return Err(SkipListError::InvalidMaxLevel(max_level));
    }

    // Written this way so that NaN is rejected as well.
    if !(probability > 0.0 && probability < 1.0) {
        return Err(SkipListError::InvalidProbability(probability));
    }

    Ok(())
}
