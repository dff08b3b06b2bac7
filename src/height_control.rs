use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::error::Result;
use crate::options::{self, Options, DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY};

/// Decides how many levels a freshly inserted node takes part in.
///
/// A height of 1 means the node only lives on level 0; a height of `n` means
/// it is linked on levels `0..n`.
pub trait HeightControl {
    /// Largest height `get_height` may return.
    fn max_height(&self) -> usize;

    /// Returns a height in `1..=self.max_height()`.
    fn get_height(&mut self) -> usize;
}

/// Draws heights from a geometric distribution truncated at `max_height`.
///
/// The height starts at 1 and grows by one for every uniform draw in `[0, 1)`
/// that falls below `upgrade_probability`, stopping at the first draw that
/// doesn't or when `max_height` is reached. The chance of reaching height
/// `n + 1` is therefore `upgrade_probability` times the chance of reaching
/// height `n`.
#[derive(Debug, Clone)]
pub struct GeometricalGenerator<R = SmallRng> {
    upgrade_probability_: f64,
    max_height_: usize,
    rng_: R,
}

impl<R: RngCore> GeometricalGenerator<R> {
    /// Builds a generator drawing from `rng`. Fails if `max_height` is zero or
    /// `upgrade_probability` is outside `(0, 1)`.
    pub fn new(max_height: usize, upgrade_probability: f64, rng: R) -> Result<Self> {
        options::validate(max_height, upgrade_probability)?;

        Ok(GeometricalGenerator {
            upgrade_probability_: upgrade_probability,
            max_height_: max_height,
            rng_: rng,
        })
    }

    pub fn upgrade_probability(&self) -> f64 {
        self.upgrade_probability_
    }
}

impl GeometricalGenerator<SmallRng> {
    /// A reproducible generator: equal seeds yield equal height sequences.
    pub fn seeded(max_height: usize, upgrade_probability: f64, seed: u64) -> Result<Self> {
        Self::new(max_height, upgrade_probability, SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy(max_height: usize, upgrade_probability: f64) -> Result<Self> {
        Self::new(max_height, upgrade_probability, SmallRng::from_entropy())
    }

    pub fn from_options(options: &Options) -> Result<Self> {
        match options.seed {
            Some(seed) => Self::seeded(options.max_level, options.probability, seed),
            None => Self::from_entropy(options.max_level, options.probability),
        }
    }
}

impl Default for GeometricalGenerator<SmallRng> {
    /// Default level ceiling and probability, seeded from the operating
    /// system.
    fn default() -> Self {
        GeometricalGenerator {
            upgrade_probability_: DEFAULT_PROBABILITY,
            max_height_: DEFAULT_MAX_LEVEL,
            rng_: SmallRng::from_entropy(),
        }
    }
}

impl<R: RngCore> HeightControl for GeometricalGenerator<R> {
    #[inline(always)]
    fn max_height(&self) -> usize {
        self.max_height_
    }

    fn get_height(&mut self) -> usize {
        let mut h = 1;

        while h < self.max_height_ && self.rng_.gen::<f64>() < self.upgrade_probability_ {
            h += 1;
        }

        h
    }
}
