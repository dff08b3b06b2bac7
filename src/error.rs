use thiserror::Error;

/// Everything that can go wrong while building or growing a `SkipList`.
///
/// Duplicate insertions and lookups of absent values are not errors; they are
/// reported through the boolean results of the corresponding operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipListError {
    #[error("max level must be at least 1, got {0}")]
    InvalidMaxLevel(usize),
    #[error("promotion probability must lie strictly between 0 and 1, got {0}")]
    InvalidProbability(f64),
    #[error("height controller produced height {height}, expected 1..={max_level}")]
    InvalidHeight { height: usize, max_level: usize },
    #[error("could not allocate storage for {height} forward links")]
    AllocationFailed { height: usize },
}

pub type Result<T> = std::result::Result<T, SkipListError>;
