use serde::{Deserialize, Serialize};
use std::fmt;

use crate::statistics::ResidualStatistics;

/// Symbol identifier for an instrument (ticker)
pub type Symbol = String;

/// Absolute standardized deviation, in standard deviations
///
/// Always non-negative: the sign of the underlying deviation is dropped when
/// the score is built.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
pub struct ZScore(f64);

impl ZScore {
    pub const ZERO: ZScore = ZScore(0.0);

    /// Wrap an already-standardized value (its magnitude is kept)
    pub fn new(value: f64) -> Self {
        Self(value.abs())
    }

    /// |(observation - mean) / std_dev| against a residual distribution
    pub fn standardize(observation: f64, stats: &ResidualStatistics) -> Self {
        Self::new((observation - stats.mean()) / stats.std_dev())
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// True when strictly above the given threshold
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.0 > threshold
    }
}

impl fmt::Display for ZScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
