//! Residual distribution used to standardize deviations

use serde::{Deserialize, Serialize};

use crate::error::DegenerateDistributionError;

/// A standard deviation at or below this fraction of the price scale is
/// treated as zero. Exact fits leave rounding noise in the residuals; that
/// noise must not turn into a huge score.
const ZERO_DEVIATION_TOLERANCE: f64 = 1e-9;

/// Mean and sample standard deviation of a residual sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResidualStatistics {
    mean: f64,
    std_dev: f64,
    count: usize,
}

impl ResidualStatistics {
    /// Summarize residuals with Bessel's correction (divisor n - 1).
    ///
    /// `price_scale` is the typical magnitude of the prices the residuals
    /// were computed from; it sets the tolerance for a zero deviation.
    pub fn from_residuals(
        residuals: &[f64],
        price_scale: f64,
    ) -> Result<Self, DegenerateDistributionError> {
        let count = residuals.len();
        if count < 2 {
            return Err(DegenerateDistributionError::TooFewSamples { count });
        }

        let n = count as f64;
        let mean = residuals.iter().sum::<f64>() / n;
        let variance = residuals
            .iter()
            .map(|r| {
                let d = r - mean;
                d * d
            })
            .sum::<f64>()
            / (n - 1.0);
        let std_dev = variance.sqrt();

        if !(std_dev > ZERO_DEVIATION_TOLERANCE * price_scale.abs().max(1.0)) {
            return Err(DegenerateDistributionError::ZeroDeviation { std_dev });
        }

        Ok(Self {
            mean,
            std_dev,
            count,
        })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_statistics() {
        let stats = ResidualStatistics::from_residuals(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], 1.0)
            .unwrap();
        assert!((stats.mean() - 5.0).abs() < 1e-12);
        // Sample variance = 32 / 7
        assert!((stats.std_dev() - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(stats.count(), 8);
    }

    #[test]
    fn test_single_sample_is_degenerate() {
        let err = ResidualStatistics::from_residuals(&[1.5], 1.0).unwrap_err();
        assert_eq!(err, DegenerateDistributionError::TooFewSamples { count: 1 });

        let err = ResidualStatistics::from_residuals(&[], 1.0).unwrap_err();
        assert_eq!(err, DegenerateDistributionError::TooFewSamples { count: 0 });
    }

    #[test]
    fn test_identical_residuals_are_degenerate() {
        let err = ResidualStatistics::from_residuals(&[0.3, 0.3, 0.3, 0.3], 100.0).unwrap_err();
        assert!(matches!(
            err,
            DegenerateDistributionError::ZeroDeviation { .. }
        ));
    }

    #[test]
    fn test_rounding_noise_is_degenerate() {
        let err =
            ResidualStatistics::from_residuals(&[1e-14, -2e-14, 0.0, 3e-14], 150.0).unwrap_err();
        assert!(matches!(
            err,
            DegenerateDistributionError::ZeroDeviation { .. }
        ));
    }

    #[test]
    fn test_two_distinct_samples_are_enough() {
        let stats = ResidualStatistics::from_residuals(&[1.0, -1.0], 10.0).unwrap();
        assert_eq!(stats.mean(), 0.0);
        assert!((stats.std_dev() - 2.0f64.sqrt()).abs() < 1e-12);
    }
}
