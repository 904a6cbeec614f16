//! Deviation Evaluator
//!
//! The residual at ordinal `i` is `close(i) - linear(i)`: how far the price
//! sat from its straight trend on that day. Both scored observations are a
//! price measured against the linear forecast one step ahead, so they are
//! standardized against their own distribution:
//! - `actual_score`: |((last_close - linear(n+1)) - mean) / std|
//! - `forecast_score`: |((polynomial(n+1) - linear(n+1)) - mean) / std|,
//!   with the polynomial forecast standing in for the next close

use serde::{Deserialize, Serialize};

use crate::error::DegenerateDistributionError;
use crate::regression::ModelPair;
use crate::series::PriceSeries;
use crate::statistics::ResidualStatistics;
use crate::values::ZScore;

/// One-step-ahead forecast from both models
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Ordinal being forecast (n + 1)
    pub ordinal: usize,
    pub linear: f64,
    pub polynomial: f64,
}

impl Forecast {
    pub fn from_models(models: &ModelPair, ordinal: usize) -> Self {
        Self {
            ordinal,
            linear: models.linear.predict(ordinal),
            polynomial: models.polynomial.predict(ordinal),
        }
    }

    /// polynomial - linear
    pub fn disagreement(&self) -> f64 {
        self.polynomial - self.linear
    }
}

/// Everything the evaluator learned about one series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviationReport {
    pub last_close: f64,
    pub statistics: ResidualStatistics,
    pub forecast: Forecast,
    pub forecast_score: ZScore,
    pub actual_score: ZScore,
}

impl DeviationReport {
    /// last_close - linear forecast
    pub fn actual_gap(&self) -> f64 {
        self.last_close - self.forecast.linear
    }
}

/// Turns fitted models into residual statistics, forecasts and scores
pub struct DeviationEvaluator;

impl DeviationEvaluator {
    /// Per-ordinal residuals `close(i) - linear(i)`
    pub fn residuals(models: &ModelPair, series: &PriceSeries) -> Vec<f64> {
        series
            .bars()
            .iter()
            .map(|bar| bar.close - models.linear.predict(bar.ordinal))
            .collect()
    }

    pub fn evaluate(
        models: &ModelPair,
        series: &PriceSeries,
    ) -> Result<DeviationReport, DegenerateDistributionError> {
        let residuals = Self::residuals(models, series);
        let statistics = ResidualStatistics::from_residuals(&residuals, series.price_scale())?;

        let forecast = Forecast::from_models(models, series.next_ordinal());
        let last_close = series.last_close();

        let forecast_score = ZScore::standardize(forecast.disagreement(), &statistics);
        let actual_score = ZScore::standardize(last_close - forecast.linear, &statistics);

        Ok(DeviationReport {
            last_close,
            statistics,
            forecast,
            forecast_score,
            actual_score,
        })
    }
}
