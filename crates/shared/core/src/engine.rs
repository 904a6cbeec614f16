//! Per-instrument evaluation: fit -> evaluate -> decide

use serde::{Deserialize, Serialize};

use crate::decision::{AlertPolicy, Decision};
use crate::error::{EvaluationError, FitError};
use crate::evaluator::{DeviationEvaluator, DeviationReport};
use crate::regression::{ModelFitter, ModelPair};
use crate::series::PriceSeries;
use crate::values::{Symbol, ZScore};

/// Computed result for one instrument in one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub symbol: Symbol,
    pub last_close: f64,
    pub linear_forecast: f64,
    pub polynomial_forecast: f64,
    pub forecast_score: ZScore,
    pub actual_score: ZScore,
    /// The score the decision was taken on
    pub standardized_score: ZScore,
    pub triggered: bool,
}

/// Result plus the artifacts needed to render and notify
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub result: EvaluationResult,
    pub decision: Decision,
    pub report: DeviationReport,
    pub models: ModelPair,
}

/// The forecast-and-deviation engine
#[derive(Debug, Clone, Copy)]
pub struct TrendEngine {
    fitter: ModelFitter,
    policy: AlertPolicy,
}

impl TrendEngine {
    pub fn new(polynomial_degree: usize, policy: AlertPolicy) -> Result<Self, FitError> {
        Ok(Self {
            fitter: ModelFitter::new(polynomial_degree)?,
            policy,
        })
    }

    pub fn policy(&self) -> &AlertPolicy {
        &self.policy
    }

    pub fn degree(&self) -> usize {
        self.fitter.degree()
    }

    pub fn evaluate(
        &self,
        symbol: &str,
        series: &PriceSeries,
    ) -> Result<Evaluation, EvaluationError> {
        let models = self.fitter.fit(series)?;
        let report = DeviationEvaluator::evaluate(&models, series)?;
        let decision = self.policy.decide(&report);

        let result = EvaluationResult {
            symbol: symbol.to_string(),
            last_close: report.last_close,
            linear_forecast: report.forecast.linear,
            polynomial_forecast: report.forecast.polynomial,
            forecast_score: report.forecast_score,
            actual_score: report.actual_score,
            standardized_score: self.policy.score_basis.select(&report),
            triggered: decision.is_emit(),
        };

        Ok(Evaluation {
            result,
            decision,
            report,
            models,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::{ScoreBasis, SuppressReason};
    use crate::error::DegenerateDistributionError;

    fn series(closes: &[f64]) -> PriceSeries {
        PriceSeries::from_closes(closes.iter().copied()).unwrap()
    }

    #[test]
    fn test_perfect_linear_series_is_degenerate() {
        let engine = TrendEngine::new(2, AlertPolicy::new(2.0)).unwrap();
        let closes: Vec<f64> = (10..=20).map(f64::from).collect();

        let err = engine.evaluate("LINE", &series(&closes)).unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::Degenerate(DegenerateDistributionError::ZeroDeviation { .. })
        ));
    }

    #[test]
    fn test_downward_outlier_triggers() {
        let engine = TrendEngine::new(2, AlertPolicy::new(0.1)).unwrap();
        let mut closes: Vec<f64> = (10..=20).map(f64::from).collect();
        closes.push(12.0);

        let evaluation = engine.evaluate("DROP", &series(&closes)).unwrap();
        let result = &evaluation.result;

        assert!(result.linear_forecast >= result.last_close);
        assert!(result.standardized_score.value() > 0.1);
        assert!(result.triggered);
        assert!(evaluation.decision.is_emit());
        assert_eq!(result.symbol, "DROP");
        assert_eq!(result.standardized_score, result.actual_score);
    }

    #[test]
    fn test_upward_outlier_suppressed() {
        let engine = TrendEngine::new(2, AlertPolicy::new(0.1)).unwrap();
        let mut closes: Vec<f64> = (10..=20).map(f64::from).collect();
        closes.push(40.0);

        let evaluation = engine.evaluate("SPIKE", &series(&closes)).unwrap();
        assert!(!evaluation.result.triggered);
        assert_eq!(
            evaluation.decision,
            Decision::Suppress {
                reason: SuppressReason::ForecastBelowPrice
            }
        );
    }

    #[test]
    fn test_noisy_trend_does_not_trigger_with_defaults() {
        // Linear trend with bounded +-1 noise, last day on a dip
        let closes: Vec<f64> = (1..=60)
            .map(|i| 100.0 + i as f64 + if i % 2 == 1 { 1.0 } else { -1.0 })
            .collect();
        let engine = TrendEngine::new(4, AlertPolicy::new(2.0)).unwrap();

        let evaluation = engine.evaluate("NOISE", &series(&closes)).unwrap();
        let result = &evaluation.result;

        assert!(result.linear_forecast > result.last_close);
        assert_eq!(result.standardized_score, result.actual_score);
        assert!(result.actual_score.value() < 2.0);
        assert!(!result.triggered);
        assert_eq!(
            evaluation.decision,
            Decision::Suppress {
                reason: SuppressReason::DeviationBelowThreshold
            }
        );
    }

    #[test]
    fn test_forecast_basis_reported() {
        let policy = AlertPolicy::new(100.0).with_score_basis(ScoreBasis::Forecast);
        let engine = TrendEngine::new(3, policy).unwrap();
        let closes = [50.0, 52.0, 51.0, 55.0, 53.0, 57.0, 56.0, 54.0, 58.0, 52.0];

        let evaluation = engine.evaluate("BASIS", &series(&closes)).unwrap();
        assert_eq!(
            evaluation.result.standardized_score,
            evaluation.result.forecast_score
        );
    }

    #[test]
    fn test_short_series_fails_fit() {
        let engine = TrendEngine::new(4, AlertPolicy::new(2.0)).unwrap();
        let err = engine
            .evaluate("SHORT", &series(&[1.0, 2.0, 3.0]))
            .unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::Fit(FitError::InsufficientData { .. })
        ));
    }
}
