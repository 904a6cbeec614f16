//! Alert Decision
//!
//! Rules are checked in order and the first match wins:
//! 1. linear forecast below the last close -> suppress
//! 2. chosen score at or below the threshold -> suppress
//! 3. otherwise -> emit

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::evaluator::DeviationReport;
use crate::values::ZScore;

/// Which standardized score drives the decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBasis {
    /// Forecast disagreement between the two models
    Forecast,
    /// Gap between the last close and the linear forecast
    #[default]
    Actual,
}

impl ScoreBasis {
    pub fn select(&self, report: &DeviationReport) -> ZScore {
        match self {
            ScoreBasis::Forecast => report.forecast_score,
            ScoreBasis::Actual => report.actual_score,
        }
    }
}

impl fmt::Display for ScoreBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreBasis::Forecast => write!(f, "forecast"),
            ScoreBasis::Actual => write!(f, "actual"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressReason {
    /// The price is already above its trend - no buy signal
    ForecastBelowPrice,
    /// Not enough statistical anomaly
    DeviationBelowThreshold,
}

impl fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuppressReason::ForecastBelowPrice => write!(f, "forecast below current price"),
            SuppressReason::DeviationBelowThreshold => write!(f, "deviation below threshold"),
        }
    }
}

/// Outcome of the alert gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Decision {
    Suppress { reason: SuppressReason },
    Emit { reason: String },
}

impl Decision {
    pub fn is_emit(&self) -> bool {
        matches!(self, Decision::Emit { .. })
    }

    /// Human-readable reason for logs and reports
    pub fn reason(&self) -> String {
        match self {
            Decision::Suppress { reason } => reason.to_string(),
            Decision::Emit { reason } => reason.clone(),
        }
    }
}

/// Thresholds that gate notifications
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertPolicy {
    pub z_score_threshold: f64,
    #[serde(default)]
    pub score_basis: ScoreBasis,
}

impl AlertPolicy {
    pub fn new(z_score_threshold: f64) -> Self {
        Self {
            z_score_threshold,
            score_basis: ScoreBasis::default(),
        }
    }

    pub fn with_score_basis(mut self, basis: ScoreBasis) -> Self {
        self.score_basis = basis;
        self
    }

    pub fn decide(&self, report: &DeviationReport) -> Decision {
        if report.forecast.linear < report.last_close {
            return Decision::Suppress {
                reason: SuppressReason::ForecastBelowPrice,
            };
        }

        let score = self.score_basis.select(report);
        if !score.exceeds(self.z_score_threshold) {
            return Decision::Suppress {
                reason: SuppressReason::DeviationBelowThreshold,
            };
        }

        Decision::Emit {
            reason: format!(
                "{} deviation {} above threshold {:.2}",
                self.score_basis, score, self.z_score_threshold
            ),
        }
    }
}
