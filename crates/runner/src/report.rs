//! Per-instrument outcomes and the batch report

use std::fmt;
use trendalert_core::{Decision, EvaluationResult};

/// Pipeline stage an instrument failed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ingestion,
    Fit,
    Evaluation,
    Render,
    Delivery,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Ingestion => "ingestion",
            Stage::Fit => "fit",
            Stage::Evaluation => "evaluation",
            Stage::Render => "render",
            Stage::Delivery => "delivery",
        };
        write!(f, "{}", name)
    }
}

/// What happened to the notification for an evaluated instrument
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryOutcome {
    /// Decision was suppress, or the run was a dry run
    NotAttempted,
    /// Endpoint accepted the notification
    Delivered { with_chart: bool },
    /// Full notification failed, the text-only fallback went through
    Degraded { error: String },
    /// Both attempts failed
    Failed { error: String },
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(
            self,
            DeliveryOutcome::Delivered { .. } | DeliveryOutcome::Degraded { .. }
        )
    }
}

/// Result of processing one instrument
#[derive(Debug, Clone, PartialEq)]
pub enum InstrumentOutcome {
    Evaluated {
        result: EvaluationResult,
        decision: Decision,
        delivery: DeliveryOutcome,
    },
    Failed {
        symbol: String,
        stage: Stage,
        error: String,
    },
}

impl InstrumentOutcome {
    pub fn symbol(&self) -> &str {
        match self {
            InstrumentOutcome::Evaluated { result, .. } => &result.symbol,
            InstrumentOutcome::Failed { symbol, .. } => symbol,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, InstrumentOutcome::Failed { .. })
    }

    pub fn triggered(&self) -> bool {
        matches!(self, InstrumentOutcome::Evaluated { result, .. } if result.triggered)
    }
}

/// Outcomes of one run, in configuration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub outcomes: Vec<InstrumentOutcome>,
}

impl BatchReport {
    pub fn push(&mut self, outcome: InstrumentOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn evaluated(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_failed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    pub fn triggered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.triggered()).count()
    }

    pub fn get(&self, symbol: &str) -> Option<&InstrumentOutcome> {
        self.outcomes.iter().find(|o| o.symbol() == symbol)
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} instruments: {} evaluated, {} triggered, {} failed",
            self.len(),
            self.evaluated(),
            self.triggered(),
            self.failed()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendalert_core::{SuppressReason, ZScore};

    fn evaluated(symbol: &str, triggered: bool) -> InstrumentOutcome {
        InstrumentOutcome::Evaluated {
            result: EvaluationResult {
                symbol: symbol.to_string(),
                last_close: 10.0,
                linear_forecast: 11.0,
                polynomial_forecast: 12.0,
                forecast_score: ZScore::new(1.0),
                actual_score: ZScore::new(3.0),
                standardized_score: ZScore::new(3.0),
                triggered,
            },
            decision: Decision::Suppress {
                reason: SuppressReason::DeviationBelowThreshold,
            },
            delivery: DeliveryOutcome::NotAttempted,
        }
    }

    #[test]
    fn test_counts() {
        let mut report = BatchReport::default();
        report.push(evaluated("A", true));
        report.push(InstrumentOutcome::Failed {
            symbol: "B".to_string(),
            stage: Stage::Ingestion,
            error: "no data".to_string(),
        });
        report.push(evaluated("C", false));

        assert_eq!(report.len(), 3);
        assert_eq!(report.evaluated(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.triggered(), 1);
        assert_eq!(
            report.to_string(),
            "3 instruments: 2 evaluated, 1 triggered, 1 failed"
        );
        assert!(report.get("B").unwrap().is_failed());
    }

    #[test]
    fn test_degraded_counts_as_delivered() {
        assert!(DeliveryOutcome::Degraded { error: "x".into() }.is_delivered());
        assert!(!DeliveryOutcome::Failed { error: "x".into() }.is_delivered());
        assert!(!DeliveryOutcome::NotAttempted.is_delivered());
    }
}
