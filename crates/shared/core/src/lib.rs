//! Trendalert Core Domain
//!
//! Pure domain types for the trendalert evaluation engine.
//! This crate contains no async, no I/O, and is 100% unit testable.
//!
//! ```text
//!  closes ──► PriceSeries ──► ModelFitter ──► ModelPair
//!                                                │
//!                                                ▼
//!                                        DeviationEvaluator
//!                                                │ DeviationReport
//!                                                ▼
//!                                           AlertPolicy ──► Decision
//! ```

pub mod decision;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod regression;
pub mod series;
pub mod statistics;
pub mod values;

// Re-export commonly used types at crate root
pub use decision::{AlertPolicy, Decision, ScoreBasis, SuppressReason};
pub use engine::{Evaluation, EvaluationResult, TrendEngine};
pub use error::{DegenerateDistributionError, EvaluationError, FitError, SeriesError};
pub use evaluator::{DeviationEvaluator, DeviationReport, Forecast};
pub use regression::{ModelFitter, ModelKind, ModelPair, RegressionModel};
pub use series::{PriceBar, PriceSeries};
pub use statistics::ResidualStatistics;
pub use values::{Symbol, ZScore};
