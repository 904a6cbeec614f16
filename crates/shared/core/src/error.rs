use thiserror::Error;

/// Errors raised while building a [`PriceSeries`](crate::PriceSeries)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("price series is empty")]
    Empty,

    #[error("close at ordinal {ordinal} is not a finite number: {value}")]
    NonFinite { ordinal: usize, value: f64 },
}

/// Errors raised by the model fitter
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("polynomial degree must be at least 1")]
    ZeroDegree,

    #[error("need more than {required} points for a degree {degree} fit, got {actual}")]
    InsufficientData {
        degree: usize,
        required: usize,
        actual: usize,
    },

    #[error("design matrix is singular for a degree {degree} fit")]
    Singular { degree: usize },
}

/// The residual distribution cannot be used to standardize a score
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DegenerateDistributionError {
    #[error("need at least 2 residuals for a sample deviation, got {count}")]
    TooFewSamples { count: usize },

    #[error("residual standard deviation is zero ({std_dev:e})")]
    ZeroDeviation { std_dev: f64 },
}

/// Any failure of the per-instrument evaluation pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("fit failed: {0}")]
    Fit(#[from] FitError),

    #[error("degenerate residual distribution: {0}")]
    Degenerate(#[from] DegenerateDistributionError),
}

pub type FitResult<T> = std::result::Result<T, FitError>;
