//! Ordinary least squares trend models
//!
//! Both models are fitted against the trading-day ordinal. The polynomial
//! model expands the ordinal into the basis `[x^0, x^1, ..., x^D]`; the linear
//! model is the `D = 1` case of the same fit.
//!
//! Ordinals are mapped affinely onto `[-1, 1]` before the basis is built so the
//! normal equations stay well conditioned for the degrees used in practice.
//! The mapping is stored on the model, so callers always predict with raw
//! ordinals, including ordinals past the end of the training window.

use serde::{Deserialize, Serialize};

use crate::error::{FitError, FitResult};
use crate::series::PriceSeries;

/// Pivots smaller than this fraction of the largest diagonal entry are
/// treated as zero.
const PIVOT_TOLERANCE: f64 = 1e-12;

/// Model classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Linear,
    Polynomial { degree: usize },
}

impl ModelKind {
    pub fn degree(&self) -> usize {
        match self {
            ModelKind::Linear => 1,
            ModelKind::Polynomial { degree } => *degree,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModelKind::Linear => "LinReg",
            ModelKind::Polynomial { .. } => "PolyReg",
        }
    }
}

/// A fitted regression curve: ordinal -> predicted close
///
/// Only [`ModelFitter`] builds one, so it serializes but never deserializes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionModel {
    kind: ModelKind,
    /// Coefficients in the rescaled domain, lowest power first
    coefficients: Vec<f64>,
    center: f64,
    half_range: f64,
}

impl RegressionModel {
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn degree(&self) -> usize {
        self.kind.degree()
    }

    /// Predicted close at an ordinal (Horner evaluation)
    pub fn predict(&self, ordinal: usize) -> f64 {
        let t = self.rescale(ordinal as f64);
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * t + c)
    }

    /// Predictions at every ordinal of the series
    pub fn curve(&self, series: &PriceSeries) -> Vec<f64> {
        series.ordinals().map(|x| self.predict(x)).collect()
    }

    /// In-sample mean squared error against the actual closes
    pub fn mean_squared_error(&self, series: &PriceSeries) -> f64 {
        let sse: f64 = series
            .bars()
            .iter()
            .map(|bar| {
                let err = self.predict(bar.ordinal) - bar.close;
                err * err
            })
            .sum();
        sse / series.len() as f64
    }

    fn rescale(&self, x: f64) -> f64 {
        (x - self.center) / self.half_range
    }
}

/// The two models fitted for one instrument
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelPair {
    pub linear: RegressionModel,
    pub polynomial: RegressionModel,
}

/// Fits the linear and polynomial models for a configured degree
#[derive(Debug, Clone, Copy)]
pub struct ModelFitter {
    degree: usize,
}

impl ModelFitter {
    /// Create a fitter for a polynomial of `degree` (must be >= 1)
    pub fn new(degree: usize) -> FitResult<Self> {
        if degree == 0 {
            return Err(FitError::ZeroDegree);
        }
        Ok(Self { degree })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Fit both models. The series must hold more than `degree + 1` points.
    pub fn fit(&self, series: &PriceSeries) -> FitResult<ModelPair> {
        let required = self.degree + 1;
        if series.len() <= required {
            return Err(FitError::InsufficientData {
                degree: self.degree,
                required,
                actual: series.len(),
            });
        }

        Ok(ModelPair {
            linear: fit_least_squares(series, ModelKind::Linear)?,
            polynomial: fit_least_squares(
                series,
                ModelKind::Polynomial {
                    degree: self.degree,
                },
            )?,
        })
    }
}

fn fit_least_squares(series: &PriceSeries, kind: ModelKind) -> FitResult<RegressionModel> {
    let degree = kind.degree();
    let size = degree + 1;
    let n = series.len() as f64;

    // n >= 3 here, so the half range is at least 1
    let center = (n + 1.0) / 2.0;
    let half_range = (n - 1.0) / 2.0;

    // Normal equations: (Φᵀ Φ) c = Φᵀ y, stored row-major
    let mut gram = vec![0.0; size * size];
    let mut rhs = vec![0.0; size];
    let mut powers = vec![0.0; size];

    for bar in series.bars() {
        let t = (bar.ordinal as f64 - center) / half_range;
        let mut p = 1.0;
        for power in powers.iter_mut() {
            *power = p;
            p *= t;
        }
        for j in 0..size {
            rhs[j] += powers[j] * bar.close;
            for k in 0..size {
                gram[j * size + k] += powers[j] * powers[k];
            }
        }
    }

    let coefficients =
        solve_linear_system(gram, rhs, size).ok_or(FitError::Singular { degree })?;

    Ok(RegressionModel {
        kind,
        coefficients,
        center,
        half_range,
    })
}

/// Gaussian elimination with partial pivoting. Returns None when singular.
fn solve_linear_system(mut a: Vec<f64>, mut b: Vec<f64>, n: usize) -> Option<Vec<f64>> {
    let scale = (0..n).map(|i| a[i * n + i].abs()).fold(0.0, f64::max);
    if scale == 0.0 || !scale.is_finite() {
        return None;
    }
    let tolerance = scale * PIVOT_TOLERANCE;

    for col in 0..n {
        // Find pivot
        let pivot_row = (col..n).max_by(|&r1, &r2| {
            a[r1 * n + col]
                .abs()
                .total_cmp(&a[r2 * n + col].abs())
        })?;

        if a[pivot_row * n + col].abs() <= tolerance {
            return None;
        }

        if pivot_row != col {
            for j in 0..n {
                a.swap(col * n + j, pivot_row * n + j);
            }
            b.swap(col, pivot_row);
        }

        // Eliminate below
        for row in (col + 1)..n {
            let factor = a[row * n + col] / a[col * n + col];
            if factor == 0.0 {
                continue;
            }
            for j in col..n {
                a[row * n + j] -= factor * a[col * n + j];
            }
            b[row] -= factor * b[col];
        }
    }

    // Back substitution
    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|j| a[row * n + j] * x[j]).sum();
        x[row] = (b[row] - tail) / a[row * n + row];
    }

    x.iter().all(|v| v.is_finite()).then_some(x)
}
