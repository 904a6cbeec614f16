//! Chart Port - Abstraction for rendering the model comparison chart

use trendalert_core::{ModelPair, PriceSeries};

use crate::error::RenderError;

/// Data for one comparison chart: actual closes vs. both model curves
#[derive(Debug, Clone, Copy)]
pub struct ChartRequest<'a> {
    pub symbol: &'a str,
    pub series: &'a PriceSeries,
    pub models: &'a ModelPair,
}

impl<'a> ChartRequest<'a> {
    pub fn new(symbol: &'a str, series: &'a PriceSeries, models: &'a ModelPair) -> Self {
        Self {
            symbol,
            series,
            models,
        }
    }

    /// (ordinal, close) points
    pub fn actual_points(&self) -> Vec<(usize, f64)> {
        self.series
            .bars()
            .iter()
            .map(|b| (b.ordinal, b.close))
            .collect()
    }

    pub fn linear_points(&self) -> Vec<(usize, f64)> {
        self.series
            .ordinals()
            .map(|x| (x, self.models.linear.predict(x)))
            .collect()
    }

    pub fn polynomial_points(&self) -> Vec<(usize, f64)> {
        self.series
            .ordinals()
            .map(|x| (x, self.models.polynomial.predict(x)))
            .collect()
    }

    /// Lowest and highest value across all three lines
    pub fn value_range(&self) -> (f64, f64) {
        self.actual_points()
            .into_iter()
            .chain(self.linear_points())
            .chain(self.polynomial_points())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, v)| {
                (lo.min(v), hi.max(v))
            })
    }
}

/// Encoded chart image
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub file_name: String,
    pub png: Vec<u8>,
}

/// Port for chart rasterization
pub trait ChartRenderer: Send + Sync {
    fn render(&self, request: &ChartRequest<'_>) -> Result<RenderedChart, RenderError>;
}
