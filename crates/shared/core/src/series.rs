//! Daily closing-price series indexed by trading-day ordinal

use serde::{Deserialize, Serialize};

use crate::error::SeriesError;

/// One trading day inside the trailing window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// 1-based trading-day index
    pub ordinal: usize,
    pub close: f64,
}

/// Ordered closing prices for a trailing window
///
/// Ordinals are contiguous and start at 1. The series is never empty and
/// every close is finite; both are checked on construction, including when
/// the series is deserialized (it travels as a plain list of closes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series from closes ordered oldest to newest
    pub fn from_closes(closes: impl IntoIterator<Item = f64>) -> Result<Self, SeriesError> {
        let bars = closes
            .into_iter()
            .enumerate()
            .map(|(i, close)| {
                let ordinal = i + 1;
                if close.is_finite() {
                    Ok(PriceBar { ordinal, close })
                } else {
                    Err(SeriesError::NonFinite {
                        ordinal,
                        value: close,
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        if bars.is_empty() {
            return Err(SeriesError::Empty);
        }

        Ok(Self { bars })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.bars.iter().map(|b| b.close)
    }

    pub fn ordinals(&self) -> impl Iterator<Item = usize> + '_ {
        self.bars.iter().map(|b| b.ordinal)
    }

    /// Most recent close
    pub fn last_close(&self) -> f64 {
        // Non-empty by construction
        self.bars[self.bars.len() - 1].close
    }

    /// Ordinal of the first day after the window (n + 1)
    pub fn next_ordinal(&self) -> usize {
        self.bars.len() + 1
    }

    /// Mean absolute close, used as the scale for tolerance checks
    pub fn price_scale(&self) -> f64 {
        self.closes().map(f64::abs).sum::<f64>() / self.len() as f64
    }

    /// Lowest and highest close
    pub fn range(&self) -> (f64, f64) {
        self.closes()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
                (lo.min(c), hi.max(c))
            })
    }
}

impl TryFrom<Vec<f64>> for PriceSeries {
    type Error = SeriesError;

    fn try_from(closes: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_closes(closes)
    }
}

impl From<PriceSeries> for Vec<f64> {
    fn from(series: PriceSeries) -> Self {
        series.bars.into_iter().map(|b| b.close).collect()
    }
}
