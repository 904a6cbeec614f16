//! Market Data Port - Abstraction for reading daily price history
//!
//! The evaluation engine only needs closing prices ordered oldest to newest.
//! Infrastructure layer provides concrete implementations.

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::IngestionError;

/// Calendar-day window [start, end]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Window covering the `days` calendar days before `end`
    pub fn trailing(end: NaiveDate, days: u32) -> Self {
        let start = end
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Port for fetching daily closing prices
///
/// Implementations return closes for trading days inside the window, oldest
/// first. An instrument with no bars in the window is an error, not an
/// empty vector.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn daily_closes(
        &self,
        symbol: &str,
        window: DateWindow,
    ) -> Result<Vec<f64>, IngestionError>;

    /// Get the source's name/identifier for debugging
    fn name(&self) -> &str {
        "PriceSource"
    }
}
