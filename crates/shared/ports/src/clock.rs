use chrono::{NaiveDate, Utc};

/// Port for the run date
///
/// This allows the system to use different time sources:
/// - Real system time for production
/// - Fixed date for deterministic tests
pub trait Clock: Send + Sync {
    /// Today's date according to this clock
    fn today(&self) -> NaiveDate;

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}

/// Wall clock in UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}

/// Clock pinned to a single date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }

    fn name(&self) -> &str {
        "FixedClock"
    }
}
