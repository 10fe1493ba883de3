//! Running state carried between projected months

use crate::error::ValidationError;
use chrono::{Months, NaiveDate};

/// State of the projection at the start of a month
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Month index (0-based)
    pub month_index: usize,

    /// Calendar date of the month
    pub date: NaiveDate,

    /// Operating profit accumulated over all prior months
    pub cumulative_profit: f64,

    start: NaiveDate,
}

impl ProjectionState {
    /// State for month 0
    pub fn new(start: NaiveDate) -> Self {
        Self {
            month_index: 0,
            date: start,
            cumulative_profit: 0.0,
            start,
        }
    }

    /// Advance to next month, recording this month's operating profit
    ///
    /// Dates are always offset from the start date so a month-end anchor
    /// recovers after a short month (Jan 31, Feb 28, Mar 31).
    pub fn advance_month(&mut self, operating_profit: f64) -> Result<(), ValidationError> {
        let next = self.month_index + 1;
        self.date = month_offset(self.start, next).ok_or(ValidationError::DateOutOfRange {
            start: self.start,
            months: next,
        })?;
        self.cumulative_profit += operating_profit;
        self.month_index = next;
        Ok(())
    }
}

/// Date `months` calendar months after `start`, clamped to the target month's last day.
/// `None` past the end of the supported calendar.
pub fn month_offset(start: NaiveDate, months: usize) -> Option<NaiveDate> {
    u32::try_from(months)
        .ok()
        .and_then(|m| start.checked_add_months(Months::new(m)))
}
