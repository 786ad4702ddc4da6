//! Calendar date windows used to scope every metric.

use chrono::NaiveDate;
use serde::Serialize;

use crate::CoreError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Half-open range of calendar dates: `start` inclusive, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Builds a window, rejecting empty or reversed ranges and ranges whose
    /// prior window would fall before the earliest representable date.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyWindow`] when `end <= start`, or
    /// [`CoreError::WindowOutOfRange`] when the prior window cannot exist.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if end <= start {
            return Err(CoreError::EmptyWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        if start.checked_sub_signed(end - start).is_none() {
            return Err(CoreError::WindowOutOfRange {
                start: start.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parses both bounds from `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDate`] for an unparseable bound, otherwise
    /// whatever [`DateWindow::new`] returns.
    pub fn parse(start: &str, end: &str) -> Result<Self, CoreError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    #[must_use]
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// The equal-length window that ends where this one starts.
    #[must_use]
    pub fn prior(&self) -> DateWindow {
        let len = self.end - self.start;
        // `new` guarantees the subtraction is representable.
        let start = self
            .start
            .checked_sub_signed(len)
            .unwrap_or(NaiveDate::MIN);
        DateWindow {
            start,
            end: self.start,
        }
    }

    /// Lower bound formatted for the search range filter.
    #[must_use]
    pub fn start_param(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    /// Upper bound formatted for the search range filter.
    #[must_use]
    pub fn end_param(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

/// Parses a single `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDate`] when the value is not a calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| CoreError::InvalidDate {
        value: value.to_string(),
    })
}
