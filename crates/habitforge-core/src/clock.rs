//! Local calendar-date source.
//!
//! Every streak and weekly computation compares against "today" as the
//! *local* calendar date. The tracker asks a [`Clock`] for it so the date
//! stays consistent for the duration of one operation and tests can pin it.

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::error::ValidationError;

/// Wire and display format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub trait Clock {
    /// Today's local calendar date.
    fn today(&self) -> NaiveDate;

    /// Current instant, used for creation timestamps.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock in the process' local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a fixed date (noon UTC of that day for `now`).
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }

    fn now(&self) -> DateTime<Utc> {
        self.date
            .and_hms_opt(12, 0, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or_else(Utc::now)
    }
}

/// Parse a `YYYY-MM-DD` string into a calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}
