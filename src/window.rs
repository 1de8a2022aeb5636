//! Query windows.
//!
//! A window is an inclusive `[start, end]` pair of `YYYY-MM-DD` keys compared
//! as strings. Weeks start on the Sunday on or before the reference date.
//! Months always end on day `31`, whether or not the month has one: no stored
//! task can carry a date like `2024-02-31`, so the loose bound selects exactly
//! the tasks of that month.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::task::{date_key, is_date_shaped, TaskDate};

/// Days in a week window
pub const WEEK_LEN: u64 = 7;
/// Last day used as the month upper bound
const MONTH_LAST_DAY: u32 = 31;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: String,
    pub end: String,
}

impl DateWindow {
    /// Window covering a caller-supplied range. Bounds are shape-checked
    /// only; an inverted range is kept and simply matches nothing.
    pub fn range(start: &str, end: &str) -> Result<Self> {
        let start = start.trim();
        let end = end.trim();
        for (label, value) in [("start", start), ("end", end)] {
            if !is_date_shaped(value) {
                return Err(Error::InvalidInput(format!(
                    "{label} date must be YYYY-MM-DD, got '{value}'"
                )));
            }
        }
        Ok(Self {
            start: start.to_string(),
            end: end.to_string(),
        })
    }

    /// Single-key window. The key is shape-checked only, so an impossible
    /// day like `2024-02-30` yields a window that matches nothing.
    pub fn day(date: &str) -> Result<Self> {
        let key = date_key(date)?;
        Ok(Self {
            start: key.to_string(),
            end: key.to_string(),
        })
    }

    /// Sunday-to-Saturday week containing `reference`.
    ///
    /// Weeks that straddle year 0000 or 9999 are cut at `0000-01-01` and
    /// `9999-12-31`, since keys outside that range have no `YYYY-MM-DD` form.
    pub fn week_of(reference: &TaskDate) -> Result<Self> {
        let (first, last) = key_range()?;
        let naive = reference.to_naive();
        let back = u64::from(naive.weekday().num_days_from_sunday());
        let start = naive
            .checked_sub_days(Days::new(back))
            .map_or(first, |start| start.max(first));
        let end = naive
            .checked_add_days(Days::new(WEEK_LEN - 1 - back))
            .map_or(last, |end| end.min(last));
        Ok(Self {
            start: TaskDate::from_naive(start).to_string(),
            end: TaskDate::from_naive(end).to_string(),
        })
    }

    /// `[year-month-01, year-month-31]` for a 1-based month.
    pub fn month(year: i32, month: u32) -> Result<Self> {
        if !(0..=9999).contains(&year) {
            return Err(Error::InvalidInput(format!(
                "year must be between 0 and 9999, got {year}"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidInput(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        Ok(Self {
            start: format!("{year:04}-{month:02}-01"),
            end: format!("{year:04}-{month:02}-{MONTH_LAST_DAY}"),
        })
    }

    pub fn contains(&self, date: &str) -> bool {
        self.start.as_str() <= date && date <= self.end.as_str()
    }
}

/// First and last days with a four-digit year.
fn key_range() -> Result<(NaiveDate, NaiveDate)> {
    NaiveDate::from_ymd_opt(0, 1, 1)
        .zip(NaiveDate::from_ymd_opt(9999, 12, 31))
        .ok_or_else(|| Error::InvalidInput("calendar range unavailable".to_string()))
}
