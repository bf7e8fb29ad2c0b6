//! Business-day arithmetic over inclusive calendar-date ranges.
//!
//! Saturday and Sunday are the only non-business days; public holidays are
//! not modelled here.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use crate::duration::LeaveDuration;

const WORK_DAYS_PER_WEEK: i64 = 5;
const WEEKEND_DAYS_PER_WEEK: i64 = 2;

/// ISO-8601 weekday ordinal, 1 = Monday .. 7 = Sunday.
pub fn iso_weekday(date: NaiveDate) -> u32 {
    date.weekday().number_from_monday()
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(iso_weekday(date) - 1))
}

pub fn is_business_day(date: NaiveDate) -> bool {
    iso_weekday(date) <= WORK_DAYS_PER_WEEK as u32
}

/// Number of Monday–Friday days in `[from, to]`, both ends inclusive.
///
/// Defined for any pair of dates. When `to` precedes `from` the result is
/// zero or negative, which callers treat as an invalid range.
pub fn count_business_days(from: NaiveDate, to: NaiveDate) -> i64 {
    // Always a whole number of weeks, so the division below is exact.
    let raw_span = week_start_ordinal(to) - week_start_ordinal(from);
    let weekday_span = raw_span - (raw_span / 7) * WEEKEND_DAYS_PER_WEEK;

    weekday_span - business_days_before(from) + business_days_through(to)
}

/// Business-day count of `[from, to]` paired with its display string.
pub fn leave_duration(from: NaiveDate, to: NaiveDate) -> LeaveDuration {
    LeaveDuration::from_days(count_business_days(from, to))
}

/// Like [`leave_duration`], but a range without any business day is an error
/// instead of a non-positive count.
pub fn checked_leave_duration(from: NaiveDate, to: NaiveDate) -> Result<LeaveDuration, RangeError> {
    let duration = leave_duration(from, to);
    if duration.is_allocatable() {
        return Ok(duration);
    }
    if to < from {
        Err(RangeError::Inverted { from, to })
    } else {
        Err(RangeError::NoBusinessDays { from, to })
    }
}

fn week_start_ordinal(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - i64::from(iso_weekday(date) - 1)
}

// Weekend endpoints clamp to the end of the working week.
fn business_days_before(date: NaiveDate) -> i64 {
    i64::from(iso_weekday(date) - 1).min(WORK_DAYS_PER_WEEK)
}

fn business_days_through(date: NaiveDate) -> i64 {
    i64::from(iso_weekday(date)).min(WORK_DAYS_PER_WEEK)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DateField {
    From,
    To,
}

impl DateField {
    pub fn label(&self) -> &'static str {
        match self {
            DateField::From => "Leave from",
            DateField::To => "Leave to",
        }
    }
}

impl std::fmt::Display for DateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("The date contained in \"{field}\" is invalid.")]
pub struct DateFieldError {
    pub field: DateField,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("\"Leave to\" ({to}) cannot be earlier than \"Leave from\" ({from})")]
    Inverted { from: NaiveDate, to: NaiveDate },
    #[error("{from} to {to} does not contain any business day")]
    NoBusinessDays { from: NaiveDate, to: NaiveDate },
}

/// Inclusive, timezone-naive leave window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeaveRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl LeaveRange {
    /// Parses two `YYYY-MM-DD` strings; the error names the offending field,
    /// `from` being checked first.
    pub fn parse(from: &str, to: &str) -> Result<Self, DateFieldError> {
        let from = parse_date(DateField::From, from)?;
        let to = parse_date(DateField::To, to)?;
        Ok(Self { from, to })
    }

    pub fn duration(&self) -> LeaveDuration {
        leave_duration(self.from, self.to)
    }

    pub fn checked_duration(&self) -> Result<LeaveDuration, RangeError> {
        checked_leave_duration(self.from, self.to)
    }
}

pub fn parse_date(field: DateField, raw: &str) -> Result<NaiveDate, DateFieldError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| DateFieldError {
        field,
        value: raw.to_string(),
    })
}
