//! Identity trait, calendar utilities, and the date window used by budgets and charts.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for entities stored in the wallet.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Half-open calendar interval `[start, end)` over dates.
///
/// Because dates have day granularity, a window ending on the first day of
/// the next period covers every calendar day of the current one, both
/// boundaries included.
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateWindowError> {
        if end <= start {
            return Err(DateWindowError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// Builds a window from an inclusive first/last day pair.
    pub fn inclusive(first: NaiveDate, last: NaiveDate) -> Result<Self, DateWindowError> {
        Self::new(first, last + Duration::days(1))
    }

    /// The single calendar day `date`.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date + Duration::days(1),
        }
    }

    /// The ISO week (Monday through Sunday) containing `date`.
    pub fn week_containing(date: NaiveDate) -> Self {
        let delta = date.weekday().num_days_from_monday() as i64;
        let start = date - Duration::days(delta);
        Self {
            start,
            end: start + Duration::weeks(1),
        }
    }

    /// The calendar month containing `date`.
    pub fn month_containing(date: NaiveDate) -> Self {
        let start = first_of_month(date);
        Self {
            start,
            end: shift_month(start, 1),
        }
    }

    /// The calendar year containing `date`.
    pub fn year_containing(date: NaiveDate) -> Self {
        let start = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date);
        Self {
            start,
            end: shift_year(start, 1),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// Last calendar day covered by the window.
    pub fn last_day(&self) -> NaiveDate {
        self.end - Duration::days(1)
    }

    /// Iterates every calendar day covered by the window.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        let len = (self.end - self.start).num_days();
        (0..len).map(move |offset| start + Duration::days(offset))
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.last_day())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when constructing [`DateWindow`] values.
pub enum DateWindowError {
    InvalidRange,
}

impl fmt::Display for DateWindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateWindowError::InvalidRange => f.write_str("date window end must be after start"),
        }
    }
}

impl std::error::Error for DateWindowError {}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Moves `date` by `months`, clamping the day to the target month length.
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let month = date.month();
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_next| first_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}
