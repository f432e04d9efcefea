//! Period calendar logic for the pocket money ledger.
//!
//! A period is one calendar bucket (ISO week, pair of ISO weeks, month or
//! quarter) identified by a canonical string key. Keys of the same type sort
//! lexicographically in chronological order thanks to fixed-width padding.
//! This module owns key parsing, date ranges, navigation across year
//! boundaries and the human-readable labels shown next to entries.

use chrono::{Datelike, Duration, Local, NaiveDate};
use log::debug;
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::{LedgerError, LedgerResult};

pub use shared::PeriodType;

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// One calendar bucket: a period type, a year and the index within that year
/// (week, biweek, month or quarter number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    period_type: PeriodType,
    year: i32,
    index: u32,
}

impl Period {
    /// Build a period, rejecting indices outside the valid range for the year
    pub fn new(period_type: PeriodType, year: i32, index: u32) -> LedgerResult<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(LedgerError::validation(format!(
                "Year {} is outside {}..={}",
                year, MIN_YEAR, MAX_YEAR
            )));
        }
        let max = max_index(period_type, year);
        if index < 1 || index > max {
            return Err(LedgerError::validation(format!(
                "{} index {} is outside 1..={} for {}",
                period_type, index, max, year
            )));
        }
        Ok(Self {
            period_type,
            year,
            index,
        })
    }

    pub fn period_type(&self) -> PeriodType {
        self.period_type
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Week, biweek, month or quarter number depending on the period type
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Canonical key for this period
    pub fn to_key(&self) -> PeriodKey {
        let key = match self.period_type {
            PeriodType::Weekly => format!("{:04}-W{:02}", self.year, self.index),
            PeriodType::Biweekly => format!("{:04}-BW{:02}", self.year, self.index),
            PeriodType::Quarterly => format!("{:04}-Q{}", self.year, self.index),
            PeriodType::Monthly => format!("{:04}-{:02}", self.year, self.index),
        };
        PeriodKey(key)
    }

    /// Parse a canonical key back into a period
    pub fn from_key(key: &str) -> LedgerResult<Self> {
        let malformed = || LedgerError::MalformedKey(key.to_string());

        let (year_part, rest) = key.split_once('-').ok_or_else(malformed)?;
        if year_part.len() != 4 {
            return Err(malformed());
        }
        let year = parse_digits(year_part).ok_or_else(malformed)? as i32;

        let (period_type, index_part) = if let Some(biweek) = rest.strip_prefix("BW") {
            (PeriodType::Biweekly, biweek)
        } else if let Some(week) = rest.strip_prefix('W') {
            (PeriodType::Weekly, week)
        } else if let Some(quarter) = rest.strip_prefix('Q') {
            (PeriodType::Quarterly, quarter)
        } else {
            (PeriodType::Monthly, rest)
        };
        let index = parse_digits(index_part).ok_or_else(malformed)?;

        let period = Period::new(period_type, year, index).map_err(|_| malformed())?;

        // Only the canonical spelling is accepted so that key equality is string equality
        if period.to_key().as_str() != key {
            return Err(malformed());
        }
        Ok(period)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_key().as_str())
    }
}

fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Canonical string identity of one period, e.g. `2024-W05`, `2024-BW03`,
/// `2024-Q1` or `2024-02`.
///
/// Ordering is plain string ordering. Within one period type it matches
/// chronological order; across types it has no defined meaning.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodKey(String);

impl PeriodKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The period this key identifies
    pub fn period(&self) -> Period {
        // Every PeriodKey is built from a valid Period, so this cannot fail
        Period::from_key(&self.0).unwrap_or_else(|_| unreachable!("invalid PeriodKey {}", self.0))
    }

    pub fn period_type(&self) -> PeriodType {
        self.period().period_type()
    }
}

impl FromStr for PeriodKey {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::from_key(s).map(|period| period.to_key())
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PeriodKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Period> for PeriodKey {
    fn from(period: Period) -> Self {
        period.to_key()
    }
}

/// Direction of a navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// The ISO week number of December 28th, i.e. 53 in long years and 52 otherwise
pub fn max_weeks_in_year(year: i32) -> u32 {
    ymd(year, 12, 28).iso_week().week()
}

/// Number of biweekly periods in a year. The last one of a 53-week year
/// covers a single ISO week.
pub fn max_biweeks(year: i32) -> u32 {
    (max_weeks_in_year(year) + 1) / 2
}

fn max_index(period_type: PeriodType, year: i32) -> u32 {
    match period_type {
        PeriodType::Weekly => max_weeks_in_year(year),
        PeriodType::Biweekly => max_biweeks(year),
        PeriodType::Monthly => 12,
        PeriodType::Quarterly => 4,
    }
}

/// Build a date that is known to exist. Callers only pass validated years,
/// months 1..=12 and days that every month has.
fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| unreachable!("invalid calendar date {}-{}-{}", year, month, day))
}

/// Monday of the given ISO week; week 1 is the week containing January 4th
fn week_start(year: i32, week: u32) -> NaiveDate {
    let jan_4 = ymd(year, 1, 4);
    let start_of_week_1 = jan_4 - Duration::days(jan_4.weekday().num_days_from_monday() as i64);
    start_of_week_1 + Duration::weeks(week as i64 - 1)
}

fn month_end(year: i32, month: u32) -> NaiveDate {
    let next_month_start = if month == 12 {
        ymd(year + 1, 1, 1)
    } else {
        ymd(year, month + 1, 1)
    };
    next_month_start - Duration::days(1)
}

/// Calendar service for period identity, ranges, navigation and labels
#[derive(Debug, Clone, Default)]
pub struct PeriodCalendar;

impl PeriodCalendar {
    pub fn new() -> Self {
        Self
    }

    /// The period of the given type containing today's local date
    pub fn current_period(&self, period_type: PeriodType) -> Period {
        let today = Local::now().date_naive();
        let period = self.period_containing(period_type, today);
        debug!("Current {} period for {} is {}", period_type, today, period);
        period
    }

    /// The period of the given type containing `date`. Weekly and biweekly
    /// periods use the ISO week-numbering year, so the last days of December
    /// may belong to week 1 of the following year.
    pub fn period_containing(&self, period_type: PeriodType, date: NaiveDate) -> Period {
        let (year, index) = match period_type {
            PeriodType::Weekly => {
                let iso = date.iso_week();
                (iso.year(), iso.week())
            }
            PeriodType::Biweekly => {
                let iso = date.iso_week();
                (iso.year(), (iso.week() + 1) / 2)
            }
            PeriodType::Quarterly => (date.year(), (date.month() - 1) / 3 + 1),
            PeriodType::Monthly => (date.year(), date.month()),
        };
        Period {
            period_type,
            year,
            index,
        }
    }

    pub fn to_key(&self, period: &Period) -> PeriodKey {
        period.to_key()
    }

    pub fn from_key(&self, key: &str) -> LedgerResult<Period> {
        Period::from_key(key)
    }

    pub fn max_weeks_in_year(&self, year: i32) -> u32 {
        max_weeks_in_year(year)
    }

    pub fn max_biweeks(&self, year: i32) -> u32 {
        max_biweeks(year)
    }

    /// First and last day (inclusive) covered by a period
    pub fn date_range(&self, period: &Period) -> (NaiveDate, NaiveDate) {
        let year = period.year;
        match period.period_type {
            PeriodType::Weekly => {
                let start = week_start(year, period.index);
                (start, start + Duration::days(6))
            }
            PeriodType::Biweekly => {
                let start_week = (period.index - 1) * 2 + 1;
                let end_week = (start_week + 1).min(max_weeks_in_year(year));
                let start = week_start(year, start_week);
                let end = week_start(year, end_week) + Duration::days(6);
                (start, end)
            }
            PeriodType::Quarterly => {
                let start_month = (period.index - 1) * 3 + 1;
                (ymd(year, start_month, 1), month_end(year, start_month + 2))
            }
            PeriodType::Monthly => (ymd(year, period.index, 1), month_end(year, period.index)),
        }
    }

    /// Step one period forward or back within the same type, rolling the
    /// year over at either end. Stepping past year 1 or 9999 is an error.
    pub fn navigate(&self, period: &Period, direction: Direction) -> LedgerResult<Period> {
        let Period {
            period_type,
            year,
            index,
        } = *period;

        let (year, index) = match direction {
            Direction::Next if index >= max_index(period_type, year) => (year + 1, 1),
            Direction::Next => (year, index + 1),
            Direction::Previous if index > 1 => (year, index - 1),
            Direction::Previous if year > MIN_YEAR => (year - 1, max_index(period_type, year - 1)),
            Direction::Previous => (year - 1, 1),
        };
        Period::new(period_type, year, index)
    }

    /// Apply `navigate` `|steps|` times, forward for positive steps
    pub fn offset(&self, period: &Period, steps: i32) -> LedgerResult<Period> {
        let direction = if steps >= 0 {
            Direction::Next
        } else {
            Direction::Previous
        };
        (0..steps.unsigned_abs()).try_fold(*period, |current, _| self.navigate(&current, direction))
    }

    /// Format a date range for display, e.g. `8-14 Jan 2024`,
    /// `29 Jan - 04 Feb 2024` or `30 Dec 2024 - 05 Jan 2025`
    pub fn format_date_range(&self, start: NaiveDate, end: NaiveDate) -> String {
        if start.year() == end.year() {
            if start.month() == end.month() {
                format!("{}-{} {}", start.day(), end.day(), start.format("%b %Y"))
            } else {
                format!("{} - {}", start.format("%d %b"), end.format("%d %b %Y"))
            }
        } else {
            format!("{} - {}", start.format("%d %b %Y"), end.format("%d %b %Y"))
        }
    }

    /// Long label such as `Week 5, 2024`, `Period 3, 2024`, `Q1 2024` or
    /// `February 2024`, optionally followed by the covered dates on a new line
    pub fn format_display(&self, period: &Period, include_dates: bool) -> String {
        let year = period.year;
        let base = match period.period_type {
            PeriodType::Weekly => format!("Week {}, {}", period.index, year),
            PeriodType::Biweekly => format!("Period {}, {}", period.index, year),
            PeriodType::Quarterly => format!("Q{} {}", period.index, year),
            PeriodType::Monthly => format!("{} {}", ymd(year, period.index, 1).format("%B"), year),
        };
        if !include_dates {
            return base;
        }

        let (start, end) = self.date_range(period);
        let dates = match period.period_type {
            PeriodType::Monthly => format!("{}-{} {}", start.day(), end.day(), start.format("%b")),
            _ => self.format_date_range(start, end),
        };
        format!("{}\n({})", base, dates)
    }

    /// `format_display` for a stored key
    pub fn format_label(&self, key: &PeriodKey, include_dates: bool) -> String {
        self.format_display(&key.period(), include_dates)
    }

    /// Compact label for table rows, e.g. `W5 (29/01-04/02)`, `Q1 (Jan-Mar 2024)`
    /// or `Feb 2024`
    pub fn format_short(&self, key: &PeriodKey) -> String {
        let period = key.period();
        let (start, end) = self.date_range(&period);
        match period.period_type {
            PeriodType::Weekly => format!(
                "W{} ({}-{})",
                period.index,
                start.format("%d/%m"),
                end.format("%d/%m")
            ),
            PeriodType::Biweekly => format!(
                "BW{} ({}-{})",
                period.index,
                start.format("%d/%m"),
                end.format("%d/%m")
            ),
            PeriodType::Quarterly => format!(
                "Q{} ({}-{})",
                period.index,
                start.format("%b"),
                end.format("%b %Y")
            ),
            PeriodType::Monthly => format!("{} {}", start.format("%b"), period.year),
        }
    }
}
