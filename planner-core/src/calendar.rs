//! Month arithmetic and the Sunday-first calendar grid.
//!
//! Everything here is pure: no I/O, no clock reads. The HTML view, the
//! plan store and the spreadsheet export all agree on the same grid.

use std::fmt;

use chrono::{Datelike, Months, NaiveDate};

use crate::error::PlanError;

/// Number of week rows in every grid, enough for any month layout.
pub const GRID_WEEKS: usize = 6;
pub const GRID_DAYS: usize = 7;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Column headers, Sunday first.
pub const WEEKDAY_NAMES: [&str; GRID_DAYS] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// A validated (year, month) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, PlanError> {
        if !(1..=12).contains(&month) {
            return Err(PlanError::InvalidMonth {
                month: i64::from(month),
            });
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or(PlanError::InvalidYear { year })
    }

    /// Fold an out-of-range month into the neighbouring years:
    /// `(2024, 0)` is December 2023, `(2024, 13)` is January 2025.
    pub fn normalize(year: i32, month: i64) -> Result<Self, PlanError> {
        let total = month
            .checked_sub(1)
            .and_then(|offset| i64::from(year).checked_mul(12)?.checked_add(offset))
            .ok_or(PlanError::InvalidMonth { month })?;
        let y = total.div_euclid(12);
        let m = total.rem_euclid(12) + 1;
        let year = i32::try_from(y).map_err(|_| PlanError::InvalidMonth { month })?;
        Self::new(year, m as u32)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// The month before this one, or `None` at the earliest supported date.
    pub fn checked_previous(&self) -> Option<Self> {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| Self { first })
    }

    /// The month before this one. Saturates at the earliest supported date.
    pub fn previous(&self) -> Self {
        self.checked_previous().unwrap_or(*self)
    }

    /// The month after this one. Saturates at the latest supported date.
    pub fn next(&self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(*self)
    }

    pub fn days_in_month(&self) -> u32 {
        match self.first.checked_add_months(Months::new(1)) {
            Some(next) => next.signed_duration_since(self.first).num_days() as u32,
            // December of the last representable year
            None => 31,
        }
    }

    pub fn contains_day(&self, day: u32) -> bool {
        (1..=self.days_in_month()).contains(&day)
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month() as usize - 1]
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// A 6×7 matrix of day numbers, Sunday first. `0` marks a cell that falls
/// outside the month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: YearMonth,
    weeks: [[u32; GRID_DAYS]; GRID_WEEKS],
}

impl MonthGrid {
    pub fn weeks(&self) -> &[[u32; GRID_DAYS]; GRID_WEEKS] {
        &self.weeks
    }

    /// Weeks holding at least one day of the month. Trailing empty rows
    /// are skipped.
    pub fn visible_weeks(&self) -> impl Iterator<Item = &[u32; GRID_DAYS]> {
        self.weeks
            .iter()
            .filter(|week| week.iter().any(|&day| day != 0))
    }

    pub fn days(&self) -> impl Iterator<Item = u32> + '_ {
        self.weeks.iter().flatten().copied().filter(|&day| day != 0)
    }
}

pub fn month_grid(month: YearMonth) -> MonthGrid {
    let mut weeks = [[0u32; GRID_DAYS]; GRID_WEEKS];
    let offset = month.first_day().weekday().num_days_from_sunday() as usize;

    for day in 1..=month.days_in_month() {
        let slot = offset + day as usize - 1;
        weeks[slot / GRID_DAYS][slot % GRID_DAYS] = day;
    }

    MonthGrid { month, weeks }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn march_2024_starts_on_friday() {
        let grid = month_grid(ym(2024, 3));
        assert_eq!(grid.weeks()[0], [0, 0, 0, 0, 0, 1, 2]);
        assert_eq!(grid.weeks()[5], [31, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn february_2015_fits_in_four_weeks() {
        // Feb 1st 2015 was a Sunday and the year is not leap
        let grid = month_grid(ym(2015, 2));
        assert_eq!(grid.weeks()[0], [1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(grid.visible_weeks().count(), 4);
        assert_eq!(grid.weeks()[4], [0; GRID_DAYS]);
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(ym(2024, 2).days_in_month(), 29);
        assert_eq!(ym(2023, 2).days_in_month(), 28);
        assert_eq!(ym(1900, 2).days_in_month(), 28);
        assert_eq!(ym(2000, 2).days_in_month(), 29);
        assert_eq!(ym(2024, 12).days_in_month(), 31);
        assert_eq!(ym(2024, 4).days_in_month(), 30);
    }

    #[test]
    fn previous_and_next_wrap_the_year() {
        assert_eq!(ym(2024, 1).previous(), ym(2023, 12));
        assert_eq!(ym(2024, 12).next(), ym(2025, 1));
        assert_eq!(ym(2024, 6).previous(), ym(2024, 5));
    }

    #[test]
    fn normalize_folds_overflowing_months() {
        assert_eq!(YearMonth::normalize(2024, 0).unwrap(), ym(2023, 12));
        assert_eq!(YearMonth::normalize(2024, 13).unwrap(), ym(2025, 1));
        assert_eq!(YearMonth::normalize(2024, -11).unwrap(), ym(2023, 1));
        assert_eq!(YearMonth::normalize(2024, 25).unwrap(), ym(2026, 1));
        assert_eq!(YearMonth::normalize(2024, 7).unwrap(), ym(2024, 7));
    }

    #[test]
    fn normalize_rejects_months_that_overflow() {
        assert_eq!(
            YearMonth::normalize(2024, i64::MAX),
            Err(PlanError::InvalidMonth { month: i64::MAX })
        );
        assert_eq!(
            YearMonth::normalize(2024, i64::MIN),
            Err(PlanError::InvalidMonth { month: i64::MIN })
        );
        assert!(YearMonth::normalize(i32::MAX, 13).is_err());
    }

    #[test]
    fn earliest_month_has_no_previous() {
        let earliest = YearMonth::from_date(NaiveDate::MIN);
        assert_eq!(earliest.checked_previous(), None);
        assert_eq!(earliest.previous(), earliest);
        assert_eq!(ym(2024, 1).checked_previous(), Some(ym(2023, 12)));
    }

    #[test]
    fn new_rejects_out_of_range_month() {
        assert_eq!(
            YearMonth::new(2024, 13),
            Err(PlanError::InvalidMonth { month: 13 })
        );
        assert!(YearMonth::new(2024, 0).is_err());
    }

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(ym(2024, 3).to_string(), "2024-03");
        assert_eq!(ym(2024, 3).month_name(), "March");
    }
}
